//! registrar-api — REST API for the registrar.
//!
//! Provides axum route handlers for departments, students, courses and
//! enrollments. Every resource shares one controller and one route table
//! shape.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/{resource}` | List records with their relations |
//! | POST | `/{resource}` | Create a record (201) |
//! | GET | `/{resource}/{id}` | Get one record (404 if absent) |
//! | PUT | `/{resource}/{id}` | Overwrite a record |
//! | DELETE | `/{resource}/{id}` | Delete a record (204) |
//! | GET | `/health` | Liveness probe |
//!
//! `{resource}` is one of `departments`, `students`, `courses`,
//! `enrollments`.

pub mod error;
pub mod handlers;
pub mod resources;

use axum::Router;
use axum::routing::get;
use registrar_state::Store;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
use resources::{Courses, Departments, Enrollments, Resource, Students};

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: Store,
}

/// Route table for one resource.
fn resource_routes<R: Resource>() -> Router<ApiState> {
    Router::new()
        .route(
            R::PATH,
            get(handlers::list::<R>).post(handlers::create::<R>),
        )
        .route(
            &format!("{}/{{id}}", R::PATH),
            get(handlers::get_one::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::delete::<R>),
        )
}

/// Build the complete REST router.
pub fn build_router(store: Store) -> Router {
    let state = ApiState { store };

    Router::new()
        .merge(resource_routes::<Departments>())
        .merge(resource_routes::<Students>())
        .merge(resource_routes::<Courses>())
        .merge(resource_routes::<Enrollments>())
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
