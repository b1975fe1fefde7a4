//! registrar-dashboard — server-rendered admin panel for the registrar.
//!
//! Renders the department admin page with Askama and handles its form
//! posts. All data flows through a [`DepartmentStore`] backed by the REST
//! API client.
//!
//! # Routes
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /` | Home page |
//! | `GET /departments` | Department admin page |
//! | `POST /departments` | Add a department |
//! | `POST /departments/{id}/edit` | Enter edit mode |
//! | `POST /departments/{id}/save` | Save the edit |
//! | `POST /departments/{id}/cancel` | Leave edit mode |
//! | `POST /departments/{id}/toggle` | Expand or collapse a row |
//! | `POST /departments/{id}/delete` | Ask for delete confirmation |
//! | `POST /departments/delete/confirm` | Confirm the pending delete |
//! | `POST /departments/delete/cancel` | Cancel the pending delete |
//! | `POST /departments/retry` | Re-fetch after an error |
//! | `POST /departments/dismiss` | Clear the error |

pub mod actions;
pub mod page;
pub mod pages;
pub mod views;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use registrar_client::{DepartmentApi, DepartmentStore};
use tokio::sync::Mutex;

use page::DepartmentPage;

/// Shared state for dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub departments: DepartmentStore,
    pub page: Arc<Mutex<DepartmentPage>>,
}

impl DashboardState {
    pub fn new(api: Arc<dyn DepartmentApi>) -> Self {
        Self {
            departments: DepartmentStore::new(api),
            page: Arc::new(Mutex::new(DepartmentPage::default())),
        }
    }
}

/// Build the dashboard router.
pub fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route(
            "/departments",
            get(pages::departments).post(actions::add_department),
        )
        .route("/departments/{id}/edit", post(actions::start_edit))
        .route("/departments/{id}/save", post(actions::save_edit))
        .route("/departments/{id}/cancel", post(actions::cancel_edit))
        .route("/departments/{id}/toggle", post(actions::toggle_expand))
        .route("/departments/{id}/delete", post(actions::request_delete))
        .route("/departments/delete/confirm", post(actions::confirm_delete))
        .route("/departments/delete/cancel", post(actions::cancel_delete))
        .route("/departments/retry", post(actions::retry))
        .route("/departments/dismiss", post(actions::dismiss_error))
        .with_state(state)
}
