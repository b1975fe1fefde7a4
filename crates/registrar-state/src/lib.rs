//! registrar-state — relational store for the registrar.
//!
//! Backed by [rusqlite](https://docs.rs/rusqlite), provides persistent and
//! in-memory storage for departments, students, courses, and enrollments.
//!
//! # Architecture
//!
//! The schema lives in `schema.rs` as versioned migrations; foreign keys are
//! enforced by SQLite itself. Each entity is reached through a
//! [`Repository`] implementation that owns its SQL, so callers never see
//! statements or rows.
//!
//! The `Store` is `Clone` + `Send` + `Sync` (backed by
//! `Arc<Mutex<Connection>>`) and can be shared across async tasks.

pub mod error;
pub mod repository;
pub mod schema;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use repository::{CourseRepo, DepartmentRepo, EnrollmentRepo, Repository, StudentRepo};
pub use store::Store;
pub use types::*;
