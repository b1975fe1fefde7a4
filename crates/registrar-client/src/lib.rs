//! registrar-client — typed HTTP client and department state slice.
//!
//! [`RegistrarClient`] talks to the REST API. [`DepartmentStore`] caches
//! departments for the admin panel, driving every change through
//! [`DepartmentState::reduce`].

pub mod api;
pub mod config;
pub mod error;
pub mod slice;
pub mod store;

pub use api::{DepartmentApi, RegistrarClient, Resource};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use slice::{Action, DepartmentState, Operation};
pub use store::DepartmentStore;
