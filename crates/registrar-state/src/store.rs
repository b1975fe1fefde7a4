//! Store — SQLite-backed persistence handle for the registrar.
//!
//! Owns one connection behind a mutex; repositories borrow it for the
//! duration of a single operation. The store supports both on-disk and
//! in-memory backends (the latter for testing).

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::Connection;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::{CourseRepo, DepartmentRepo, EnrollmentRepo, StudentRepo};
use crate::schema::apply_migrations;

/// Thread-safe store handle backed by SQLite.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self::bootstrap(conn)?;
        debug!(?path, "store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self::bootstrap(conn)?;
        debug!("in-memory store opened");
        Ok(store)
    }

    fn bootstrap(mut conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with exclusive access to the connection.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut conn)
    }

    pub fn departments(&self) -> DepartmentRepo {
        DepartmentRepo::new(self.clone())
    }

    pub fn students(&self) -> StudentRepo {
        StudentRepo::new(self.clone())
    }

    pub fn courses(&self) -> CourseRepo {
        CourseRepo::new(self.clone())
    }

    pub fn enrollments(&self) -> EnrollmentRepo {
        EnrollmentRepo::new(self.clone())
    }
}
