//! SQLite schema for the registrar store.
//!
//! Migrations are applied in order and the applied version is mirrored to
//! `PRAGMA user_version`. Referential actions follow the data model:
//! deleting a department clears `dept_id` on its students and courses,
//! while students and courses with enrollments cannot be deleted.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "
        CREATE TABLE departments (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0)
        );

        CREATE TABLE students (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            name    TEXT NOT NULL,
            email   TEXT NOT NULL,
            dept_id INTEGER REFERENCES departments(id) ON DELETE SET NULL
        );

        CREATE TABLE courses (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            title   TEXT NOT NULL,
            credits INTEGER NOT NULL,
            dept_id INTEGER REFERENCES departments(id) ON DELETE SET NULL
        );

        CREATE TABLE enrollments (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE RESTRICT,
            course_id  INTEGER NOT NULL REFERENCES courses(id) ON DELETE RESTRICT,
            grade      TEXT
        );

        CREATE INDEX idx_students_dept ON students(dept_id);
        CREATE INDEX idx_courses_dept ON courses(dept_id);
        CREATE INDEX idx_enrollments_student ON enrollments(student_id);
        CREATE INDEX idx_enrollments_course ON enrollments(course_id);
    ",
}];

/// Latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// Apply all pending migrations in one transaction.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if current > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        debug!(version = migration.version, "schema migration applied");
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_monotonic() {
        let mut last = 0;
        for m in MIGRATIONS {
            assert!(m.version > last);
            last = m.version;
        }
    }

    #[test]
    fn apply_twice_is_noop() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, latest_version());
    }

    #[test]
    fn newer_schema_is_refused() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
        let err = apply_migrations(&mut conn).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedSchemaVersion { db_version: 99, .. }
        ));
    }
}
