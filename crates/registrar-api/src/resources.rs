//! Resource definitions wired into the generic controller.

use registrar_state::{CourseRepo, DepartmentRepo, EnrollmentRepo, Repository, StudentRepo, Store};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Fixed error messages for one resource's endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub not_found: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// Message shared by list and get failures on every resource.
pub const DATABASE_UNAVAILABLE: &str = "Failed to connect to database";

/// A REST resource: where it is mounted and which repository serves it.
pub trait Resource: Send + Sync + 'static {
    type Repo: Repository<
            Record: Serialize + Send + 'static,
            Draft: DeserializeOwned + Send + 'static,
        > + Send;

    /// Collection path, e.g. `/departments`.
    const PATH: &'static str;
    const MESSAGES: Messages;

    fn repo(store: &Store) -> Self::Repo;
}

pub struct Departments;

impl Resource for Departments {
    type Repo = DepartmentRepo;
    const PATH: &'static str = "/departments";
    const MESSAGES: Messages = Messages {
        not_found: "Department not found",
        create: "Failed to create Department",
        update: "Failed to update Department",
        delete: "Failed to delete Department",
    };

    fn repo(store: &Store) -> DepartmentRepo {
        store.departments()
    }
}

pub struct Students;

impl Resource for Students {
    type Repo = StudentRepo;
    const PATH: &'static str = "/students";
    const MESSAGES: Messages = Messages {
        not_found: "Student not found",
        create: "Failed to create Student",
        update: "Failed to update Student",
        delete: "Failed to delete Student",
    };

    fn repo(store: &Store) -> StudentRepo {
        store.students()
    }
}

pub struct Courses;

impl Resource for Courses {
    type Repo = CourseRepo;
    const PATH: &'static str = "/courses";
    const MESSAGES: Messages = Messages {
        not_found: "Course not found",
        create: "Failed to create Course",
        update: "Failed to update Course",
        delete: "Failed to delete Course",
    };

    fn repo(store: &Store) -> CourseRepo {
        store.courses()
    }
}

pub struct Enrollments;

impl Resource for Enrollments {
    type Repo = EnrollmentRepo;
    const PATH: &'static str = "/enrollments";
    const MESSAGES: Messages = Messages {
        not_found: "Enrollment not found",
        create: "Failed to create Enrollment",
        update: "Failed to update Enrollment",
        delete: "Failed to delete Enrollment",
    };

    fn repo(store: &Store) -> EnrollmentRepo {
        store.enrollments()
    }
}
