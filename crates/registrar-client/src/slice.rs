//! Department state slice.
//!
//! `DepartmentState` is the cached client-side view of departments and
//! [`DepartmentState::reduce`] is its only mutation path. Every async
//! operation moves through pending, then fulfilled or rejected; actions
//! are plain data and serialize with serde.

use registrar_state::{Department, DepartmentId};
use serde::{Deserialize, Serialize};

/// The asynchronous operations the slice tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    FetchAll,
    FetchOne,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    /// An operation started.
    Pending(Operation),
    /// An operation failed with a displayable message.
    Rejected { operation: Operation, error: String },
    /// Fetch-all fulfilled.
    DepartmentsLoaded(Vec<Department>),
    /// Fetch-one fulfilled.
    DepartmentLoaded(Department),
    DepartmentCreated(Department),
    DepartmentUpdated(Department),
    DepartmentDeleted(DepartmentId),
    ClearError,
    SetSelectedDepartment(Option<Department>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentState {
    pub departments: Vec<Department>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected_department: Option<Department>,
}

impl DepartmentState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Pending(_) => {
                self.loading = true;
                self.error = None;
            }
            Action::Rejected { error, .. } => {
                self.loading = false;
                self.error = Some(error);
            }
            Action::DepartmentsLoaded(departments) => {
                self.loading = false;
                self.departments = departments;
            }
            Action::DepartmentLoaded(department) => {
                self.loading = false;
                self.selected_department = Some(department);
            }
            Action::DepartmentCreated(department) => {
                self.loading = false;
                self.departments.push(department);
            }
            Action::DepartmentUpdated(mut department) => {
                self.loading = false;
                if let Some(slot) = self.departments.iter_mut().find(|d| d.id == department.id) {
                    // Update responses omit relations; keep the cached ones.
                    if department.students.is_none() {
                        department.students = slot.students.take();
                    }
                    if department.courses.is_none() {
                        department.courses = slot.courses.take();
                    }
                    *slot = department;
                }
            }
            Action::DepartmentDeleted(id) => {
                self.loading = false;
                self.departments.retain(|d| d.id != id);
            }
            Action::ClearError => self.error = None,
            Action::SetSelectedDepartment(department) => self.selected_department = department,
        }
    }

    pub fn find(&self, id: DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }
}
