//! Department admin page component.
//!
//! Holds the page's local UI state and turns user intents into store
//! thunks. Notices are produced by each intent and shown once, on the next
//! render.

use registrar_client::DepartmentStore;
use registrar_state::{DepartmentId, NewDepartment};
use tracing::debug;

pub const EMPTY_NAME: &str = "Please enter a department name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
    Warning,
}

/// A blocking message for the admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }
}

/// The row being edited and its pending name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct DepartmentPage {
    pub new_name: String,
    pub editing: Option<EditDraft>,
    pub expanded: Option<DepartmentId>,
    pub confirming_delete: Option<DepartmentId>,
    pub notice: Option<Notice>,
    pub mounted: bool,
}

impl DepartmentPage {
    /// Fetch departments the first time the page is shown.
    pub async fn mount(&mut self, store: &DepartmentStore) {
        if self.mounted {
            return;
        }
        // Failure lands in the store's error field.
        let _ = store.fetch_departments().await;
        self.mounted = true;
        debug!("department page mounted");
    }

    pub async fn add(&mut self, store: &DepartmentStore, name: String) {
        if name.trim().is_empty() {
            self.new_name = name;
            self.notice = Some(Notice::warning(EMPTY_NAME));
            return;
        }

        match store.create_department(NewDepartment { name: name.clone() }).await {
            Ok(_) => {
                self.new_name.clear();
                self.notice = Some(Notice::success("Department added successfully"));
            }
            Err(e) => {
                self.new_name = name;
                self.notice = Some(Notice::failure(format!("Failed to add department: {e}")));
            }
        }
    }

    /// Enter edit mode seeded with the record's current name.
    pub fn start_edit(&mut self, id: DepartmentId, current_name: &str) {
        self.editing = Some(EditDraft {
            id,
            name: current_name.to_string(),
        });
    }

    pub async fn save_edit(&mut self, store: &DepartmentStore, id: DepartmentId, name: String) {
        if name.trim().is_empty() {
            self.editing = Some(EditDraft { id, name });
            self.notice = Some(Notice::warning(EMPTY_NAME));
            return;
        }

        match store
            .update_department(id, NewDepartment { name: name.clone() })
            .await
        {
            Ok(_) => {
                self.editing = None;
                self.notice = Some(Notice::success("Department updated successfully"));
            }
            Err(e) => {
                self.editing = Some(EditDraft { id, name });
                self.notice = Some(Notice::failure(format!(
                    "Failed to update department: {e}"
                )));
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Expand a row, or collapse it if it is already expanded.
    pub fn toggle_expand(&mut self, id: DepartmentId) {
        self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
    }

    pub fn request_delete(&mut self, id: DepartmentId) {
        self.confirming_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = None;
    }

    /// Delete the department awaiting confirmation, if any.
    pub async fn confirm_delete(&mut self, store: &DepartmentStore) {
        let Some(id) = self.confirming_delete.take() else {
            return;
        };
        match store.delete_department(id).await {
            Ok(_) => {
                if self.expanded == Some(id) {
                    self.expanded = None;
                }
                self.notice = Some(Notice::success("Department deleted successfully"));
            }
            Err(e) => self.notice = Some(Notice::failure(e.to_string())),
        }
    }

    pub async fn retry(&mut self, store: &DepartmentStore) {
        let _ = store.fetch_departments().await;
    }

    pub async fn dismiss_error(&mut self, store: &DepartmentStore) {
        store.clear_error().await;
    }

    /// Hand the pending notice to the renderer exactly once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}
