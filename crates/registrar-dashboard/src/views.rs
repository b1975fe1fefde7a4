//! View types for dashboard template rendering.
//!
//! These types are purpose-built for Askama templates: they carry
//! pre-formatted strings and computed fields so templates stay simple.

use registrar_client::DepartmentState;
use registrar_state::{Department, DepartmentId};

use crate::page::{DepartmentPage, Notice, NoticeKind};

// ── Notice ──────────────────────────────────────────────────────

pub struct NoticeView {
    pub message: String,
    pub class: &'static str,
}

impl NoticeView {
    pub fn from_notice(notice: &Notice) -> Self {
        let class = match notice.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Failure => "notice notice-failure",
            NoticeKind::Warning => "notice notice-warning",
        };
        Self {
            message: notice.message.clone(),
            class,
        }
    }
}

// ── Department Row ──────────────────────────────────────────────

pub struct StudentLine {
    pub name: String,
    pub email: String,
}

pub struct CourseLine {
    pub title: String,
    pub credits: i64,
}

pub struct DepartmentRow {
    pub id: DepartmentId,
    pub name: String,
    pub student_count: usize,
    pub course_count: usize,
    pub expanded: bool,
    pub editing: bool,
    /// Pending name while `editing`.
    pub edit_name: String,
    pub confirming_delete: bool,
    pub students: Vec<StudentLine>,
    pub courses: Vec<CourseLine>,
}

impl DepartmentRow {
    pub fn from_department(dept: &Department, page: &DepartmentPage) -> Self {
        let edit = page.editing.as_ref().filter(|e| e.id == dept.id);
        let expanded = page.expanded == Some(dept.id);

        let (students, courses) = if expanded {
            (
                dept.students
                    .iter()
                    .flatten()
                    .map(|s| StudentLine {
                        name: s.name.clone(),
                        email: s.email.clone(),
                    })
                    .collect(),
                dept.courses
                    .iter()
                    .flatten()
                    .map(|c| CourseLine {
                        title: c.title.clone(),
                        credits: c.credits,
                    })
                    .collect(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            id: dept.id,
            name: dept.name.clone(),
            student_count: dept.student_count(),
            course_count: dept.course_count(),
            expanded,
            editing: edit.is_some(),
            edit_name: edit.map(|e| e.name.clone()).unwrap_or_default(),
            confirming_delete: page.confirming_delete == Some(dept.id),
            students,
            courses,
        }
    }
}

// ── Page ────────────────────────────────────────────────────────

/// Which of the three page layouts to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Loading,
    Error,
    Normal,
}

pub struct DepartmentPageView {
    pub mode: RenderMode,
    pub error_message: String,
    pub total: usize,
    pub rows: Vec<DepartmentRow>,
    pub new_name: String,
    pub notice: Option<NoticeView>,
}

impl DepartmentPageView {
    pub fn build(state: &DepartmentState, page: &DepartmentPage, notice: Option<&Notice>) -> Self {
        let mode = if state.loading {
            RenderMode::Loading
        } else if state.error.is_some() {
            RenderMode::Error
        } else {
            RenderMode::Normal
        };

        Self {
            mode,
            error_message: state.error.clone().unwrap_or_default(),
            total: state.departments.len(),
            rows: state
                .departments
                .iter()
                .map(|d| DepartmentRow::from_department(d, page))
                .collect(),
            new_name: page.new_name.clone(),
            notice: notice.map(NoticeView::from_notice),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.mode == RenderMode::Loading
    }

    pub fn is_error(&self) -> bool {
        self.mode == RenderMode::Error
    }

    pub fn has_notice(&self) -> bool {
        self.notice.is_some()
    }

    pub fn notice_message(&self) -> &str {
        self.notice.as_ref().map_or("", |n| n.message.as_str())
    }

    pub fn notice_class(&self) -> &str {
        self.notice.as_ref().map_or("", |n| n.class)
    }

    pub fn has_confirmation(&self) -> bool {
        self.rows.iter().any(|r| r.confirming_delete)
    }

    /// Name of the department awaiting delete confirmation.
    pub fn confirming_name(&self) -> &str {
        self.rows
            .iter()
            .find(|r| r.confirming_delete)
            .map_or("", |r| r.name.as_str())
    }
}
