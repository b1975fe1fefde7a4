//! Domain types for the registrar store.
//!
//! Records carry a server-assigned `id` plus their writable fields; relation
//! arrays are `Some` only when the repository loaded them. Drafts hold the
//! writable fields alone and are used for both create and full-field update.
//! All types serialize with camelCase field names (`deptId`, `studentId`).

use serde::{Deserialize, Serialize};

/// Unique identifier for a department.
pub type DepartmentId = i64;

/// Unique identifier for a student.
pub type StudentId = i64;

/// Unique identifier for a course.
pub type CourseId = i64;

/// Unique identifier for an enrollment.
pub type EnrollmentId = i64;

// ── Department ─────────────────────────────────────────────────────

/// An academic department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    /// Students whose `deptId` points here (loaded by list/get only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<Student>>,
    /// Courses whose `deptId` points here (loaded by list/get only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
}

/// Writable fields of a department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub name: String,
}

// ── Student ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub dept_id: Option<DepartmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollments: Option<Vec<Enrollment>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub dept_id: Option<DepartmentId>,
}

// ── Course ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    /// Credit hours.
    pub credits: i64,
    #[serde(default)]
    pub dept_id: Option<DepartmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollments: Option<Vec<Enrollment>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub credits: i64,
    #[serde(default)]
    pub dept_id: Option<DepartmentId>,
}

// ── Enrollment ─────────────────────────────────────────────────────

/// A student's registration in a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Free-form grade ("A", "B+", ...); absent until graded.
    #[serde(default)]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
    #[serde(default)]
    pub grade: Option<String>,
}

impl Department {
    /// Number of loaded students, zero when relations were not loaded.
    pub fn student_count(&self) -> usize {
        self.students.as_ref().map_or(0, Vec::len)
    }

    /// Number of loaded courses, zero when relations were not loaded.
    pub fn course_count(&self) -> usize {
        self.courses.as_ref().map_or(0, Vec::len)
    }
}
