//! Repository contracts and their SQLite implementations.
//!
//! One repository per entity, each exposing the same five operations.
//! Parent records come back with their direct children loaded (departments
//! with students and courses, students and courses with enrollments);
//! create and update return the bare row.

use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use crate::types::*;

/// CRUD contract shared by every entity.
pub trait Repository {
    /// Stored record, including server-assigned id.
    type Record;
    /// Writable fields used for create and full-field update.
    type Draft;

    /// All records in insertion order, with relations loaded.
    fn list(&self) -> StoreResult<Vec<Self::Record>>;

    /// One record with relations loaded, `None` if absent.
    fn get(&self, id: i64) -> StoreResult<Option<Self::Record>>;

    /// Insert a record and return it with its new id.
    fn create(&self, draft: &Self::Draft) -> StoreResult<Self::Record>;

    /// Overwrite every writable field of `id`.
    fn update(&self, id: i64, draft: &Self::Draft) -> StoreResult<Self::Record>;

    /// Remove `id`.
    fn delete(&self, id: i64) -> StoreResult<()>;
}

const STUDENT_COLUMNS: &str = "id, name, email, dept_id";
const COURSE_COLUMNS: &str = "id, title, credits, dept_id";
const ENROLLMENT_COLUMNS: &str = "id, student_id, course_id, grade";

fn student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        dept_id: row.get(3)?,
        enrollments: None,
    })
}

fn course_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        title: row.get(1)?,
        credits: row.get(2)?,
        dept_id: row.get(3)?,
        enrollments: None,
    })
}

fn enrollment_row(row: &Row<'_>) -> rusqlite::Result<Enrollment> {
    Ok(Enrollment {
        id: row.get(0)?,
        student_id: row.get(1)?,
        course_id: row.get(2)?,
        grade: row.get(3)?,
    })
}

/// Run a parameterless query and collect every mapped row.
fn query_all<T>(
    conn: &Connection,
    sql: &str,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> StoreResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map)?.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Enrollments matching one student or course id.
fn enrollments_by(
    conn: &Connection,
    sql: &str,
    id: i64,
) -> StoreResult<Vec<Enrollment>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![id], enrollment_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Fail with `NotFound` when a mutation touched no row.
fn ensure_changed(changed: usize, entity: &'static str, id: i64) -> StoreResult<()> {
    if changed == 0 {
        return Err(StoreError::NotFound { entity, id });
    }
    Ok(())
}

// ── Departments ────────────────────────────────────────────────────

/// Departments, loaded with their students and courses.
#[derive(Clone)]
pub struct DepartmentRepo {
    store: Store,
}

impl DepartmentRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl Repository for DepartmentRepo {
    type Record = Department;
    type Draft = NewDepartment;

    fn list(&self) -> StoreResult<Vec<Department>> {
        self.store.with_conn(|conn| {
            let students = query_all(
                conn,
                &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE dept_id IS NOT NULL ORDER BY id"),
                student_row,
            )?;
            let courses = query_all(
                conn,
                &format!("SELECT {COURSE_COLUMNS} FROM courses WHERE dept_id IS NOT NULL ORDER BY id"),
                course_row,
            )?;

            let mut students_by_dept: HashMap<DepartmentId, Vec<Student>> = HashMap::new();
            for s in students {
                if let Some(dept_id) = s.dept_id {
                    students_by_dept.entry(dept_id).or_default().push(s);
                }
            }
            let mut courses_by_dept: HashMap<DepartmentId, Vec<Course>> = HashMap::new();
            for c in courses {
                if let Some(dept_id) = c.dept_id {
                    courses_by_dept.entry(dept_id).or_default().push(c);
                }
            }

            let mut stmt = conn.prepare("SELECT id, name FROM departments ORDER BY id")?;
            let departments = stmt
                .query_map([], |row| {
                    let id: DepartmentId = row.get(0)?;
                    Ok(Department {
                        id,
                        name: row.get(1)?,
                        students: Some(students_by_dept.remove(&id).unwrap_or_default()),
                        courses: Some(courses_by_dept.remove(&id).unwrap_or_default()),
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(departments)
        })
    }

    fn get(&self, id: DepartmentId) -> StoreResult<Option<Department>> {
        self.store.with_conn(|conn| {
            let name: Option<String> = conn
                .query_row(
                    "SELECT name FROM departments WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(name) = name else {
                return Ok(None);
            };

            let mut stmt = conn.prepare(&format!(
                "SELECT {STUDENT_COLUMNS} FROM students WHERE dept_id = ?1 ORDER BY id"
            ))?;
            let students = stmt
                .query_map(params![id], student_row)?
                .collect::<Result<Vec<_>, _>>()?;

            let mut stmt = conn.prepare(&format!(
                "SELECT {COURSE_COLUMNS} FROM courses WHERE dept_id = ?1 ORDER BY id"
            ))?;
            let courses = stmt
                .query_map(params![id], course_row)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(Department {
                id,
                name,
                students: Some(students),
                courses: Some(courses),
            }))
        })
    }

    fn create(&self, draft: &NewDepartment) -> StoreResult<Department> {
        self.store.with_conn(|conn| {
            conn.execute("INSERT INTO departments (name) VALUES (?1)", params![draft.name])?;
            let id = conn.last_insert_rowid();
            debug!(id, "department created");
            Ok(Department {
                id,
                name: draft.name.clone(),
                students: None,
                courses: None,
            })
        })
    }

    fn update(&self, id: DepartmentId, draft: &NewDepartment) -> StoreResult<Department> {
        self.store.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE departments SET name = ?1 WHERE id = ?2",
                params![draft.name, id],
            )?;
            ensure_changed(changed, "department", id)?;
            debug!(id, "department updated");
            Ok(Department {
                id,
                name: draft.name.clone(),
                students: None,
                courses: None,
            })
        })
    }

    fn delete(&self, id: DepartmentId) -> StoreResult<()> {
        self.store.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM departments WHERE id = ?1", params![id])?;
            ensure_changed(changed, "department", id)?;
            debug!(id, "department deleted");
            Ok(())
        })
    }
}

// ── Students ───────────────────────────────────────────────────────

/// Students, loaded with their enrollments.
#[derive(Clone)]
pub struct StudentRepo {
    store: Store,
}

impl StudentRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl Repository for StudentRepo {
    type Record = Student;
    type Draft = NewStudent;

    fn list(&self) -> StoreResult<Vec<Student>> {
        self.store.with_conn(|conn| {
            let mut by_student: HashMap<StudentId, Vec<Enrollment>> = HashMap::new();
            for e in query_all(
                conn,
                &format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments ORDER BY id"),
                enrollment_row,
            )? {
                by_student.entry(e.student_id).or_default().push(e);
            }

            let mut students = query_all(
                conn,
                &format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"),
                student_row,
            )?;
            for s in &mut students {
                s.enrollments = Some(by_student.remove(&s.id).unwrap_or_default());
            }
            Ok(students)
        })
    }

    fn get(&self, id: StudentId) -> StoreResult<Option<Student>> {
        self.store.with_conn(|conn| {
            let student = conn
                .query_row(
                    &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
                    params![id],
                    student_row,
                )
                .optional()?;
            let Some(mut student) = student else {
                return Ok(None);
            };
            student.enrollments = Some(enrollments_by(
                conn,
                &format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = ?1 ORDER BY id"),
                id,
            )?);
            Ok(Some(student))
        })
    }

    fn create(&self, draft: &NewStudent) -> StoreResult<Student> {
        self.store.with_conn(|conn| {
            conn.execute(
                "INSERT INTO students (name, email, dept_id) VALUES (?1, ?2, ?3)",
                params![draft.name, draft.email, draft.dept_id],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, "student created");
            Ok(Student {
                id,
                name: draft.name.clone(),
                email: draft.email.clone(),
                dept_id: draft.dept_id,
                enrollments: None,
            })
        })
    }

    fn update(&self, id: StudentId, draft: &NewStudent) -> StoreResult<Student> {
        self.store.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE students SET name = ?1, email = ?2, dept_id = ?3 WHERE id = ?4",
                params![draft.name, draft.email, draft.dept_id, id],
            )?;
            ensure_changed(changed, "student", id)?;
            debug!(id, "student updated");
            Ok(Student {
                id,
                name: draft.name.clone(),
                email: draft.email.clone(),
                dept_id: draft.dept_id,
                enrollments: None,
            })
        })
    }

    fn delete(&self, id: StudentId) -> StoreResult<()> {
        self.store.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM students WHERE id = ?1", params![id])?;
            ensure_changed(changed, "student", id)?;
            debug!(id, "student deleted");
            Ok(())
        })
    }
}

// ── Courses ────────────────────────────────────────────────────────

/// Courses, loaded with their enrollments.
#[derive(Clone)]
pub struct CourseRepo {
    store: Store,
}

impl CourseRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl Repository for CourseRepo {
    type Record = Course;
    type Draft = NewCourse;

    fn list(&self) -> StoreResult<Vec<Course>> {
        self.store.with_conn(|conn| {
            let mut by_course: HashMap<CourseId, Vec<Enrollment>> = HashMap::new();
            for e in query_all(
                conn,
                &format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments ORDER BY id"),
                enrollment_row,
            )? {
                by_course.entry(e.course_id).or_default().push(e);
            }

            let mut courses = query_all(
                conn,
                &format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY id"),
                course_row,
            )?;
            for c in &mut courses {
                c.enrollments = Some(by_course.remove(&c.id).unwrap_or_default());
            }
            Ok(courses)
        })
    }

    fn get(&self, id: CourseId) -> StoreResult<Option<Course>> {
        self.store.with_conn(|conn| {
            let course = conn
                .query_row(
                    &format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?1"),
                    params![id],
                    course_row,
                )
                .optional()?;
            let Some(mut course) = course else {
                return Ok(None);
            };
            course.enrollments = Some(enrollments_by(
                conn,
                &format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE course_id = ?1 ORDER BY id"),
                id,
            )?);
            Ok(Some(course))
        })
    }

    fn create(&self, draft: &NewCourse) -> StoreResult<Course> {
        self.store.with_conn(|conn| {
            conn.execute(
                "INSERT INTO courses (title, credits, dept_id) VALUES (?1, ?2, ?3)",
                params![draft.title, draft.credits, draft.dept_id],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, "course created");
            Ok(Course {
                id,
                title: draft.title.clone(),
                credits: draft.credits,
                dept_id: draft.dept_id,
                enrollments: None,
            })
        })
    }

    fn update(&self, id: CourseId, draft: &NewCourse) -> StoreResult<Course> {
        self.store.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE courses SET title = ?1, credits = ?2, dept_id = ?3 WHERE id = ?4",
                params![draft.title, draft.credits, draft.dept_id, id],
            )?;
            ensure_changed(changed, "course", id)?;
            debug!(id, "course updated");
            Ok(Course {
                id,
                title: draft.title.clone(),
                credits: draft.credits,
                dept_id: draft.dept_id,
                enrollments: None,
            })
        })
    }

    fn delete(&self, id: CourseId) -> StoreResult<()> {
        self.store.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM courses WHERE id = ?1", params![id])?;
            ensure_changed(changed, "course", id)?;
            debug!(id, "course deleted");
            Ok(())
        })
    }
}

// ── Enrollments ────────────────────────────────────────────────────

/// Enrollments; no relations are loaded.
#[derive(Clone)]
pub struct EnrollmentRepo {
    store: Store,
}

impl EnrollmentRepo {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl Repository for EnrollmentRepo {
    type Record = Enrollment;
    type Draft = NewEnrollment;

    fn list(&self) -> StoreResult<Vec<Enrollment>> {
        self.store.with_conn(|conn| {
            query_all(
                conn,
                &format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments ORDER BY id"),
                enrollment_row,
            )
        })
    }

    fn get(&self, id: EnrollmentId) -> StoreResult<Option<Enrollment>> {
        self.store.with_conn(|conn| {
            let enrollment = conn
                .query_row(
                    &format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = ?1"),
                    params![id],
                    enrollment_row,
                )
                .optional()?;
            Ok(enrollment)
        })
    }

    fn create(&self, draft: &NewEnrollment) -> StoreResult<Enrollment> {
        self.store.with_conn(|conn| {
            conn.execute(
                "INSERT INTO enrollments (student_id, course_id, grade) VALUES (?1, ?2, ?3)",
                params![draft.student_id, draft.course_id, draft.grade],
            )?;
            let id = conn.last_insert_rowid();
            debug!(id, "enrollment created");
            Ok(Enrollment {
                id,
                student_id: draft.student_id,
                course_id: draft.course_id,
                grade: draft.grade.clone(),
            })
        })
    }

    fn update(&self, id: EnrollmentId, draft: &NewEnrollment) -> StoreResult<Enrollment> {
        self.store.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE enrollments SET student_id = ?1, course_id = ?2, grade = ?3 WHERE id = ?4",
                params![draft.student_id, draft.course_id, draft.grade, id],
            )?;
            ensure_changed(changed, "enrollment", id)?;
            debug!(id, "enrollment updated");
            Ok(Enrollment {
                id,
                student_id: draft.student_id,
                course_id: draft.course_id,
                grade: draft.grade.clone(),
            })
        })
    }

    fn delete(&self, id: EnrollmentId) -> StoreResult<()> {
        self.store.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM enrollments WHERE id = ?1", params![id])?;
            ensure_changed(changed, "enrollment", id)?;
            debug!(id, "enrollment deleted");
            Ok(())
        })
    }
}
