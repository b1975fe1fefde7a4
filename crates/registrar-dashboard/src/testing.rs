//! In-memory department API for dashboard tests.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use registrar_client::{ClientError, ClientResult, DepartmentApi};
use registrar_state::{Department, DepartmentId, NewDepartment, Student};
use tokio::sync::Notify;

#[derive(Default)]
pub struct FakeApi {
    departments: Mutex<Vec<Department>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeApi {
    pub fn seeded(names: &[&str]) -> Self {
        let api = Self::default();
        for name in names {
            let id = api.allocate_id();
            api.departments.lock().unwrap().push(Department {
                id,
                name: name.to_string(),
                students: Some(Vec::new()),
                courses: Some(Vec::new()),
            });
        }
        api
    }

    /// Attach one student to the department with `id`.
    pub fn enroll(&self, id: DepartmentId, name: &str, email: &str) {
        let mut all = self.departments.lock().unwrap();
        let dept = all.iter_mut().find(|d| d.id == id).unwrap();
        let students = dept.students.get_or_insert_with(Vec::new);
        students.push(Student {
            id: students.len() as i64 + 1,
            name: name.to_string(),
            email: email.to_string(),
            dept_id: Some(id),
            enrollments: None,
        });
    }

    /// Number of API calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Park every list call until [`FakeApi::release_reads`].
    pub fn hold_reads(&self) {
        *self.read_gate.lock().unwrap() = Some(Arc::new(Notify::new()));
    }

    pub fn release_reads(&self) {
        if let Some(gate) = self.read_gate.lock().unwrap().take() {
            gate.notify_waiters();
        }
    }

    pub fn recover(&self) {
        self.fail_reads.store(false, Ordering::SeqCst);
        self.fail_writes.store(false, Ordering::SeqCst);
    }

    fn allocate_id(&self) -> DepartmentId {
        self.next_id.fetch_add(1, Ordering::SeqCst) as DepartmentId + 1
    }

    fn record_call(&self, write: bool, message: &'static str) -> ClientResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = if write {
            self.fail_writes.load(Ordering::SeqCst)
        } else {
            self.fail_reads.load(Ordering::SeqCst)
        };
        if failing {
            return Err(ClientError::Failed(message));
        }
        Ok(())
    }
}

#[async_trait]
impl DepartmentApi for FakeApi {
    async fn list_departments(&self) -> ClientResult<Vec<Department>> {
        self.record_call(false, "failed to fetch departments")?;
        let gate = self.read_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.departments.lock().unwrap().clone())
    }

    async fn get_department(&self, id: DepartmentId) -> ClientResult<Department> {
        self.record_call(false, "failed to fetch department")?;
        self.departments
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(ClientError::Failed("failed to fetch department"))
    }

    async fn create_department(&self, draft: &NewDepartment) -> ClientResult<Department> {
        self.record_call(true, "failed to create department")?;
        let created = Department {
            id: self.allocate_id(),
            name: draft.name.clone(),
            students: None,
            courses: None,
        };
        self.departments.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_department(
        &self,
        id: DepartmentId,
        draft: &NewDepartment,
    ) -> ClientResult<Department> {
        self.record_call(true, "failed to update department")?;
        let mut all = self.departments.lock().unwrap();
        let dept = all
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(ClientError::Failed("failed to update department"))?;
        dept.name = draft.name.clone();
        Ok(Department {
            id,
            name: dept.name.clone(),
            students: None,
            courses: None,
        })
    }

    async fn delete_department(&self, id: DepartmentId) -> ClientResult<()> {
        self.record_call(true, "failed to delete department")?;
        let mut all = self.departments.lock().unwrap();
        let before = all.len();
        all.retain(|d| d.id != id);
        if all.len() == before {
            return Err(ClientError::Failed("failed to delete department"));
        }
        Ok(())
    }
}
