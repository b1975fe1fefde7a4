//! Owned container for the department slice.
//!
//! Thunks dispatch `Pending`, then await the API on a spawned task without
//! holding the state lock. That task dispatches the fulfilled or rejected
//! action and hands the outcome back to the caller. Concurrent operations
//! are not coordinated; results apply in arrival order.

use std::future::Future;
use std::sync::Arc;

use registrar_state::{Department, DepartmentId, NewDepartment};
use tokio::sync::RwLock;
use tracing::warn;

use crate::api::DepartmentApi;
use crate::error::{ClientError, ClientResult};
use crate::slice::{Action, DepartmentState, Operation};

#[derive(Clone)]
pub struct DepartmentStore {
    state: Arc<RwLock<DepartmentState>>,
    api: Arc<dyn DepartmentApi>,
}

impl DepartmentStore {
    pub fn new(api: Arc<dyn DepartmentApi>) -> Self {
        Self {
            state: Arc::new(RwLock::new(DepartmentState::default())),
            api,
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> DepartmentState {
        self.state.read().await.clone()
    }

    pub async fn dispatch(&self, action: Action) {
        self.state.write().await.reduce(action);
    }

    /// Start `operation` and run it to completion on its own task.
    ///
    /// The API call and the outcome dispatch always run together, so the
    /// slice settles even if the caller's future is dropped mid-flight.
    async fn run<T, F, Fut, A>(&self, operation: Operation, call: F, fulfilled: A) -> ClientResult<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn DepartmentApi>) -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
        A: FnOnce(&T) -> Action + Send + 'static,
    {
        self.dispatch(Action::Pending(operation)).await;

        let call = call(self.api.clone());
        let store = self.clone();
        let task = tokio::spawn(async move {
            let result = call.await;
            store.settle(operation, result, fulfilled).await
        });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                warn!(?operation, error = %e, "department operation task failed");
                Err(ClientError::Join(e.to_string()))
            }
        }
    }

    async fn settle<T>(
        &self,
        operation: Operation,
        result: ClientResult<T>,
        fulfilled: impl FnOnce(&T) -> Action,
    ) -> ClientResult<T> {
        match result {
            Ok(value) => {
                self.dispatch(fulfilled(&value)).await;
                Ok(value)
            }
            Err(e) => {
                warn!(?operation, error = %e, "department operation rejected");
                self.dispatch(Action::Rejected {
                    operation,
                    error: e.to_string(),
                })
                .await;
                Err(e)
            }
        }
    }

    pub async fn fetch_departments(&self) -> ClientResult<Vec<Department>> {
        self.run(
            Operation::FetchAll,
            |api| async move { api.list_departments().await },
            |list| Action::DepartmentsLoaded(list.clone()),
        )
        .await
    }

    pub async fn fetch_department_by_id(&self, id: DepartmentId) -> ClientResult<Department> {
        self.run(
            Operation::FetchOne,
            move |api| async move { api.get_department(id).await },
            |d| Action::DepartmentLoaded(d.clone()),
        )
        .await
    }

    pub async fn create_department(&self, draft: NewDepartment) -> ClientResult<Department> {
        self.run(
            Operation::Create,
            move |api| async move { api.create_department(&draft).await },
            |d| Action::DepartmentCreated(d.clone()),
        )
        .await
    }

    pub async fn update_department(
        &self,
        id: DepartmentId,
        draft: NewDepartment,
    ) -> ClientResult<Department> {
        self.run(
            Operation::Update,
            move |api| async move { api.update_department(id, &draft).await },
            |d| Action::DepartmentUpdated(d.clone()),
        )
        .await
    }

    /// Delete a department, returning the removed id.
    pub async fn delete_department(&self, id: DepartmentId) -> ClientResult<DepartmentId> {
        self.run(
            Operation::Delete,
            move |api| async move { api.delete_department(id).await.map(|()| id) },
            |id| Action::DepartmentDeleted(*id),
        )
        .await
    }

    pub async fn clear_error(&self) {
        self.dispatch(Action::ClearError).await;
    }

    pub async fn set_selected_department(&self, department: Option<Department>) {
        self.dispatch(Action::SetSelectedDepartment(department)).await;
    }
}
