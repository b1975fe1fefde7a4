//! HTTP client for the registrar REST API.
//!
//! `RegistrarClient` hands out a typed [`Resource`] per collection. Any
//! non-success status becomes [`ClientError::Failed`] with a fixed
//! per-action message.

use std::marker::PhantomData;

use async_trait::async_trait;
use registrar_state::{
    Course, Department, DepartmentId, Enrollment, NewCourse, NewDepartment, NewEnrollment,
    NewStudent, Student,
};
use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Failure messages for one collection, one per action.
#[derive(Debug)]
pub struct Messages {
    pub fetch_all: &'static str,
    pub fetch_one: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// Static description of a REST collection.
#[derive(Debug)]
pub struct Collection {
    pub path: &'static str,
    /// Key under which older servers wrapped a created record.
    pub created_key: &'static str,
    pub messages: Messages,
}

pub const DEPARTMENTS: Collection = Collection {
    path: "/departments",
    created_key: "newDepartment",
    messages: Messages {
        fetch_all: "failed to fetch departments",
        fetch_one: "failed to fetch department",
        create: "failed to create department",
        update: "failed to update department",
        delete: "failed to delete department",
    },
};

pub const STUDENTS: Collection = Collection {
    path: "/students",
    created_key: "newStudent",
    messages: Messages {
        fetch_all: "failed to fetch students",
        fetch_one: "failed to fetch student",
        create: "failed to create student",
        update: "failed to update student",
        delete: "failed to delete student",
    },
};

pub const COURSES: Collection = Collection {
    path: "/courses",
    created_key: "newCourse",
    messages: Messages {
        fetch_all: "failed to fetch courses",
        fetch_one: "failed to fetch course",
        create: "failed to create course",
        update: "failed to update course",
        delete: "failed to delete course",
    },
};

pub const ENROLLMENTS: Collection = Collection {
    path: "/enrollments",
    created_key: "newEnrollment",
    messages: Messages {
        fetch_all: "failed to fetch enrollments",
        fetch_one: "failed to fetch enrollment",
        create: "failed to create enrollment",
        update: "failed to update enrollment",
        delete: "failed to delete enrollment",
    },
};

/// Client for the registrar REST API.
#[derive(Clone)]
pub struct RegistrarClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RegistrarClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Build a client from `REGISTRAR_API_URL`.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn departments(&self) -> Resource<'_, Department, NewDepartment> {
        Resource::new(self, &DEPARTMENTS)
    }

    pub fn students(&self) -> Resource<'_, Student, NewStudent> {
        Resource::new(self, &STUDENTS)
    }

    pub fn courses(&self) -> Resource<'_, Course, NewCourse> {
        Resource::new(self, &COURSES)
    }

    pub fn enrollments(&self) -> Resource<'_, Enrollment, NewEnrollment> {
        Resource::new(self, &ENROLLMENTS)
    }
}

/// Typed CRUD client for one collection.
pub struct Resource<'a, T, D> {
    client: &'a RegistrarClient,
    collection: &'static Collection,
    _types: PhantomData<fn() -> (T, D)>,
}

impl<'a, T, D> Resource<'a, T, D>
where
    T: DeserializeOwned,
    D: Serialize + Sync,
{
    fn new(client: &'a RegistrarClient, collection: &'static Collection) -> Self {
        Self {
            client,
            collection,
            _types: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        self.client.config.url(self.collection.path)
    }

    fn item_url(&self, id: i64) -> String {
        self.client
            .config
            .url(&format!("{}/{id}", self.collection.path))
    }

    pub async fn list(&self) -> ClientResult<Vec<T>> {
        let resp = self.client.http.get(self.collection_url()).send().await?;
        let resp = ensure_success(resp, self.collection.messages.fetch_all)?;
        decode(resp).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<T> {
        let resp = self.client.http.get(self.item_url(id)).send().await?;
        let resp = ensure_success(resp, self.collection.messages.fetch_one)?;
        decode(resp).await
    }

    /// Create a record. Accepts the bare record or the record wrapped under
    /// the collection's `created_key`.
    pub async fn create(&self, draft: &D) -> ClientResult<T> {
        let resp = self
            .client
            .http
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        let resp = ensure_success(resp, self.collection.messages.create)?;
        let mut body: serde_json::Value = decode(resp).await?;
        if let Some(inner) = body.get_mut(self.collection.created_key) {
            body = inner.take();
        }
        Ok(serde_json::from_value(body)?)
    }

    pub async fn update(&self, id: i64, draft: &D) -> ClientResult<T> {
        let resp = self
            .client
            .http
            .put(self.item_url(id))
            .json(draft)
            .send()
            .await?;
        let resp = ensure_success(resp, self.collection.messages.update)?;
        decode(resp).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let resp = self.client.http.delete(self.item_url(id)).send().await?;
        ensure_success(resp, self.collection.messages.delete)?;
        debug!(path = self.collection.path, id, "record deleted");
        Ok(())
    }
}

fn ensure_success(resp: Response, message: &'static str) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        warn!(%status, url = %resp.url(), "{message}");
        Err(ClientError::Failed(message))
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Department operations the state slice depends on.
#[async_trait]
pub trait DepartmentApi: Send + Sync {
    async fn list_departments(&self) -> ClientResult<Vec<Department>>;

    async fn get_department(&self, id: DepartmentId) -> ClientResult<Department>;

    async fn create_department(&self, draft: &NewDepartment) -> ClientResult<Department>;

    async fn update_department(
        &self,
        id: DepartmentId,
        draft: &NewDepartment,
    ) -> ClientResult<Department>;

    async fn delete_department(&self, id: DepartmentId) -> ClientResult<()>;
}

#[async_trait]
impl DepartmentApi for RegistrarClient {
    async fn list_departments(&self) -> ClientResult<Vec<Department>> {
        self.departments().list().await
    }

    async fn get_department(&self, id: DepartmentId) -> ClientResult<Department> {
        self.departments().get(id).await
    }

    async fn create_department(&self, draft: &NewDepartment) -> ClientResult<Department> {
        self.departments().create(draft).await
    }

    async fn update_department(
        &self,
        id: DepartmentId,
        draft: &NewDepartment,
    ) -> ClientResult<Department> {
        self.departments().update(id, draft).await
    }

    async fn delete_department(&self, id: DepartmentId) -> ClientResult<()> {
        self.departments().delete(id).await
    }
}
