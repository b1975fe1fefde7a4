//! REST API handlers.
//!
//! One generic controller serves every resource. Each handler performs a
//! single repository call and maps its outcome to a status code; store
//! failures collapse to the resource's fixed 500 message.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use registrar_state::Repository;

use crate::ApiState;
use crate::error::ApiError;
use crate::resources::{DATABASE_UNAVAILABLE, Resource};

type RecordOf<R> = <<R as Resource>::Repo as Repository>::Record;
type DraftOf<R> = <<R as Resource>::Repo as Repository>::Draft;

/// Parse a path id, rejecting anything that is not an integer.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::bad_request("invalid id"))
}

/// GET /{resource}
pub async fn list<R: Resource>(
    State(state): State<ApiState>,
) -> Result<Json<Vec<RecordOf<R>>>, ApiError> {
    R::repo(&state.store)
        .list()
        .map(Json)
        .map_err(|e| ApiError::internal(DATABASE_UNAVAILABLE, e))
}

/// GET /{resource}/{id}
pub async fn get_one<R: Resource>(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<RecordOf<R>>, ApiError> {
    let id = parse_id(&id)?;
    match R::repo(&state.store).get(id) {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(ApiError::not_found(R::MESSAGES.not_found)),
        Err(e) => Err(ApiError::internal(DATABASE_UNAVAILABLE, e)),
    }
}

/// POST /{resource}
pub async fn create<R: Resource>(
    State(state): State<ApiState>,
    Json(draft): Json<DraftOf<R>>,
) -> Result<(StatusCode, Json<RecordOf<R>>), ApiError> {
    R::repo(&state.store)
        .create(&draft)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(|e| ApiError::internal(R::MESSAGES.create, e))
}

/// PUT /{resource}/{id}
pub async fn update<R: Resource>(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(draft): Json<DraftOf<R>>,
) -> Result<Json<RecordOf<R>>, ApiError> {
    let id = parse_id(&id)?;
    R::repo(&state.store)
        .update(id, &draft)
        .map(Json)
        .map_err(|e| ApiError::internal(R::MESSAGES.update, e))
}

/// DELETE /{resource}/{id}
pub async fn delete<R: Resource>(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    R::repo(&state.store)
        .delete(id)
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| ApiError::internal(R::MESSAGES.delete, e))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Courses, Departments, Enrollments, Students};
    use registrar_state::*;

    fn test_state() -> ApiState {
        let store = Store::open_in_memory().unwrap();
        ApiState { store }
    }

    fn dept(name: &str) -> NewDepartment {
        NewDepartment {
            name: name.to_string(),
        }
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("abc").unwrap_err().status, StatusCode::BAD_REQUEST);
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("").is_err());
    }

    #[tokio::test]
    async fn list_departments_empty() {
        let state = test_state();
        let Json(all) = list::<Departments>(State(state)).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn create_and_get_department() {
        let state = test_state();

        let (status, Json(created)) =
            create::<Departments>(State(state.clone()), Json(dept("Engineering")))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.name, "Engineering");

        let Json(fetched) = get_one::<Departments>(State(state), Path(created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.students, Some(Vec::new()));
    }

    #[tokio::test]
    async fn get_nonexistent_department() {
        let state = test_state();
        let err = get_one::<Departments>(State(state), Path("99".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Department not found");
    }

    #[tokio::test]
    async fn get_with_invalid_id() {
        let state = test_state();
        let err = get_one::<Students>(State(state), Path("abc".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_department() {
        let state = test_state();
        let created = state.store.departments().create(&dept("Art")).unwrap();

        let Json(updated) = update::<Departments>(
            State(state.clone()),
            Path(created.id.to_string()),
            Json(dept("Fine Art")),
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Fine Art");
    }

    #[tokio::test]
    async fn update_missing_is_server_error() {
        let state = test_state();
        let err = update::<Departments>(State(state), Path("3".to_string()), Json(dept("Ghost")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to update Department");
    }

    #[tokio::test]
    async fn delete_department_exists() {
        let state = test_state();
        let created = state.store.departments().create(&dept("Law")).unwrap();

        let status = delete::<Departments>(State(state.clone()), Path(created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.departments().get(created.id).unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_nonexistent_department() {
        let state = test_state();
        let err = delete::<Departments>(State(state), Path("3".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to delete Department");
    }

    #[tokio::test]
    async fn create_course_with_dangling_department_fails() {
        let state = test_state();
        let draft = NewCourse {
            title: "Optics".to_string(),
            credits: 4,
            dept_id: Some(77),
        };
        let err = create::<Courses>(State(state), Json(draft)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to create Course");
    }

    #[tokio::test]
    async fn student_with_enrollment_cannot_be_deleted() {
        let state = test_state();
        let student = state
            .store
            .students()
            .create(&NewStudent {
                name: "Amal".to_string(),
                email: "amal@example.edu".to_string(),
                dept_id: None,
            })
            .unwrap();
        let course = state
            .store
            .courses()
            .create(&NewCourse {
                title: "Compilers".to_string(),
                credits: 3,
                dept_id: None,
            })
            .unwrap();
        let (status, _) = create::<Enrollments>(
            State(state.clone()),
            Json(NewEnrollment {
                student_id: student.id,
                course_id: course.id,
                grade: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = delete::<Students>(State(state.clone()), Path(student.id.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Failed to delete Student");
        assert!(state.store.students().get(student.id).unwrap().is_some());
    }

    #[tokio::test]
    async fn unreadable_store_is_database_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrar.db");
        let state = ApiState {
            store: Store::open(&path).unwrap(),
        };
        state.store.departments().create(&dept("Art")).unwrap();

        // Remove the table behind the store's back.
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("DROP TABLE departments").unwrap();
        drop(conn);

        let err = list::<Departments>(State(state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to connect to database");

        let err = get_one::<Departments>(State(state), Path("1".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to connect to database");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let resp = health().await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
