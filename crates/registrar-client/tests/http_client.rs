//! Client tests against a live API server on an ephemeral port.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::routing::post;
use registrar_client::{ClientConfig, ClientError, DepartmentStore, RegistrarClient};
use registrar_state::{NewCourse, NewDepartment, NewEnrollment, NewStudent, Store};
use tokio::net::TcpListener;

async fn serve(router: Router) -> RegistrarClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    RegistrarClient::new(ClientConfig::new(format!("http://{addr}")))
}

async fn live_client() -> RegistrarClient {
    let store = Store::open_in_memory().unwrap();
    serve(registrar_api::build_router(store)).await
}

fn dept(name: &str) -> NewDepartment {
    NewDepartment {
        name: name.to_string(),
    }
}

#[tokio::test]
async fn department_lifecycle() {
    let client = live_client().await;
    let departments = client.departments();

    assert!(departments.list().await.unwrap().is_empty());

    let created = departments.create(&dept("Engineering")).await.unwrap();
    assert_eq!(created.name, "Engineering");

    let all = departments.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, created.id);

    let updated = departments.update(created.id, &dept("Civil Engineering")).await.unwrap();
    assert_eq!(updated.name, "Civil Engineering");

    let fetched = departments.get(created.id).await.unwrap();
    assert_eq!(fetched.name, "Civil Engineering");

    departments.delete(created.id).await.unwrap();
    let err = departments.get(created.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Failed("failed to fetch department")));
}

#[tokio::test]
async fn failures_carry_action_message() {
    let client = live_client().await;

    let err = client.departments().delete(3).await.unwrap_err();
    assert_eq!(err.to_string(), "failed to delete department");

    let err = client.departments().update(3, &dept("Ghost")).await.unwrap_err();
    assert_eq!(err.to_string(), "failed to update department");
}

#[tokio::test]
async fn other_resources_round_trip_relations() {
    let client = live_client().await;

    let cs = client.departments().create(&dept("Computer Science")).await.unwrap();
    let student = client
        .students()
        .create(&NewStudent {
            name: "Amal".to_string(),
            email: "amal@example.edu".to_string(),
            dept_id: Some(cs.id),
        })
        .await
        .unwrap();
    let course = client
        .courses()
        .create(&NewCourse {
            title: "Compilers".to_string(),
            credits: 4,
            dept_id: Some(cs.id),
        })
        .await
        .unwrap();
    client
        .enrollments()
        .create(&NewEnrollment {
            student_id: student.id,
            course_id: course.id,
            grade: Some("A".to_string()),
        })
        .await
        .unwrap();

    let loaded = client.departments().get(cs.id).await.unwrap();
    assert_eq!(loaded.student_count(), 1);
    assert_eq!(loaded.course_count(), 1);

    let student = client.students().get(student.id).await.unwrap();
    assert_eq!(student.enrollments.map(|e| e.len()), Some(1));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RegistrarClient::new(ClientConfig::new(format!("http://{addr}")));
    let err = client.departments().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn create_accepts_wrapped_response() {
    let router = Router::new().route(
        "/departments",
        post(|Json(draft): Json<NewDepartment>| async move {
            Json(serde_json::json!({
                "message": "Department created",
                "newDepartment": { "id": 11, "name": draft.name },
            }))
        }),
    );
    let client = serve(router).await;

    let created = client.departments().create(&dept("Medicine")).await.unwrap();
    assert_eq!(created.id, 11);
    assert_eq!(created.name, "Medicine");
}

#[tokio::test]
async fn store_drives_live_api() {
    let client = live_client().await;
    let store = DepartmentStore::new(Arc::new(client));

    store.create_department(dept("Engineering")).await.unwrap();
    store.fetch_departments().await.unwrap();

    let state = store.snapshot().await;
    assert_eq!(state.departments.len(), 1);
    assert_eq!(state.error, None);
}
