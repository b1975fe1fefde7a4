//! Dashboard action endpoints.
//!
//! HTML form handlers that drive the department page and redirect back
//! to it (post/redirect/get).

use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use registrar_state::DepartmentId;

use crate::DashboardState;

const DEPARTMENTS_PAGE: &str = "/departments";

#[derive(serde::Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
}

pub async fn add_department(
    State(state): State<DashboardState>,
    Form(form): Form<NameForm>,
) -> Redirect {
    let mut page = state.page.lock().await;
    page.add(&state.departments, form.name).await;
    Redirect::to(DEPARTMENTS_PAGE)
}

// ── Edit ────────────────────────────────────────────────────────

pub async fn start_edit(
    State(state): State<DashboardState>,
    Path(id): Path<DepartmentId>,
) -> Redirect {
    let snapshot = state.departments.snapshot().await;
    if let Some(dept) = snapshot.find(id) {
        state.page.lock().await.start_edit(id, &dept.name);
    }
    Redirect::to(DEPARTMENTS_PAGE)
}

pub async fn save_edit(
    State(state): State<DashboardState>,
    Path(id): Path<DepartmentId>,
    Form(form): Form<NameForm>,
) -> Redirect {
    let mut page = state.page.lock().await;
    page.save_edit(&state.departments, id, form.name).await;
    Redirect::to(DEPARTMENTS_PAGE)
}

pub async fn cancel_edit(
    State(state): State<DashboardState>,
    Path(_id): Path<DepartmentId>,
) -> Redirect {
    state.page.lock().await.cancel_edit();
    Redirect::to(DEPARTMENTS_PAGE)
}

// ── Expand ──────────────────────────────────────────────────────

pub async fn toggle_expand(
    State(state): State<DashboardState>,
    Path(id): Path<DepartmentId>,
) -> Redirect {
    state.page.lock().await.toggle_expand(id);
    Redirect::to(DEPARTMENTS_PAGE)
}

// ── Delete ──────────────────────────────────────────────────────

pub async fn request_delete(
    State(state): State<DashboardState>,
    Path(id): Path<DepartmentId>,
) -> Redirect {
    state.page.lock().await.request_delete(id);
    Redirect::to(DEPARTMENTS_PAGE)
}

pub async fn confirm_delete(State(state): State<DashboardState>) -> Redirect {
    let mut page = state.page.lock().await;
    page.confirm_delete(&state.departments).await;
    Redirect::to(DEPARTMENTS_PAGE)
}

pub async fn cancel_delete(State(state): State<DashboardState>) -> Redirect {
    state.page.lock().await.cancel_delete();
    Redirect::to(DEPARTMENTS_PAGE)
}

// ── Error recovery ──────────────────────────────────────────────

pub async fn retry(State(state): State<DashboardState>) -> Redirect {
    let mut page = state.page.lock().await;
    page.retry(&state.departments).await;
    Redirect::to(DEPARTMENTS_PAGE)
}

pub async fn dismiss_error(State(state): State<DashboardState>) -> Redirect {
    let mut page = state.page.lock().await;
    page.dismiss_error(&state.departments).await;
    Redirect::to(DEPARTMENTS_PAGE)
}
