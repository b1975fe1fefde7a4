//! Dashboard page handlers.
//!
//! Each handler snapshots the department store, builds view types, and
//! renders an Askama template.

use askama::Template;
use axum::extract::State;
use axum::response::Html;

use crate::DashboardState;
use crate::views::DepartmentPageView;

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl.render().unwrap_or_else(|e| {
        format!("<pre>Template error: {e}</pre>")
    }))
}

// ── Home ────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    active_page: &'static str,
}

pub async fn home() -> Html<String> {
    render(HomeTemplate {
        active_page: "home",
    })
}

// ── Departments ─────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "departments.html")]
struct DepartmentsTemplate {
    active_page: &'static str,
    view: DepartmentPageView,
}

pub async fn departments(State(state): State<DashboardState>) -> Html<String> {
    let mut page = state.page.lock().await;
    page.mount(&state.departments).await;

    let snapshot = state.departments.snapshot().await;
    let notice = page.take_notice();
    let view = DepartmentPageView::build(&snapshot, &page, notice.as_ref());

    render(DepartmentsTemplate {
        active_page: "departments",
        view,
    })
}
