//! Employee exit workflow route handlers (HR and HODs).
//!
//! One page drives the whole workflow: a tab strip with an overview of
//! active resignations plus one tab per checklist task kind. Selecting
//! a resignation loads its checklist; each task can be moved through
//! pending, in progress and done with free-form notes.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;

use fernhill_core::{ExitTaskId, ResignationId, StaffUserId};

use crate::components::SidebarView;
use crate::filters;
use crate::db::{ExitRepository, RepositoryError};
use crate::error::Result;
use crate::middleware::RequireManagement;
use crate::models::{ExitTask, ExitTaskKind, ExitTaskStatus, Resignation, ResignationStatus};
use crate::state::AppState;

/// New resignation form data.
#[derive(Debug, Deserialize)]
pub struct ResignationForm {
    pub staff_id: i32,
    pub notice_date: NaiveDate,
    pub last_working_day: NaiveDate,
    pub reason: Option<String>,
}

/// Task update form data.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    pub status: ExitTaskStatus,
    pub notes: Option<String>,
    /// Resignation the task belongs to, for the redirect back.
    pub resignation_id: i32,
}

/// Resignation status change form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Query parameters selecting the viewed resignation and tab.
#[derive(Debug, Deserialize)]
pub struct ExitQuery {
    /// Resignation whose checklist is shown.
    pub resignation: Option<i32>,
    /// Selected tab; a task kind, or absent for the overview.
    pub tab: Option<String>,
    pub error: Option<String>,
}

/// A tab in the workflow strip.
pub struct ExitTab {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Exit workflow page template.
#[derive(Template, WebTemplate)]
#[template(path = "exit/index.html")]
pub struct ExitTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub tabs: Vec<ExitTab>,
    pub resignations: Vec<Resignation>,
    /// The resignation whose checklist is open, if any.
    pub selected: Option<Resignation>,
    /// Tasks shown on the current tab (all of them on the overview).
    pub tasks: Vec<ExitTask>,
    pub error: Option<String>,
}

const OVERVIEW_SLUG: &str = "overview";

fn kind_slug(kind: ExitTaskKind) -> &'static str {
    match kind {
        ExitTaskKind::Interview => "interview",
        ExitTaskKind::Clearance => "clearance",
        ExitTaskKind::Settlement => "settlement",
        ExitTaskKind::Certificate => "certificate",
        ExitTaskKind::KnowledgeTransfer => "knowledge_transfer",
    }
}

fn build_tabs(active: &str) -> Vec<ExitTab> {
    let mut tabs = vec![ExitTab {
        slug: OVERVIEW_SLUG,
        label: "Overview",
        active: active == OVERVIEW_SLUG,
    }];
    tabs.extend(ExitTaskKind::ALL.into_iter().map(|kind| {
        let slug = kind_slug(kind);
        ExitTab {
            slug,
            label: kind.label(),
            active: active == slug,
        }
    }));
    tabs
}

/// Display the exit workflow (HR and HODs).
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireManagement(user): RequireManagement,
    Query(query): Query<ExitQuery>,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/exit").await;

    let repo = ExitRepository::new(state.pool());
    let resignations = repo.list_resignations().await?;

    let active_tab = query.tab.as_deref().unwrap_or(OVERVIEW_SLUG);
    let tabs = build_tabs(active_tab);

    let selected = match query.resignation {
        Some(id) => repo.get_resignation(ResignationId::new(id)).await?,
        None => None,
    };

    let tasks = match &selected {
        Some(resignation) => {
            let all = repo.tasks_for(resignation.id).await?;
            if active_tab == OVERVIEW_SLUG {
                all
            } else {
                all.into_iter()
                    .filter(|t| kind_slug(t.kind) == active_tab)
                    .collect()
            }
        }
        None => Vec::new(),
    };

    Ok(ExitTemplate {
        sidebar,
        user_name: user.name,
        tabs,
        resignations,
        selected,
        tasks,
        error: query.error,
    })
}

/// Record a resignation and seed its checklist (HR and HODs).
pub async fn create_resignation(
    State(state): State<AppState>,
    RequireManagement(user): RequireManagement,
    Form(form): Form<ResignationForm>,
) -> Response {
    if form.last_working_day < form.notice_date {
        return Redirect::to("/exit?error=dates").into_response();
    }

    let reason = form
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());

    match ExitRepository::new(state.pool())
        .create_resignation(
            StaffUserId::new(form.staff_id),
            form.notice_date,
            form.last_working_day,
            reason,
        )
        .await
    {
        Ok(id) => {
            tracing::info!(resignation_id = %id, staff_id = form.staff_id, by = %user.id, "resignation recorded");
            Redirect::to(&format!("/exit?resignation={id}")).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, staff_id = form.staff_id, "resignation creation failed");
            Redirect::to("/exit?error=internal").into_response()
        }
    }
}

/// Update one checklist task (HR and HODs).
pub async fn update_task(
    State(state): State<AppState>,
    RequireManagement(user): RequireManagement,
    Path(id): Path<i32>,
    Form(form): Form<TaskForm>,
) -> Response {
    let id = ExitTaskId::new(id);
    let notes = form
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let back = format!("/exit?resignation={}", form.resignation_id);
    match ExitRepository::new(state.pool())
        .update_task(id, form.status, notes)
        .await
    {
        Ok(()) => {
            tracing::info!(task_id = %id, status = ?form.status, by = %user.id, "exit task updated");
            Redirect::to(&back).into_response()
        }
        Err(RepositoryError::NotFound) => Redirect::to("/exit").into_response(),
        Err(e) => {
            tracing::error!(error = %e, task_id = %id, "exit task update failed");
            Redirect::to(&format!("{back}&error=internal")).into_response()
        }
    }
}

/// Move a resignation to a new status (HR and HODs).
pub async fn set_status(
    State(state): State<AppState>,
    RequireManagement(user): RequireManagement,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Response {
    let id = ResignationId::new(id);
    let Ok(status) = ResignationStatus::from_str(&form.status) else {
        return Redirect::to("/exit?error=status").into_response();
    };

    match ExitRepository::new(state.pool())
        .set_resignation_status(id, status)
        .await
    {
        Ok(()) => {
            tracing::info!(resignation_id = %id, status = ?status, by = %user.id, "resignation status changed");
            Redirect::to(&format!("/exit?resignation={id}")).into_response()
        }
        Err(RepositoryError::NotFound) => Redirect::to("/exit").into_response(),
        Err(e) => {
            tracing::error!(error = %e, resignation_id = %id, "resignation status change failed");
            Redirect::to("/exit?error=internal").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_strip_is_overview_plus_task_kinds() {
        let tabs = build_tabs(OVERVIEW_SLUG);
        let labels: Vec<&str> = tabs.iter().map(|t| t.label).collect();
        assert_eq!(
            labels,
            vec![
                "Overview",
                "Exit Interview",
                "Clearance",
                "Settlement",
                "Certificates",
                "Knowledge Transfer",
            ]
        );
        assert!(tabs[0].active);
        assert!(tabs[1..].iter().all(|t| !t.active));
    }

    #[test]
    fn test_task_kind_tab_activates() {
        let tabs = build_tabs("clearance");
        let active: Vec<&str> = tabs.iter().filter(|t| t.active).map(|t| t.slug).collect();
        assert_eq!(active, vec!["clearance"]);
    }
}
