//! Leave route handlers.
//!
//! Staff submit requests against their own record; HR and heads of
//! department work the pending queue at `/leave/approvals`. A request
//! can only be decided while pending.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;

use fernhill_core::LeaveRequestId;

use crate::components::SidebarView;
use crate::filters;
use crate::db::{LeaveRepository, RepositoryError};
use crate::error::Result;
use crate::middleware::{RequireAuth, RequireManagement};
use crate::models::{LeaveKind, LeaveRequest, LeaveStatus};
use crate::state::AppState;

/// Leave request form data.
#[derive(Debug, Deserialize)]
pub struct LeaveForm {
    pub kind: LeaveKind,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub reason: Option<String>,
}

/// Decision form data.
#[derive(Debug, Deserialize)]
pub struct DecisionForm {
    pub decision: Decision,
}

/// The two ways a pending request can go.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

/// Personal leave page template.
#[derive(Template, WebTemplate)]
#[template(path = "leave/index.html")]
pub struct LeaveTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub requests: Vec<LeaveRequest>,
    pub error: Option<String>,
}

/// Approval queue page template (HR and HODs).
#[derive(Template, WebTemplate)]
#[template(path = "leave/approvals.html")]
pub struct ApprovalsTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub pending: Vec<LeaveRequest>,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Display the signed-in user's leave requests.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    axum::extract::Query(query): axum::extract::Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/leave").await;

    let requests = LeaveRepository::new(state.pool())
        .list_for_staff(user.id)
        .await?;

    Ok(LeaveTemplate {
        sidebar,
        user_name: user.name,
        requests,
        error: query.error,
    })
}

/// Handle a new leave request submission.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<LeaveForm>,
) -> Response {
    if form.ends_on < form.starts_on {
        return Redirect::to("/leave?error=range").into_response();
    }

    let reason = form
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());

    match LeaveRepository::new(state.pool())
        .create(user.id, form.kind, form.starts_on, form.ends_on, reason)
        .await
    {
        Ok(id) => {
            tracing::info!(staff_id = %user.id, request_id = %id, "leave request submitted");
            Redirect::to("/leave").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, staff_id = %user.id, "leave request failed");
            Redirect::to("/leave?error=internal").into_response()
        }
    }
}

/// Display the pending approval queue (HR and HODs).
pub async fn approvals(
    State(state): State<AppState>,
    session: Session,
    RequireManagement(user): RequireManagement,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/leave/approvals").await;

    let pending = LeaveRepository::new(state.pool()).list_pending().await?;

    Ok(ApprovalsTemplate {
        sidebar,
        user_name: user.name,
        pending,
    })
}

/// Approve or reject a pending request (HR and HODs).
pub async fn decide(
    State(state): State<AppState>,
    RequireManagement(user): RequireManagement,
    Path(id): Path<i32>,
    Form(form): Form<DecisionForm>,
) -> Response {
    let id = LeaveRequestId::new(id);
    let status = match form.decision {
        Decision::Approve => LeaveStatus::Approved,
        Decision::Reject => LeaveStatus::Rejected,
    };

    match LeaveRepository::new(state.pool())
        .decide(id, status, user.id)
        .await
    {
        Ok(()) => {
            tracing::info!(request_id = %id, decided_by = %user.id, status = ?status, "leave request decided");
            Redirect::to("/leave/approvals").into_response()
        }
        Err(RepositoryError::NotFound) => {
            // Already decided, or never existed. Either way the queue
            // view is the answer.
            Redirect::to("/leave/approvals").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, request_id = %id, "leave decision failed");
            Redirect::to("/leave/approvals?error=internal").into_response()
        }
    }
}
