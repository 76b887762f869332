//! Attendance route handlers.
//!
//! Staff clock in and out against one row per day; HR gets a
//! company-wide view at `/attendance/manage`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::components::SidebarView;
use crate::filters;
use crate::db::{AttendanceRepository, RepositoryError};
use crate::error::Result;
use crate::middleware::{RequireAuth, RequireHr};
use crate::models::{AttendanceRecord, AttendanceStatus, MonthlySummary};
use crate::state::AppState;

/// How many rows the personal log shows.
const PERSONAL_LOG_LIMIT: i64 = 31;

/// How many rows the company-wide view shows.
const COMPANY_LOG_LIMIT: i64 = 100;

/// Clock action form data.
#[derive(Debug, Deserialize)]
pub struct ClockForm {
    pub action: ClockAction,
    /// Status recorded when clocking in. Ignored on clock-out.
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
}

/// Which way the clock is punched.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockAction {
    In,
    Out,
}

/// Personal attendance page template.
#[derive(Template, WebTemplate)]
#[template(path = "attendance/index.html")]
pub struct AttendanceTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub records: Vec<AttendanceRecord>,
    pub summary: MonthlySummary,
    pub clocked_in_today: bool,
}

/// Company-wide attendance page template (HR).
#[derive(Template, WebTemplate)]
#[template(path = "attendance/manage.html")]
pub struct ManageTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub records: Vec<AttendanceRecord>,
}

/// Display the signed-in user's attendance log.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/attendance").await;

    let repo = AttendanceRepository::new(state.pool());
    let today = chrono::Utc::now().date_naive();
    let records = repo.list_for_staff(user.id, PERSONAL_LOG_LIMIT).await?;
    let summary = repo.monthly_summary(user.id, today).await?;

    let clocked_in_today = records
        .first()
        .is_some_and(|r| r.work_date == today && r.clock_in.is_some());

    Ok(AttendanceTemplate {
        sidebar,
        user_name: user.name,
        records,
        summary,
        clocked_in_today,
    })
}

/// Handle a clock-in or clock-out.
pub async fn clock(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ClockForm>,
) -> Response {
    let repo = AttendanceRepository::new(state.pool());

    let outcome = match form.action {
        ClockAction::In => {
            let status = form.status.unwrap_or(AttendanceStatus::Present);
            repo.clock_in(user.id, status).await
        }
        ClockAction::Out => repo.clock_out(user.id).await,
    };

    match outcome {
        Ok(()) => Redirect::to("/attendance").into_response(),
        Err(RepositoryError::NotFound) => {
            // Clock-out without a clock-in today.
            Redirect::to("/attendance?error=not_clocked_in").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, staff_id = %user.id, "clock action failed");
            Redirect::to("/attendance?error=internal").into_response()
        }
    }
}

/// Display the company-wide attendance log (HR only).
pub async fn manage(
    State(state): State<AppState>,
    session: Session,
    RequireHr(user): RequireHr,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/attendance/manage").await;

    let records = AttendanceRepository::new(state.pool())
        .list_recent(COMPANY_LOG_LIMIT)
        .await?;

    Ok(ManageTemplate {
        sidebar,
        user_name: user.name,
        records,
    })
}
