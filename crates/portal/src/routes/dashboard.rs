//! Dashboard route handler.
//!
//! One dashboard for everyone; the widgets vary with role. Employees
//! see their own month at a glance, management additionally sees the
//! pending approval queue size.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use tower_sessions::Session;

use crate::components::SidebarView;
use crate::filters;
use crate::db::{AttendanceRepository, HolidayRepository, LeaveRepository};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Holiday, MonthlySummary};
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub role_label: String,
    pub summary: MonthlySummary,
    pub upcoming_holidays: Vec<Holiday>,
    /// `None` for employees; management sees the queue size.
    pub pending_approvals: Option<usize>,
}

/// Display the dashboard.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/dashboard").await;

    let today = Utc::now().date_naive();
    let summary = AttendanceRepository::new(state.pool())
        .monthly_summary(user.id, today)
        .await?;

    let upcoming_holidays = HolidayRepository::new(state.pool())
        .list()
        .await?
        .into_iter()
        .filter(|h| h.observed_on >= today)
        .take(3)
        .collect();

    let pending_approvals = if user.role.is_employee() {
        None
    } else {
        Some(LeaveRepository::new(state.pool()).list_pending().await?.len())
    };

    Ok(DashboardTemplate {
        sidebar,
        user_name: user.name,
        role_label: user.role.to_string(),
        summary,
        upcoming_holidays,
        pending_approvals,
    })
}
