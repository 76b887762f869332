//! Monthly attendance report route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use tower_sessions::Session;

use crate::components::SidebarView;
use crate::filters;
use crate::db::AttendanceRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::MonthlySummary;
use crate::state::AppState;

/// Query parameters selecting the reported month.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Any day inside the wanted month, ISO format. Defaults to today.
    pub month: Option<NaiveDate>,
}

/// Report page template.
#[derive(Template, WebTemplate)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub month_label: String,
    pub summary: MonthlySummary,
}

/// Display the signed-in user's monthly attendance roll-up.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/report").await;

    let day = query.month.unwrap_or_else(|| Utc::now().date_naive());
    let summary = AttendanceRepository::new(state.pool())
        .monthly_summary(user.id, day)
        .await?;

    tracing::debug!(staff_id = %user.id, year = day.year(), month = day.month(), "report rendered");

    Ok(ReportTemplate {
        sidebar,
        user_name: user.name,
        month_label: day.format("%B %Y").to_string(),
        summary,
    })
}
