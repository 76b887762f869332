//! Salary route handlers.
//!
//! Everyone sees their own slips at `/salary`; HR issues and reviews
//! slips company-wide at `/salary/slips`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;

use fernhill_core::StaffUserId;

use crate::components::SidebarView;
use crate::filters;
use crate::db::PayrollRepository;
use crate::error::Result;
use crate::middleware::{RequireAuth, RequireHr};
use crate::models::SalarySlip;
use crate::state::AppState;

/// How many issued slips the HR view shows.
const SLIP_LIST_LIMIT: i64 = 100;

/// Slip issue form data (HR).
#[derive(Debug, Deserialize)]
pub struct IssueForm {
    pub staff_id: i32,
    /// Any day inside the pay period's month.
    pub period: NaiveDate,
    pub gross: Decimal,
    pub deductions: Decimal,
}

/// Personal salary page template.
#[derive(Template, WebTemplate)]
#[template(path = "payroll/salary.html")]
pub struct SalaryTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub slips: Vec<SalarySlip>,
}

/// Issued slips page template (HR).
#[derive(Template, WebTemplate)]
#[template(path = "payroll/slips.html")]
pub struct SlipsTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub slips: Vec<SalarySlip>,
    pub error: Option<String>,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Display the signed-in user's salary slips.
pub async fn salary(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/salary").await;

    let slips = PayrollRepository::new(state.pool())
        .list_for_staff(user.id)
        .await?;

    Ok(SalaryTemplate {
        sidebar,
        user_name: user.name,
        slips,
    })
}

/// Display issued slips company-wide (HR only).
pub async fn slips(
    State(state): State<AppState>,
    session: Session,
    RequireHr(user): RequireHr,
    axum::extract::Query(query): axum::extract::Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/salary/slips").await;

    let slips = PayrollRepository::new(state.pool())
        .list_all(SLIP_LIST_LIMIT)
        .await?;

    Ok(SlipsTemplate {
        sidebar,
        user_name: user.name,
        slips,
        error: query.error,
    })
}

/// Issue a salary slip (HR only).
pub async fn issue(
    State(state): State<AppState>,
    RequireHr(user): RequireHr,
    Form(form): Form<IssueForm>,
) -> Response {
    if form.gross < form.deductions {
        return Redirect::to("/salary/slips?error=amounts").into_response();
    }

    match PayrollRepository::new(state.pool())
        .issue(
            StaffUserId::new(form.staff_id),
            form.period,
            form.gross,
            form.deductions,
        )
        .await
    {
        Ok(()) => {
            tracing::info!(staff_id = form.staff_id, issued_by = %user.id, "salary slip issued");
            Redirect::to("/salary/slips").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, staff_id = form.staff_id, "slip issue failed");
            Redirect::to("/salary/slips?error=internal").into_response()
        }
    }
}
