//! Holiday calendar route handlers (HR only).

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

use fernhill_core::HolidayId;

use crate::components::SidebarView;
use crate::filters;
use crate::db::{HolidayRepository, RepositoryError};
use crate::error::Result;
use crate::middleware::RequireHr;
use crate::models::Holiday;
use crate::state::AppState;

/// New holiday form data.
#[derive(Debug, Deserialize)]
pub struct HolidayForm {
    pub name: String,
    pub observed_on: NaiveDate,
}

/// Holiday calendar page template.
#[derive(Template, WebTemplate)]
#[template(path = "holidays.html")]
pub struct HolidaysTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub holidays: Vec<Holiday>,
    pub error: Option<String>,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Display the holiday calendar (HR only).
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireHr(user): RequireHr,
    axum::extract::Query(query): axum::extract::Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/holidays").await;

    let holidays = HolidayRepository::new(state.pool()).list().await?;

    Ok(HolidaysTemplate {
        sidebar,
        user_name: user.name,
        holidays,
        error: query.error,
    })
}

/// Add a holiday (HR only).
pub async fn create(
    State(state): State<AppState>,
    RequireHr(user): RequireHr,
    Form(form): Form<HolidayForm>,
) -> Response {
    let name = form.name.trim();
    if name.is_empty() {
        return Redirect::to("/holidays?error=name").into_response();
    }

    match HolidayRepository::new(state.pool())
        .create(name, form.observed_on)
        .await
    {
        Ok(()) => {
            tracing::info!(holiday = name, on = %form.observed_on, by = %user.id, "holiday added");
            Redirect::to("/holidays").into_response()
        }
        Err(RepositoryError::Conflict(_)) => {
            Redirect::to("/holidays?error=taken").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "holiday creation failed");
            Redirect::to("/holidays?error=internal").into_response()
        }
    }
}

/// Remove a holiday (HR only).
pub async fn delete(
    State(state): State<AppState>,
    RequireHr(user): RequireHr,
    Path(id): Path<i32>,
) -> Response {
    let id = HolidayId::new(id);
    match HolidayRepository::new(state.pool()).delete(id).await {
        Ok(()) => {
            tracing::info!(holiday_id = %id, by = %user.id, "holiday removed");
            Redirect::to("/holidays").into_response()
        }
        Err(RepositoryError::NotFound) => Redirect::to("/holidays").into_response(),
        Err(e) => {
            tracing::error!(error = %e, holiday_id = %id, "holiday removal failed");
            Redirect::to("/holidays?error=internal").into_response()
        }
    }
}
