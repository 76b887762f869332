//! Staff directory and department route handlers (HR only).

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use fernhill_core::{Email, Role};

use crate::components::SidebarView;
use crate::filters;
use crate::db::{RepositoryError, StaffRepository};
use crate::error::Result;
use crate::middleware::RequireHr;
use crate::models::{Department, StaffUser};
use crate::state::AppState;

/// New staff member form data.
#[derive(Debug, Deserialize)]
pub struct NewStaffForm {
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Staff directory page template.
#[derive(Template, WebTemplate)]
#[template(path = "people/employees.html")]
pub struct EmployeesTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub staff: Vec<StaffUser>,
    pub roles: Vec<&'static str>,
    pub error: Option<String>,
}

/// Department list page template.
#[derive(Template, WebTemplate)]
#[template(path = "people/departments.html")]
pub struct DepartmentsTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub departments: Vec<Department>,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Display the staff directory (HR only).
pub async fn employees(
    State(state): State<AppState>,
    session: Session,
    RequireHr(user): RequireHr,
    axum::extract::Query(query): axum::extract::Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/employees").await;

    let staff = StaffRepository::new(state.pool()).list_all().await?;

    Ok(EmployeesTemplate {
        sidebar,
        user_name: user.name,
        staff,
        roles: Role::ALL.iter().map(|r| r.as_str()).collect(),
        error: query.error,
    })
}

/// Add a staff member directly (HR only).
pub async fn create(
    State(state): State<AppState>,
    RequireHr(user): RequireHr,
    Form(form): Form<NewStaffForm>,
) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return Redirect::to("/employees?error=email").into_response();
    };

    let Ok(role) = Role::from_str(&form.role) else {
        return Redirect::to("/employees?error=role").into_response();
    };

    let name = form.name.trim();
    if name.is_empty() {
        return Redirect::to("/employees?error=name").into_response();
    }

    match StaffRepository::new(state.pool())
        .create(&email, name, role)
        .await
    {
        Ok(staff) => {
            tracing::info!(staff_id = %staff.id, created_by = %user.id, "staff member added");
            Redirect::to("/employees").into_response()
        }
        Err(RepositoryError::Conflict(_)) => {
            Redirect::to("/employees?error=taken").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "staff creation failed");
            Redirect::to("/employees?error=internal").into_response()
        }
    }
}

/// Display the department list (HR only).
pub async fn departments(
    State(state): State<AppState>,
    session: Session,
    RequireHr(user): RequireHr,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/departments").await;

    let departments = StaffRepository::new(state.pool()).list_departments().await?;

    Ok(DepartmentsTemplate {
        sidebar,
        user_name: user.name,
        departments,
    })
}
