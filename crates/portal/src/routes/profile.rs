//! Profile route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;

use crate::components::SidebarView;
use crate::filters;
use crate::db::StaffRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::StaffUser;
use crate::state::AppState;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub staff: StaffUser,
}

/// Display the signed-in user's profile.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/profile").await;

    // The session carries a snapshot; the profile page shows the
    // current database row.
    let staff = StaffRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("staff member {}", user.id)))?;

    Ok(ProfileTemplate {
        sidebar,
        user_name: user.name,
        staff,
    })
}
