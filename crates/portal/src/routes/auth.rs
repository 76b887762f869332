//! Authentication route handlers.
//!
//! Sign-in is delegated to the hosted identity service; on success the
//! canonical profile is mirrored into the local staff table and a
//! session is established. The portal never sees stored credentials.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use fernhill_core::{Email, Role};

use crate::db::StaffRepository;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::services::IdentityError;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Display the login page.
///
/// Users with a live session go straight to the dashboard instead.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    LoginTemplate { error: query.error }.into_response()
}

/// Handle login form submission.
///
/// Verifies credentials at the identity service, mirrors the returned
/// profile into the staff table and stores the typed identity in the
/// session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let profile = match state.identity().sign_in(&form.email, &form.password).await {
        Ok(profile) => profile,
        Err(IdentityError::InvalidCredentials) => {
            return Redirect::to("/auth/login?error=credentials").into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "identity sign-in failed");
            return Redirect::to("/auth/login?error=identity").into_response();
        }
    };

    let Ok(email) = Email::parse(&profile.email) else {
        tracing::error!(subject = %profile.subject, "identity returned an unusable email");
        return Redirect::to("/auth/login?error=identity").into_response();
    };

    // Free-form role strings from the identity service are parsed
    // once, here; anything unknown signs in as plain staff.
    let role = Role::from_str(&profile.role).unwrap_or_else(|_| {
        tracing::warn!(subject = %profile.subject, role = %profile.role, "unknown role, treating as staff");
        Role::Staff
    });

    let staff = match StaffRepository::new(state.pool())
        .upsert_from_identity(&email, &profile.display_name, role)
        .await
    {
        Ok(staff) => staff,
        Err(e) => {
            tracing::error!(error = %e, "failed to mirror identity profile");
            return Redirect::to("/auth/login?error=internal").into_response();
        }
    };

    let current_user = CurrentUser {
        id: staff.id,
        email: staff.email,
        name: staff.name,
        role: staff.role,
    };

    if let Err(e) = set_current_user(&session, &current_user).await {
        tracing::error!(error = %e, "failed to establish session");
        return Redirect::to("/auth/login?error=session").into_response();
    }
    if let Err(e) = session
        .insert(session_keys::IDENTITY_SUBJECT, &profile.subject)
        .await
    {
        tracing::warn!(error = %e, "failed to store identity subject");
    }

    set_sentry_user(&current_user.id, Some(current_user.email.as_str()));
    tracing::info!(staff_id = %current_user.id, role = %current_user.role, "signed in");

    Redirect::to("/dashboard").into_response()
}

/// Handle logout.
///
/// Clears the local session and best-effort revokes the identity
/// session; a revoke failure never blocks the logout.
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    let subject: Option<String> = session
        .remove(session_keys::IDENTITY_SUBJECT)
        .await
        .unwrap_or_default();

    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!(error = %e, "failed to clear session on logout");
    }
    clear_sentry_user();

    if let Some(subject) = subject {
        if let Err(e) = state.identity().revoke(&subject).await {
            tracing::warn!(error = %e, "identity session revoke failed");
        }
    }

    Redirect::to("/auth/login").into_response()
}
