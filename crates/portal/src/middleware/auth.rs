//! Authentication and role-guard extractors.
//!
//! Provides extractors for requiring authentication and restricting
//! pages to role sets. The role check itself is the pure
//! [`GuardDecision::decide`], kept free of HTTP so it can be tested
//! directly; the extractors wire it to the session.

use std::str::FromStr;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use fernhill_core::Role;

use crate::models::{CurrentUser, session_keys};

/// Where unauthorized roles are sent.
pub const FALLBACK_ROUTE: &str = "/dashboard";

/// Outcome of a page-level role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the page.
    Allow,
    /// Send the user to [`FALLBACK_ROUTE`].
    Redirect,
}

impl GuardDecision {
    /// Decide whether a role may see a page restricted to `allowed`.
    ///
    /// The comparison is case-insensitive: the raw role string is
    /// lowercased before parsing. An unresolved role (`None`) never
    /// redirects - auth may still be in flight and redirecting early
    /// would bounce a legitimate user. A role that is known but not in
    /// the allowed set redirects, including strings that do not parse
    /// as any role at all.
    #[must_use]
    pub fn decide(role: Option<&str>, allowed: &[Role]) -> Self {
        let Some(raw) = role else {
            return Self::Allow;
        };

        match Role::from_str(raw) {
            Ok(role) if allowed.contains(&role) => Self::Allow,
            Ok(_) | Err(_) => Self::Redirect,
        }
    }
}

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, redirects to the login page for HTML
/// requests, or returns 401 Unauthorized for API requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but nobody is logged in.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                let is_api = parts.uri.path().starts_with("/api/");
                if is_api {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Error returned when a page is restricted to a role set.
pub enum RoleRejection {
    /// Redirect to login page (not logged in, HTML request).
    RedirectToLogin,
    /// Unauthorized response (not logged in, API request).
    Unauthorized,
    /// Logged in, but the role may not see this page.
    RedirectToDashboard,
}

impl IntoResponse for RoleRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::RedirectToDashboard => Redirect::to(FALLBACK_ROUTE).into_response(),
        }
    }
}

async fn require_role_set(
    parts: &mut Parts,
    allowed: &[Role],
) -> Result<CurrentUser, RoleRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(RoleRejection::Unauthorized)?;

    let user: CurrentUser = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| {
            let is_api = parts.uri.path().starts_with("/api/");
            if is_api {
                RoleRejection::Unauthorized
            } else {
                RoleRejection::RedirectToLogin
            }
        })?;

    let role = user.role.to_string();
    match GuardDecision::decide(Some(&role), allowed) {
        GuardDecision::Allow => Ok(user),
        GuardDecision::Redirect => {
            tracing::debug!(role = %user.role, path = %parts.uri.path(), "role guard redirect");
            Err(RoleRejection::RedirectToDashboard)
        }
    }
}

/// Extractor for pages restricted to HR.
pub struct RequireHr(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireHr
where
    S: Send + Sync,
{
    type Rejection = RoleRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role_set(parts, &[Role::Hr]).await.map(Self)
    }
}

/// Extractor for pages restricted to HR and heads of department.
pub struct RequireManagement(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireManagement
where
    S: Send + Sync,
{
    type Rejection = RoleRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role_set(parts, &[Role::Hr, Role::Hod]).await.map(Self)
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANAGEMENT: &[Role] = &[Role::Hr, Role::Hod];

    #[test]
    fn test_staff_is_redirected_from_management_pages() {
        assert_eq!(
            GuardDecision::decide(Some("staff"), MANAGEMENT),
            GuardDecision::Redirect
        );
        assert_eq!(
            GuardDecision::decide(Some("intern"), MANAGEMENT),
            GuardDecision::Redirect
        );
    }

    #[test]
    fn test_allowed_roles_pass_in_any_casing() {
        assert_eq!(
            GuardDecision::decide(Some("hr"), MANAGEMENT),
            GuardDecision::Allow
        );
        assert_eq!(
            GuardDecision::decide(Some("HR"), MANAGEMENT),
            GuardDecision::Allow
        );
        assert_eq!(
            GuardDecision::decide(Some("Hod"), MANAGEMENT),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_unresolved_role_never_redirects() {
        // Auth may still be resolving; redirecting here would bounce a
        // legitimate user mid-login.
        assert_eq!(GuardDecision::decide(None, MANAGEMENT), GuardDecision::Allow);
    }

    #[test]
    fn test_unknown_role_is_redirected() {
        assert_eq!(
            GuardDecision::decide(Some("contractor"), MANAGEMENT),
            GuardDecision::Redirect
        );
        assert_eq!(
            GuardDecision::decide(Some(""), MANAGEMENT),
            GuardDecision::Redirect
        );
    }

    #[test]
    fn test_hr_only_set_excludes_hod() {
        assert_eq!(
            GuardDecision::decide(Some("hod"), &[Role::Hr]),
            GuardDecision::Redirect
        );
        assert_eq!(
            GuardDecision::decide(Some("hr"), &[Role::Hr]),
            GuardDecision::Allow
        );
    }
}
