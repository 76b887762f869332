//! Sidebar collapse/expand route handler.

use axum::{
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::components::{set_sidebar_mode, sidebar_mode};
use crate::middleware::RequireAuth;

/// Flip the sidebar between expanded and collapsed.
///
/// Redirects back to the page the toggle was pressed on, falling back
/// to the dashboard when no referer is available.
pub async fn toggle(session: Session, RequireAuth(_user): RequireAuth, headers: HeaderMap) -> Response {
    let mode = sidebar_mode(&session).await.toggled();
    if let Err(e) = set_sidebar_mode(&session, mode).await {
        tracing::warn!(error = %e, "failed to store sidebar mode");
    }

    let back = headers
        .get(axum::http::header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/dashboard");

    Redirect::to(back).into_response()
}
