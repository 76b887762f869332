//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check (in main)
//! GET  /health/ready           - Readiness check (in main)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//!
//! # Every signed-in user
//! GET  /dashboard              - Role-aware dashboard
//! GET  /profile                - Own profile
//! GET  /attendance             - Own attendance log
//! POST /attendance/clock       - Clock in / out
//! GET  /report                 - Own monthly attendance report
//! GET  /leave                  - Own leave requests
//! POST /leave                  - Submit a leave request
//! GET  /salary                 - Own salary slips
//! GET  /settings               - Menu preference settings
//! POST /settings               - Save menu preferences
//! POST /sidebar/toggle         - Collapse / expand the sidebar
//!
//! # HR and heads of department
//! GET  /leave/approvals        - Pending leave requests
//! POST /leave/{id}/status      - Approve / reject a request
//! GET  /exit                   - Employee exit workflow
//! POST /exit/resignations      - Record a resignation
//! POST /exit/resignations/{id}/status - Move a resignation along
//! POST /exit/tasks/{id}        - Update an exit checklist task
//!
//! # HR only
//! GET  /employees              - Staff directory
//! POST /employees              - Add a staff member
//! GET  /departments            - Department list
//! GET  /attendance/manage      - Company-wide attendance
//! GET  /holidays               - Holiday calendar
//! POST /holidays               - Add a holiday
//! POST /holidays/{id}/delete   - Remove a holiday
//! GET  /salary/slips           - Issued salary slips
//! POST /salary/slips           - Issue a salary slip
//! ```
//!
//! Every page route is reachable from the sidebar; which entries the
//! sidebar shows is the user's preference record filtered through the
//! role rules in `fernhill_core::menu`. Role-restricted pages redirect
//! unauthorized roles to `/dashboard` via the extractors in
//! `crate::middleware`.

pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod exit;
pub mod holidays;
pub mod leave;
pub mod payroll;
pub mod people;
pub mod profile;
pub mod report;
pub mod settings;
pub mod sidebar;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::components::{SidebarView, sidebar_mode};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the leave routes router.
pub fn leave_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(leave::index).post(leave::create))
        .route("/approvals", get(leave::approvals))
        .route("/{id}/status", post(leave::decide))
}

/// Create the attendance routes router.
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::index))
        .route("/clock", post(attendance::clock))
        .route("/manage", get(attendance::manage))
}

/// Create the exit workflow routes router.
pub fn exit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(exit::index))
        .route("/resignations", post(exit::create_resignation))
        .route("/resignations/{id}/status", post(exit::set_status))
        .route("/tasks/{id}", post(exit::update_task))
}

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::index))
        .route("/profile", get(profile::index))
        .route("/report", get(report::index))
        .route("/salary", get(payroll::salary))
        .route("/salary/slips", get(payroll::slips).post(payroll::issue))
        .route("/employees", get(people::employees).post(people::create))
        .route("/departments", get(people::departments))
        .route("/holidays", get(holidays::index).post(holidays::create))
        .route("/holidays/{id}/delete", post(holidays::delete))
        .route("/settings", get(settings::index).post(settings::save))
        .route("/sidebar/toggle", post(sidebar::toggle))
        .nest("/attendance", attendance_routes())
        .nest("/leave", leave_routes())
        .nest("/exit", exit_routes())
        .nest("/auth", auth_routes())
}

/// Resolve the sidebar for the current user and page.
///
/// Called at the top of every page handler; the path decides which
/// entry renders as active.
pub(crate) async fn sidebar(
    state: &AppState,
    session: &Session,
    user: &CurrentUser,
    path: &str,
) -> SidebarView {
    let prefs = state.preferences().load(user.id).await;
    let mode = sidebar_mode(session).await;
    SidebarView::build(Some(user.role), &prefs, path, mode)
}
