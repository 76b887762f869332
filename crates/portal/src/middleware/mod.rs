//! HTTP middleware stack for the portal.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Auth extractors (per-handler, in `auth`)

pub mod auth;
pub mod session;

pub use auth::{
    GuardDecision, OptionalAuth, RequireAuth, RequireHr, RequireManagement, clear_current_user,
    set_current_user,
};
pub use session::create_session_layer;
