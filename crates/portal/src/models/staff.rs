//! Staff user domain types and session-stored identity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fernhill_core::{DepartmentId, Email, Role, StaffUserId};

/// A staff member (domain type).
#[derive(Debug, Clone)]
pub struct StaffUser {
    /// Unique staff user ID.
    pub id: StaffUserId,
    /// Work email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
    /// Department, if assigned.
    pub department_id: Option<DepartmentId>,
    /// First day of employment.
    pub joined_on: NaiveDate,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A department.
#[derive(Debug, Clone)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    /// Head of department, if one is assigned.
    pub head_id: Option<StaffUserId>,
    /// Number of staff currently in the department.
    pub headcount: i64,
}

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// The role string from the identity service is parsed once, at login;
/// everything downstream works with the typed [`Role`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Staff member's database ID.
    pub id: StaffUserId,
    /// Work email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
}

/// Session keys for authentication and UI state.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the sidebar display mode.
    pub const SIDEBAR_MODE: &str = "sidebar_mode";

    /// Key for the identity-service subject of the signed-in user.
    pub const IDENTITY_SUBJECT: &str = "identity_subject";
}
