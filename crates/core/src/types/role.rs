//! Staff roles and role categories.

use serde::{Deserialize, Serialize};

/// Role assigned to a portal user.
///
/// The role decides both which navigation item set applies (via
/// [`RoleCategory`]) and which management pages are reachable. `Hod`
/// (head of department) shares the management menu with `Hr` but does
/// not see the HR-scoped entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "portal.staff_role", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human resources. Full access to all management pages.
    Hr,
    /// Head of department. Management menu without the HR-scoped entries.
    Hod,
    /// Regular staff member.
    Staff,
    /// Intern. Same menu as staff.
    Intern,
}

/// Which of the two fixed navigation item sets applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    /// Staff and interns: the employee item set.
    Employee,
    /// Everyone else, including unresolved roles: the management item set.
    Management,
}

/// Error returned when a role string cannot be parsed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid staff role: {0}")]
pub struct RoleParseError(pub String);

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 4] = [Self::Hr, Self::Hod, Self::Staff, Self::Intern];

    /// The navigation category this role falls into.
    #[must_use]
    pub const fn category(self) -> RoleCategory {
        match self {
            Self::Staff | Self::Intern => RoleCategory::Employee,
            Self::Hr | Self::Hod => RoleCategory::Management,
        }
    }

    /// Whether this role uses the employee item set.
    #[must_use]
    pub const fn is_employee(self) -> bool {
        matches!(self.category(), RoleCategory::Employee)
    }

    /// The canonical lowercase name, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::Hod => "hod",
            Self::Staff => "staff",
            Self::Intern => "intern",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    /// Case-insensitive: role strings arrive from the identity service
    /// in whatever casing it stores them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hr" => Ok(Self::Hr),
            "hod" => Ok(Self::Hod),
            "staff" => Ok(Self::Staff),
            "intern" => Ok(Self::Intern),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Role::from_str("HR").unwrap(), Role::Hr);
        assert_eq!(Role::from_str("hr").unwrap(), Role::Hr);
        assert_eq!(Role::from_str("Hod").unwrap(), Role::Hod);
        assert_eq!(Role::from_str("STAFF").unwrap(), Role::Staff);
        assert_eq!(Role::from_str("Intern").unwrap(), Role::Intern);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_category_split() {
        assert_eq!(Role::Staff.category(), RoleCategory::Employee);
        assert_eq!(Role::Intern.category(), RoleCategory::Employee);
        assert_eq!(Role::Hr.category(), RoleCategory::Management);
        assert_eq!(Role::Hod.category(), RoleCategory::Management);
    }

    #[test]
    fn test_display_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }
    }
}
