//! Leave request domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fernhill_core::{LeaveRequestId, StaffUserId};

/// Category of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "portal.leave_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaveKind {
    Annual,
    Sick,
    Unpaid,
    Compassionate,
}

impl LeaveKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Annual => "Annual",
            Self::Sick => "Sick",
            Self::Unpaid => "Unpaid",
            Self::Compassionate => "Compassionate",
        }
    }
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "portal.leave_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::str::FromStr for LeaveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid leave status: {s}")),
        }
    }
}

/// A leave request.
#[derive(Debug, Clone)]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub staff_id: StaffUserId,
    /// Display name of the requester (joined in for approval views).
    pub staff_name: String,
    pub kind: LeaveKind,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    /// Who approved or rejected the request, once decided.
    pub decided_by: Option<StaffUserId>,
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Inclusive day count of the requested span.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.ends_on - self.starts_on).num_days() + 1
    }
}
