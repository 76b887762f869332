//! Employee-exit domain types.
//!
//! A resignation owns a set of exit tasks, one per workflow tab:
//! exit interview, clearance, settlement, certificates, and knowledge
//! transfer. Tasks are plain status + notes rows; the workflow carries
//! no deeper logic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fernhill_core::{ExitTaskId, ResignationId, StaffUserId};

/// Where a resignation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "portal.resignation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResignationStatus {
    Submitted,
    UnderReview,
    Accepted,
    Withdrawn,
    Completed,
}

impl ResignationStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under review",
            Self::Accepted => "Accepted",
            Self::Withdrawn => "Withdrawn",
            Self::Completed => "Completed",
        }
    }
}

impl std::str::FromStr for ResignationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "accepted" => Ok(Self::Accepted),
            "withdrawn" => Ok(Self::Withdrawn),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid resignation status: {s}")),
        }
    }
}

/// A tracked resignation.
#[derive(Debug, Clone)]
pub struct Resignation {
    pub id: ResignationId,
    pub staff_id: StaffUserId,
    /// Display name of the departing staff member.
    pub staff_name: String,
    pub notice_date: NaiveDate,
    pub last_working_day: NaiveDate,
    pub reason: Option<String>,
    pub status: ResignationStatus,
    pub created_at: DateTime<Utc>,
}

/// Which exit-workflow tab a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "portal.exit_task_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExitTaskKind {
    Interview,
    Clearance,
    Settlement,
    Certificate,
    KnowledgeTransfer,
}

impl ExitTaskKind {
    /// Every kind, in tab order.
    pub const ALL: [Self; 5] = [
        Self::Interview,
        Self::Clearance,
        Self::Settlement,
        Self::Certificate,
        Self::KnowledgeTransfer,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Interview => "Exit Interview",
            Self::Clearance => "Clearance",
            Self::Settlement => "Settlement",
            Self::Certificate => "Certificates",
            Self::KnowledgeTransfer => "Knowledge Transfer",
        }
    }
}

impl std::str::FromStr for ExitTaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interview" => Ok(Self::Interview),
            "clearance" => Ok(Self::Clearance),
            "settlement" => Ok(Self::Settlement),
            "certificate" => Ok(Self::Certificate),
            "knowledge_transfer" => Ok(Self::KnowledgeTransfer),
            _ => Err(format!("invalid exit task kind: {s}")),
        }
    }
}

/// Progress of one exit task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "portal.exit_task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExitTaskStatus {
    Pending,
    InProgress,
    Done,
}

impl ExitTaskStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }
}

impl std::str::FromStr for ExitTaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(format!("invalid exit task status: {s}")),
        }
    }
}

/// One row of the exit checklist.
#[derive(Debug, Clone)]
pub struct ExitTask {
    pub id: ExitTaskId,
    pub resignation_id: ResignationId,
    pub kind: ExitTaskKind,
    pub status: ExitTaskStatus,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}
