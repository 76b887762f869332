//! Attendance and holiday domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fernhill_core::{AttendanceRecordId, HolidayId, StaffUserId};

/// How a working day was spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "portal.attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Remote,
    OnLeave,
    Absent,
}

impl AttendanceStatus {
    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Remote => "Remote",
            Self::OnLeave => "On leave",
            Self::Absent => "Absent",
        }
    }
}

/// One staff member's attendance for one working day.
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub staff_id: StaffUserId,
    /// Display name of the staff member (joined in for management views).
    pub staff_name: String,
    pub work_date: NaiveDate,
    pub status: AttendanceStatus,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
}

/// Monthly attendance roll-up for the report page.
#[derive(Debug, Clone, Default)]
pub struct MonthlySummary {
    pub present: i64,
    pub remote: i64,
    pub on_leave: i64,
    pub absent: i64,
}

impl MonthlySummary {
    /// Total recorded days in the month.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.present + self.remote + self.on_leave + self.absent
    }
}

/// A company holiday.
#[derive(Debug, Clone)]
pub struct Holiday {
    pub id: HolidayId,
    pub name: String,
    pub observed_on: NaiveDate,
}
