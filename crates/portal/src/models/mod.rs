//! Domain models for the portal.

pub mod attendance;
pub mod exit;
pub mod leave;
pub mod payroll;
pub mod staff;

pub use attendance::{AttendanceRecord, AttendanceStatus, Holiday, MonthlySummary};
pub use exit::{ExitTask, ExitTaskKind, ExitTaskStatus, Resignation, ResignationStatus};
pub use leave::{LeaveKind, LeaveRequest, LeaveStatus};
pub use payroll::SalarySlip;
pub use staff::{CurrentUser, Department, StaffUser, session_keys};
