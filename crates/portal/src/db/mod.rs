//! Database operations for the portal `PostgreSQL` instance.
//!
//! # Schema: `portal`
//!
//! ## Tables
//!
//! - `staff_user` - Staff directory (mirrors the identity service)
//! - `department` - Departments and their heads
//! - `menu_preference` - Per-user menu visibility documents (JSONB)
//! - `attendance_record` - One row per staff member per working day
//! - `leave_request` - Leave requests and their approval state
//! - `holiday` - Company holiday calendar
//! - `salary_slip` - Issued salary slips
//! - `resignation` / `exit_task` - Exit-management workflow
//! - `session` - tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/portal/migrations/` and run via:
//! ```bash
//! cargo run -p fernhill-cli -- migrate
//! ```

pub mod attendance;
pub mod exit;
pub mod holidays;
pub mod leave;
pub mod payroll;
pub mod preferences;
pub mod staff;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use attendance::AttendanceRepository;
pub use exit::ExitRepository;
pub use holidays::HolidayRepository;
pub use leave::LeaveRepository;
pub use payroll::PayrollRepository;
pub use preferences::PreferenceRepository;
pub use staff::StaffRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
