//! Leave request repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use fernhill_core::{LeaveRequestId, StaffUserId};

use super::RepositoryError;
use crate::models::leave::{LeaveKind, LeaveRequest, LeaveStatus};

/// Internal row type for leave queries.
#[derive(Debug, sqlx::FromRow)]
struct LeaveRow {
    id: i32,
    staff_id: i32,
    staff_name: String,
    kind: LeaveKind,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    reason: Option<String>,
    status: LeaveStatus,
    decided_by: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<LeaveRow> for LeaveRequest {
    fn from(row: LeaveRow) -> Self {
        Self {
            id: LeaveRequestId::new(row.id),
            staff_id: StaffUserId::new(row.staff_id),
            staff_name: row.staff_name,
            kind: row.kind,
            starts_on: row.starts_on,
            ends_on: row.ends_on,
            reason: row.reason,
            status: row.status,
            decided_by: row.decided_by.map(StaffUserId::new),
            created_at: row.created_at,
        }
    }
}

const SELECT_REQUEST: &str = r"
    SELECT l.id, l.staff_id, s.name AS staff_name, l.kind, l.starts_on,
           l.ends_on, l.reason, l.status, l.decided_by, l.created_at
    FROM portal.leave_request l
    JOIN portal.staff_user s ON s.id = l.staff_id
";

/// Repository for leave request operations.
pub struct LeaveRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaveRepository<'a> {
    /// Create a new leave repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One staff member's requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_staff(
        &self,
        staff_id: StaffUserId,
    ) -> Result<Vec<LeaveRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "{SELECT_REQUEST} WHERE l.staff_id = $1 ORDER BY l.created_at DESC"
        ))
        .bind(staff_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// All pending requests, oldest first (approval queue).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_pending(&self) -> Result<Vec<LeaveRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            "{SELECT_REQUEST} WHERE l.status = 'pending' ORDER BY l.created_at"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Submit a new request. It starts in `Pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        staff_id: StaffUserId,
        kind: LeaveKind,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        reason: Option<&str>,
    ) -> Result<LeaveRequestId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO portal.leave_request (staff_id, kind, starts_on, ends_on, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(staff_id)
        .bind(kind)
        .bind(starts_on)
        .bind(ends_on)
        .bind(reason)
        .fetch_one(self.pool)
        .await?;

        Ok(LeaveRequestId::new(id))
    }

    /// Decide a pending request.
    ///
    /// Only pending requests can be decided; deciding an already-decided
    /// request is reported as `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no pending request matched.
    /// Returns `RepositoryError::Database` for other query failures.
    pub async fn decide(
        &self,
        id: LeaveRequestId,
        status: LeaveStatus,
        decided_by: StaffUserId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.leave_request
            SET status = $2, decided_by = $3
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id)
        .bind(status)
        .bind(decided_by)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
