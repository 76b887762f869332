//! Attendance repository.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::PgPool;

use fernhill_core::{AttendanceRecordId, StaffUserId};

use super::RepositoryError;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, MonthlySummary};

/// Internal row type for attendance queries.
#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: i32,
    staff_id: i32,
    staff_name: String,
    work_date: NaiveDate,
    status: AttendanceStatus,
    clock_in: Option<DateTime<Utc>>,
    clock_out: Option<DateTime<Utc>>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        Self {
            id: AttendanceRecordId::new(row.id),
            staff_id: StaffUserId::new(row.staff_id),
            staff_name: row.staff_name,
            work_date: row.work_date,
            status: row.status,
            clock_in: row.clock_in,
            clock_out: row.clock_out,
        }
    }
}

const SELECT_RECORD: &str = r"
    SELECT a.id, a.staff_id, s.name AS staff_name, a.work_date,
           a.status, a.clock_in, a.clock_out
    FROM portal.attendance_record a
    JOIN portal.staff_user s ON s.id = a.staff_id
";

/// Repository for attendance operations.
pub struct AttendanceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttendanceRepository<'a> {
    /// Create a new attendance repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Recent records for one staff member, newest day first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_staff(
        &self,
        staff_id: StaffUserId,
        limit: i64,
    ) -> Result<Vec<AttendanceRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "{SELECT_RECORD} WHERE a.staff_id = $1 ORDER BY a.work_date DESC LIMIT $2"
        ))
        .bind(staff_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Recent records across all staff, newest day first (management view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recent(
        &self,
        limit: i64,
    ) -> Result<Vec<AttendanceRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "{SELECT_RECORD} ORDER BY a.work_date DESC, s.name LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Record clock-in for today, creating the day's row if needed.
    ///
    /// Clocking in twice on the same day keeps the first timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clock_in(
        &self,
        staff_id: StaffUserId,
        status: AttendanceStatus,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO portal.attendance_record (staff_id, work_date, status, clock_in)
            VALUES ($1, CURRENT_DATE, $2, NOW())
            ON CONFLICT (staff_id, work_date) DO UPDATE
                SET status = $2,
                    clock_in = COALESCE(portal.attendance_record.clock_in, NOW())
            ",
        )
        .bind(staff_id)
        .bind(status)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Record clock-out on today's row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if there is no row for today.
    /// Returns `RepositoryError::Database` for other query failures.
    pub async fn clock_out(&self, staff_id: StaffUserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.attendance_record
            SET clock_out = NOW()
            WHERE staff_id = $1 AND work_date = CURRENT_DATE
            ",
        )
        .bind(staff_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Roll up one staff member's records for the month containing `day`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_summary(
        &self,
        staff_id: StaffUserId,
        day: NaiveDate,
    ) -> Result<MonthlySummary, RepositoryError> {
        #[derive(Debug, sqlx::FromRow)]
        struct SummaryRow {
            status: AttendanceStatus,
            days: i64,
        }

        let rows = sqlx::query_as::<_, SummaryRow>(
            r"
            SELECT status, COUNT(*) AS days
            FROM portal.attendance_record
            WHERE staff_id = $1
              AND date_trunc('month', work_date) = date_trunc('month', $2::date)
            GROUP BY status
            ",
        )
        .bind(staff_id)
        .bind(day)
        .fetch_all(self.pool)
        .await?;

        let mut summary = MonthlySummary::default();
        for row in rows {
            match row.status {
                AttendanceStatus::Present => summary.present = row.days,
                AttendanceStatus::Remote => summary.remote = row.days,
                AttendanceStatus::OnLeave => summary.on_leave = row.days,
                AttendanceStatus::Absent => summary.absent = row.days,
            }
        }

        tracing::debug!(
            staff_id = %staff_id,
            month = %format!("{}-{:02}", day.year(), day.month()),
            total = summary.total(),
            "attendance summary computed"
        );
        Ok(summary)
    }
}
