//! Exit-management repository: resignations and their task checklist.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use fernhill_core::{ExitTaskId, ResignationId, StaffUserId};

use super::RepositoryError;
use crate::models::exit::{
    ExitTask, ExitTaskKind, ExitTaskStatus, Resignation, ResignationStatus,
};

/// Internal row type for resignation queries.
#[derive(Debug, sqlx::FromRow)]
struct ResignationRow {
    id: i32,
    staff_id: i32,
    staff_name: String,
    notice_date: NaiveDate,
    last_working_day: NaiveDate,
    reason: Option<String>,
    status: ResignationStatus,
    created_at: DateTime<Utc>,
}

impl From<ResignationRow> for Resignation {
    fn from(row: ResignationRow) -> Self {
        Self {
            id: ResignationId::new(row.id),
            staff_id: StaffUserId::new(row.staff_id),
            staff_name: row.staff_name,
            notice_date: row.notice_date,
            last_working_day: row.last_working_day,
            reason: row.reason,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for exit task queries.
#[derive(Debug, sqlx::FromRow)]
struct ExitTaskRow {
    id: i32,
    resignation_id: i32,
    kind: ExitTaskKind,
    status: ExitTaskStatus,
    notes: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<ExitTaskRow> for ExitTask {
    fn from(row: ExitTaskRow) -> Self {
        Self {
            id: ExitTaskId::new(row.id),
            resignation_id: ResignationId::new(row.resignation_id),
            kind: row.kind,
            status: row.status,
            notes: row.notes,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_RESIGNATION: &str = r"
    SELECT r.id, r.staff_id, s.name AS staff_name, r.notice_date,
           r.last_working_day, r.reason, r.status, r.created_at
    FROM portal.resignation r
    JOIN portal.staff_user s ON s.id = r.staff_id
";

/// Repository for the exit-management workflow.
pub struct ExitRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ExitRepository<'a> {
    /// Create a new exit repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All tracked resignations, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_resignations(&self) -> Result<Vec<Resignation>, RepositoryError> {
        let rows = sqlx::query_as::<_, ResignationRow>(&format!(
            "{SELECT_RESIGNATION} ORDER BY r.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// One resignation by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_resignation(
        &self,
        id: ResignationId,
    ) -> Result<Option<Resignation>, RepositoryError> {
        let row = sqlx::query_as::<_, ResignationRow>(&format!(
            "{SELECT_RESIGNATION} WHERE r.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Open a resignation and seed its task checklist.
    ///
    /// The five checklist tasks (one per workflow tab) are created
    /// atomically with the resignation, all `Pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back as a unit.
    pub async fn create_resignation(
        &self,
        staff_id: StaffUserId,
        notice_date: NaiveDate,
        last_working_day: NaiveDate,
        reason: Option<&str>,
    ) -> Result<ResignationId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO portal.resignation (staff_id, notice_date, last_working_day, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(staff_id)
        .bind(notice_date)
        .bind(last_working_day)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        for kind in ExitTaskKind::ALL {
            sqlx::query(
                r"
                INSERT INTO portal.exit_task (resignation_id, kind)
                VALUES ($1, $2)
                ",
            )
            .bind(id)
            .bind(kind)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(ResignationId::new(id))
    }

    /// Move a resignation to a new status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the resignation does not
    /// exist. Returns `RepositoryError::Database` for other failures.
    pub async fn set_resignation_status(
        &self,
        id: ResignationId,
        status: ResignationStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.resignation SET status = $2 WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// The task checklist for a resignation, in tab order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn tasks_for(
        &self,
        resignation_id: ResignationId,
    ) -> Result<Vec<ExitTask>, RepositoryError> {
        let rows = sqlx::query_as::<_, ExitTaskRow>(
            r"
            SELECT id, resignation_id, kind, status, notes, updated_at
            FROM portal.exit_task
            WHERE resignation_id = $1
            ORDER BY id
            ",
        )
        .bind(resignation_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update one checklist task's status and notes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the task does not exist.
    /// Returns `RepositoryError::Database` for other query failures.
    pub async fn update_task(
        &self,
        id: ExitTaskId,
        status: ExitTaskStatus,
        notes: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE portal.exit_task
            SET status = $2, notes = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status)
        .bind(notes)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
