//! Holiday calendar repository.

use chrono::NaiveDate;
use sqlx::PgPool;

use fernhill_core::HolidayId;

use super::RepositoryError;
use crate::models::Holiday;

/// Internal row type for holiday queries.
#[derive(Debug, sqlx::FromRow)]
struct HolidayRow {
    id: i32,
    name: String,
    observed_on: NaiveDate,
}

impl From<HolidayRow> for Holiday {
    fn from(row: HolidayRow) -> Self {
        Self {
            id: HolidayId::new(row.id),
            name: row.name,
            observed_on: row.observed_on,
        }
    }
}

/// Repository for the company holiday calendar.
pub struct HolidayRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HolidayRepository<'a> {
    /// Create a new holiday repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All holidays in calendar order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Holiday>, RepositoryError> {
        let rows = sqlx::query_as::<_, HolidayRow>(
            r"
            SELECT id, name, observed_on
            FROM portal.holiday
            ORDER BY observed_on
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Add a holiday to the calendar.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a holiday already exists on
    /// that date. Returns `RepositoryError::Database` for other failures.
    pub async fn create(&self, name: &str, observed_on: NaiveDate) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO portal.holiday (name, observed_on)
            VALUES ($1, $2)
            ",
        )
        .bind(name)
        .bind(observed_on)
        .execute(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(format!("holiday already exists on {observed_on}"))
            }
            _ => RepositoryError::Database(e),
        })?;

        Ok(())
    }

    /// Remove a holiday.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the holiday does not exist.
    /// Returns `RepositoryError::Database` for other query failures.
    pub async fn delete(&self, id: HolidayId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portal.holiday WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
