//! Salary slip repository.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use fernhill_core::{SalarySlipId, StaffUserId};

use super::RepositoryError;
use crate::models::SalarySlip;

/// Internal row type for salary slip queries.
#[derive(Debug, sqlx::FromRow)]
struct SlipRow {
    id: i32,
    staff_id: i32,
    staff_name: String,
    period: NaiveDate,
    gross: Decimal,
    deductions: Decimal,
    net: Decimal,
    issued_at: DateTime<Utc>,
}

impl From<SlipRow> for SalarySlip {
    fn from(row: SlipRow) -> Self {
        Self {
            id: SalarySlipId::new(row.id),
            staff_id: StaffUserId::new(row.staff_id),
            staff_name: row.staff_name,
            period: row.period,
            gross: row.gross,
            deductions: row.deductions,
            net: row.net,
            issued_at: row.issued_at,
        }
    }
}

const SELECT_SLIP: &str = r"
    SELECT p.id, p.staff_id, s.name AS staff_name, p.period,
           p.gross, p.deductions, p.net, p.issued_at
    FROM portal.salary_slip p
    JOIN portal.staff_user s ON s.id = p.staff_id
";

/// Repository for payroll operations.
pub struct PayrollRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PayrollRepository<'a> {
    /// Create a new payroll repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One staff member's slips, newest period first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_staff(
        &self,
        staff_id: StaffUserId,
    ) -> Result<Vec<SalarySlip>, RepositoryError> {
        let rows = sqlx::query_as::<_, SlipRow>(&format!(
            "{SELECT_SLIP} WHERE p.staff_id = $1 ORDER BY p.period DESC"
        ))
        .bind(staff_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// All issued slips, newest period first (HR view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self, limit: i64) -> Result<Vec<SalarySlip>, RepositoryError> {
        let rows = sqlx::query_as::<_, SlipRow>(&format!(
            "{SELECT_SLIP} ORDER BY p.period DESC, s.name LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Issue a slip for a staff member and period.
    ///
    /// One slip per staff member per period; re-issuing replaces the
    /// amounts and refreshes `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn issue(
        &self,
        staff_id: StaffUserId,
        period: NaiveDate,
        gross: Decimal,
        deductions: Decimal,
    ) -> Result<(), RepositoryError> {
        let net = gross - deductions;
        sqlx::query(
            r"
            INSERT INTO portal.salary_slip (staff_id, period, gross, deductions, net)
            VALUES ($1, date_trunc('month', $2::date)::date, $3, $4, $5)
            ON CONFLICT (staff_id, period) DO UPDATE
                SET gross = $3, deductions = $4, net = $5, issued_at = NOW()
            ",
        )
        .bind(staff_id)
        .bind(period)
        .bind(gross)
        .bind(deductions)
        .bind(net)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
