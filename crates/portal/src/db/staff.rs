//! Staff directory repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use fernhill_core::{DepartmentId, Email, Role, StaffUserId};

use super::RepositoryError;
use crate::models::{Department, StaffUser};

/// Internal row type for staff queries.
#[derive(Debug, sqlx::FromRow)]
struct StaffRow {
    id: i32,
    email: String,
    name: String,
    role: Role,
    department_id: Option<i32>,
    joined_on: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StaffRow> for StaffUser {
    type Error = RepositoryError;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: StaffUserId::new(row.id),
            email,
            name: row.name,
            role: row.role,
            department_id: row.department_id.map(DepartmentId::new),
            joined_on: row.joined_on,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for department queries.
#[derive(Debug, sqlx::FromRow)]
struct DepartmentRow {
    id: i32,
    name: String,
    head_id: Option<i32>,
    headcount: i64,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: DepartmentId::new(row.id),
            name: row.name,
            head_id: row.head_id.map(StaffUserId::new),
            headcount: row.headcount,
        }
    }
}

/// Repository for staff directory operations.
pub struct StaffRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StaffRepository<'a> {
    /// Create a new staff repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all staff members, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<StaffUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, StaffRow>(
            r"
            SELECT id, email, name, role, department_id, joined_on, created_at, updated_at
            FROM portal.staff_user
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a staff member by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: StaffUserId) -> Result<Option<StaffUser>, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(
            r"
            SELECT id, email, name, role, department_id, joined_on, created_at, updated_at
            FROM portal.staff_user
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a staff member by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<StaffUser>, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(
            r"
            SELECT id, email, name, role, department_id, joined_on, created_at, updated_at
            FROM portal.staff_user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert or refresh a staff row from an identity-service profile.
    ///
    /// Called on every successful sign-in so the local directory stays in
    /// step with the identity service without a separate sync job.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn upsert_from_identity(
        &self,
        email: &Email,
        name: &str,
        role: Role,
    ) -> Result<StaffUser, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(
            r"
            INSERT INTO portal.staff_user (email, name, role, joined_on)
            VALUES ($1, $2, $3, CURRENT_DATE)
            ON CONFLICT (email) DO UPDATE
                SET name = EXCLUDED.name,
                    role = EXCLUDED.role,
                    updated_at = NOW()
            RETURNING id, email, name, role, department_id, joined_on, created_at, updated_at
            ",
        )
        .bind(email)
        .bind(name)
        .bind(role)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Create a staff member directly (CLI seeding path).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    /// Returns `RepositoryError::Database` for other query failures.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        role: Role,
    ) -> Result<StaffUser, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(
            r"
            INSERT INTO portal.staff_user (email, name, role, joined_on)
            VALUES ($1, $2, $3, CURRENT_DATE)
            RETURNING id, email, name, role, department_id, joined_on, created_at, updated_at
            ",
        )
        .bind(email)
        .bind(name)
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(format!("email already registered: {email}"))
            }
            _ => RepositoryError::Database(e),
        })?;

        row.try_into()
    }

    /// List all departments with their current headcount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_departments(&self) -> Result<Vec<Department>, RepositoryError> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            r"
            SELECT d.id, d.name, d.head_id,
                   COUNT(s.id) AS headcount
            FROM portal.department d
            LEFT JOIN portal.staff_user s ON s.department_id = d.id
            GROUP BY d.id, d.name, d.head_id
            ORDER BY d.name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
