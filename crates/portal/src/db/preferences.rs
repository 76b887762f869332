//! Menu preference document storage.
//!
//! One JSONB document per user, replaced wholesale on write. Readers go
//! through the [`crate::navigation::PreferenceLoader`], which supplies
//! the all-visible default when no document exists or the read fails.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use fernhill_core::{MenuPreferences, StaffUserId};

use super::RepositoryError;

/// Repository for per-user menu preference documents.
pub struct PreferenceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PreferenceRepository<'a> {
    /// Create a new preference repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the stored preference document for a user, if one exists.
    ///
    /// The stored document is decoded as a full record; keys it does not
    /// carry come back as visible (see `MenuPreferences` serde defaults).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored JSON does
    /// not decode as a preference record.
    pub async fn get(
        &self,
        staff_id: StaffUserId,
    ) -> Result<Option<MenuPreferences>, RepositoryError> {
        let value = sqlx::query_scalar::<_, JsonValue>(
            r"
            SELECT preferences FROM portal.menu_preference
            WHERE staff_id = $1
            ",
        )
        .bind(staff_id)
        .fetch_optional(self.pool)
        .await?;

        value
            .map(|v| {
                serde_json::from_value(v).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid preference document: {e}"))
                })
            })
            .transpose()
    }

    /// Replace the stored preference document for a user.
    ///
    /// Full-record replace: whatever is stored afterwards is exactly the
    /// given record, not a per-key merge with the previous one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set(
        &self,
        staff_id: StaffUserId,
        prefs: &MenuPreferences,
    ) -> Result<(), RepositoryError> {
        let value = serde_json::to_value(prefs).map_err(|e| {
            RepositoryError::DataCorruption(format!("unencodable preference record: {e}"))
        })?;

        sqlx::query(
            r"
            INSERT INTO portal.menu_preference (staff_id, preferences)
            VALUES ($1, $2)
            ON CONFLICT (staff_id) DO UPDATE
                SET preferences = $2, updated_at = NOW()
            ",
        )
        .bind(staff_id)
        .bind(value)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
