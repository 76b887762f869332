//! Preference loading for the navigation sidebar.
//!
//! The sidebar needs the user's menu preference record on every page
//! render. [`PreferenceLoader`] sits in front of the document store
//! with a short-lived in-memory cache and absorbs every failure mode
//! into the all-visible default: a missing record, a failed read, or a
//! corrupt document all degrade to showing everything, logged but
//! never surfaced.
//!
//! The cache is keyed by staff ID, so a read issued for one identity
//! can only ever be stored under that identity. Rapid logout/login
//! switches therefore cannot overwrite a fresh record with a stale one
//! fetched for somebody else.

use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use fernhill_core::{MenuPreferences, StaffUserId};

use crate::db::{PreferenceRepository, RepositoryError};

/// How long a resolved preference record stays cached.
const PREFERENCE_TTL: Duration = Duration::from_secs(60);

/// A source of stored preference records.
///
/// `Ok(None)` is a definitive answer (no record saved yet) and is
/// cached as the default; `Err` is transient and is not cached.
pub trait PreferenceSource: Clone + Send + Sync + 'static {
    /// Read the stored record for a user, if one exists.
    fn fetch(
        &self,
        staff_id: StaffUserId,
    ) -> impl Future<Output = Result<Option<MenuPreferences>, RepositoryError>> + Send;
}

/// Document-store-backed preference source.
#[derive(Clone)]
pub struct PgPreferenceSource {
    pool: PgPool,
}

impl PgPreferenceSource {
    /// Create a new source reading from the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PreferenceSource for PgPreferenceSource {
    async fn fetch(
        &self,
        staff_id: StaffUserId,
    ) -> Result<Option<MenuPreferences>, RepositoryError> {
        PreferenceRepository::new(&self.pool).get(staff_id).await
    }
}

/// Cached, failure-absorbing preference loader.
pub struct PreferenceLoader<S: PreferenceSource> {
    source: S,
    cache: Cache<StaffUserId, MenuPreferences>,
}

/// The loader type used by the running portal.
pub type PortalPreferenceLoader = PreferenceLoader<PgPreferenceSource>;

impl<S: PreferenceSource> PreferenceLoader<S> {
    /// Create a loader over a source.
    #[must_use]
    pub fn new(source: S) -> Self {
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(PREFERENCE_TTL)
            .build();

        Self { source, cache }
    }

    /// Load the preference record for a user.
    ///
    /// Infallible by design: a failed or missing read falls back to the
    /// all-visible default. Fetch failures are logged at warn level and
    /// not cached, so the next render retries.
    pub async fn load(&self, staff_id: StaffUserId) -> MenuPreferences {
        let result = self
            .cache
            .try_get_with(staff_id, async {
                self.source
                    .fetch(staff_id)
                    .await
                    .map(Option::unwrap_or_default)
            })
            .await;

        match result {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(
                    staff_id = %staff_id,
                    error = %e,
                    "preference fetch failed, using defaults"
                );
                MenuPreferences::default()
            }
        }
    }

    /// Drop the cached record for a user (after a settings write).
    pub async fn invalidate(&self, staff_id: StaffUserId) {
        self.cache.invalidate(&staff_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fernhill_core::MenuKey;

    /// Source that serves a fixed record per user and counts fetches.
    #[derive(Clone)]
    struct FixtureSource {
        record: Option<MenuPreferences>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FixtureSource {
        fn serving(record: Option<MenuPreferences>) -> Self {
            Self {
                record,
                fail: false,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                record: None,
                fail: true,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PreferenceSource for FixtureSource {
        async fn fetch(
            &self,
            _staff_id: StaffUserId,
        ) -> Result<Option<MenuPreferences>, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(RepositoryError::NotFound)
            } else {
                Ok(self.record.clone())
            }
        }
    }

    #[tokio::test]
    async fn test_stored_record_is_returned() {
        let mut stored = MenuPreferences::default();
        stored.set(MenuKey::Employees, false);
        let loader = PreferenceLoader::new(FixtureSource::serving(Some(stored.clone())));

        assert_eq!(loader.load(StaffUserId::new(1)).await, stored);
    }

    #[tokio::test]
    async fn test_missing_record_falls_back_to_default() {
        let loader = PreferenceLoader::new(FixtureSource::serving(None));
        assert_eq!(
            loader.load(StaffUserId::new(1)).await,
            MenuPreferences::default()
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_default() {
        let loader = PreferenceLoader::new(FixtureSource::failing());
        assert_eq!(
            loader.load(StaffUserId::new(1)).await,
            MenuPreferences::default()
        );
    }

    #[tokio::test]
    async fn test_successful_reads_are_cached() {
        let source = FixtureSource::serving(None);
        let loader = PreferenceLoader::new(source.clone());

        loader.load(StaffUserId::new(1)).await;
        loader.load(StaffUserId::new(1)).await;
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = FixtureSource::failing();
        let loader = PreferenceLoader::new(source.clone());

        loader.load(StaffUserId::new(1)).await;
        loader.load(StaffUserId::new(1)).await;
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_a_refetch() {
        let source = FixtureSource::serving(None);
        let loader = PreferenceLoader::new(source.clone());

        loader.load(StaffUserId::new(1)).await;
        loader.invalidate(StaffUserId::new(1)).await;
        loader.load(StaffUserId::new(1)).await;
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_records_are_keyed_by_identity() {
        // A record cached for one user must never leak to another,
        // which is what makes a stale cross-identity overwrite
        // impossible by construction.
        let mut first = MenuPreferences::default();
        first.set(MenuKey::Holidays, false);
        let loader = PreferenceLoader::new(FixtureSource::serving(Some(first.clone())));

        assert_eq!(loader.load(StaffUserId::new(1)).await, first);
        // Second identity resolves through the source again rather than
        // reusing the first identity's cached record.
        assert_eq!(loader.load(StaffUserId::new(2)).await, first);
        assert_eq!(
            loader.cache.get(&StaffUserId::new(2)).await,
            Some(first)
        );
    }
}
