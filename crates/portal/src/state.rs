//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::PortalConfig;
use crate::navigation::{PgPreferenceSource, PortalPreferenceLoader, PreferenceLoader};
use crate::services::{IdentityClient, IdentityError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    pool: PgPool,
    identity: IdentityClient,
    preferences: PortalPreferenceLoader,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity service client cannot be built.
    pub fn new(config: PortalConfig, pool: PgPool) -> Result<Self, IdentityError> {
        let identity = IdentityClient::new(&config.identity)?;
        let preferences = PreferenceLoader::new(PgPreferenceSource::new(pool.clone()));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identity,
                preferences,
            }),
        })
    }

    /// Get a reference to the portal configuration.
    #[must_use]
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity service client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }

    /// Get a reference to the menu preference loader.
    #[must_use]
    pub fn preferences(&self) -> &PortalPreferenceLoader {
        &self.inner.preferences
    }
}
