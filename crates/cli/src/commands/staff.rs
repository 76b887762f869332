//! Staff account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a staff account
//! fernhill-cli staff create -e jo@fernhill.dev -n "Jo Bloom" -r hr
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_DATABASE_URL` - `PostgreSQL` connection string for the portal
//!   (falls back to `DATABASE_URL`)

use fernhill_core::types::{Email, Role};
use sqlx::PgPool;

/// Errors that can occur during staff management.
#[derive(Debug, thiserror::Error)]
pub enum StaffError {
    /// Required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: hr, hod, staff, intern")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Account already exists.
    #[error("Staff account already exists with email: {0}")]
    AccountExists(String),
}

/// Create a new staff account.
///
/// # Arguments
///
/// * `email` - Staff email address
/// * `name` - Staff display name
/// * `role` - Staff role (`hr`, `hod`, `staff`, or `intern`)
///
/// # Returns
///
/// The ID of the created staff account.
pub async fn create(email: &str, name: &str, role: &str) -> Result<i32, StaffError> {
    dotenvy::dotenv().ok();

    // Parse and validate role
    let role: Role = role
        .parse()
        .map_err(|_| StaffError::InvalidRole(role.to_owned()))?;

    let email = Email::parse(email).map_err(|_| StaffError::InvalidEmail(email.to_owned()))?;

    let database_url = std::env::var("PORTAL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| StaffError::MissingEnvVar("PORTAL_DATABASE_URL"))?;

    tracing::info!("Connecting to portal database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating staff account: {} ({})", email, role);

    // Check if the account already exists
    let existing: Option<i32> =
        sqlx::query_scalar("SELECT id FROM portal.staff_user WHERE email = $1")
            .bind(&email)
            .fetch_optional(&pool)
            .await?;

    if existing.is_some() {
        return Err(StaffError::AccountExists(email.into_inner()));
    }

    // Create the account
    let staff_id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO portal.staff_user (email, name, role)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind(&email)
    .bind(name)
    .bind(role)
    .fetch_one(&pool)
    .await?;

    tracing::info!(
        "Staff account created successfully! ID: {}, Email: {}, Role: {}",
        staff_id,
        email,
        role
    );
    tracing::warn!(
        "Note: Sign-in is handled by the identity service. Make sure a matching identity account exists for this email."
    );

    Ok(staff_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_role_is_rejected_before_connecting() {
        let err = StaffError::InvalidRole("ceo".to_owned());
        assert!(err.to_string().contains("Valid roles: hr, hod, staff, intern"));
    }

    #[test]
    fn test_role_parse_accepts_all_portal_roles() {
        for raw in ["hr", "hod", "staff", "intern"] {
            assert!(raw.parse::<Role>().is_ok(), "{raw} should parse");
        }
        assert!("ceo".parse::<Role>().is_err());
    }
}
