//! Clients for external services.

pub mod identity;

pub use identity::{IdentityClient, IdentityError, IdentityProfile};
