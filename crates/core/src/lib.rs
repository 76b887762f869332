//! Fernhill Core - Shared types library.
//!
//! This crate provides common types used across all Fernhill HR components:
//! - `portal` - Server-rendered HR portal (dashboards, attendance, leave, payroll, exits)
//! - `cli` - Command-line tools for migrations and staff management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and roles
//! - [`menu`] - Navigation menu tables and the visibility resolver

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod menu;
pub mod types;

pub use menu::{MenuEntry, MenuKey, MenuPreferences, resolve_menu};
pub use types::*;
