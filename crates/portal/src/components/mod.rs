//! Reusable view components shared across page templates.

pub mod sidebar;

pub use sidebar::{SidebarEntry, SidebarMode, SidebarView, set_sidebar_mode, sidebar_mode};
