//! Sidebar navigation view model.
//!
//! Every page renders the sidebar, so the view model is built in one
//! place: resolve the menu for the signed-in user's role and
//! preference flags, then mark the entry whose path exactly matches
//! the current request path as active.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use fernhill_core::{MenuPreferences, Role, resolve_menu};

use crate::models::session_keys;

/// Expanded or collapsed presentation of the sidebar.
///
/// Stored in the session so the choice survives navigation but not
/// logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarMode {
    #[default]
    Expanded,
    Collapsed,
}

impl SidebarMode {
    /// The opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    /// Whether the sidebar is collapsed to icons only.
    #[must_use]
    pub const fn is_collapsed(self) -> bool {
        matches!(self, Self::Collapsed)
    }
}

/// Read the sidebar mode from the session, defaulting to expanded.
pub async fn sidebar_mode(session: &Session) -> SidebarMode {
    session
        .get::<SidebarMode>(session_keys::SIDEBAR_MODE)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the sidebar mode in the session.
///
/// # Errors
///
/// Returns an error if the session store write fails.
pub async fn set_sidebar_mode(
    session: &Session,
    mode: SidebarMode,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::SIDEBAR_MODE, mode).await
}

/// One rendered sidebar link.
#[derive(Debug, Clone)]
pub struct SidebarEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Fully resolved sidebar, ready for the template.
#[derive(Debug, Clone)]
pub struct SidebarView {
    pub entries: Vec<SidebarEntry>,
    pub mode: SidebarMode,
}

impl SidebarView {
    /// Build the sidebar for a user.
    ///
    /// `current_path` is matched exactly against entry paths, so
    /// `/leave/approvals` highlights its own entry rather than
    /// `/leave`.
    #[must_use]
    pub fn build(
        role: Option<Role>,
        preferences: &MenuPreferences,
        current_path: &str,
        mode: SidebarMode,
    ) -> Self {
        let entries = resolve_menu(role, preferences)
            .into_iter()
            .map(|item| SidebarEntry {
                path: item.path,
                label: item.label,
                icon: item.icon,
                active: item.path == current_path,
            })
            .collect();

        Self { entries, mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_paths(view: &SidebarView) -> Vec<&'static str> {
        view.entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.path)
            .collect()
    }

    #[test]
    fn test_exact_path_is_active() {
        let view = SidebarView::build(
            Some(Role::Staff),
            &MenuPreferences::default(),
            "/attendance",
            SidebarMode::Expanded,
        );
        assert_eq!(active_paths(&view), vec!["/attendance"]);
    }

    #[test]
    fn test_sub_path_does_not_highlight_parent() {
        let view = SidebarView::build(
            Some(Role::Hod),
            &MenuPreferences::default(),
            "/leave/approvals",
            SidebarMode::Expanded,
        );
        assert_eq!(active_paths(&view), vec!["/leave/approvals"]);
    }

    #[test]
    fn test_unlisted_path_has_no_active_entry() {
        let view = SidebarView::build(
            Some(Role::Staff),
            &MenuPreferences::default(),
            "/settings",
            SidebarMode::Expanded,
        );
        assert!(active_paths(&view).is_empty());
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(SidebarMode::Expanded.toggled(), SidebarMode::Collapsed);
        assert_eq!(SidebarMode::Expanded.toggled().toggled(), SidebarMode::Expanded);
    }
}
