//! Menu preference settings route handlers.
//!
//! The settings page shows one checkbox per menu flag. Saving replaces
//! the whole stored record (absent checkbox means hidden) and drops
//! the cached copy so the sidebar reflects the change on the next
//! render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use fernhill_core::{MenuKey, MenuPreferences};

use crate::components::SidebarView;
use crate::filters;
use crate::db::PreferenceRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// One row on the settings page.
pub struct PreferenceRow {
    pub field: &'static str,
    pub label: &'static str,
    pub visible: bool,
}

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub sidebar: SidebarView,
    pub user_name: String,
    pub rows: Vec<PreferenceRow>,
    pub saved: bool,
}

/// Settings form data. HTML checkboxes only submit when checked, so
/// every field is optional; presence means visible.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub overview: Option<String>,
    pub profile: Option<String>,
    pub attendance: Option<String>,
    pub report: Option<String>,
    pub leave: Option<String>,
    pub salary: Option<String>,
    pub employees: Option<String>,
    pub departments: Option<String>,
    pub leave_approvals: Option<String>,
    pub attendance_management: Option<String>,
    pub holidays: Option<String>,
    pub salary_slips: Option<String>,
}

/// Query parameters for the saved banner.
#[derive(Debug, Deserialize)]
pub struct SavedQuery {
    #[serde(default)]
    pub saved: bool,
}

const FIELDS: [(&str, &str, MenuKey); 12] = [
    ("overview", "Overview", MenuKey::Overview),
    ("profile", "Profile", MenuKey::Profile),
    ("attendance", "Attendance", MenuKey::Attendance),
    ("report", "Report", MenuKey::Report),
    ("leave", "Leave", MenuKey::Leave),
    ("salary", "Salary", MenuKey::Salary),
    ("employees", "Employees", MenuKey::Employees),
    ("departments", "Departments", MenuKey::Departments),
    ("leave_approvals", "Leave Approvals", MenuKey::LeaveApprovals),
    (
        "attendance_management",
        "Attendance Mgmt",
        MenuKey::AttendanceManagement,
    ),
    ("holidays", "Holidays", MenuKey::Holidays),
    ("salary_slips", "Salary Slips", MenuKey::SalarySlips),
];

impl SettingsForm {
    fn into_preferences(self) -> MenuPreferences {
        let mut prefs = MenuPreferences::default();
        let values = [
            (MenuKey::Overview, self.overview),
            (MenuKey::Profile, self.profile),
            (MenuKey::Attendance, self.attendance),
            (MenuKey::Report, self.report),
            (MenuKey::Leave, self.leave),
            (MenuKey::Salary, self.salary),
            (MenuKey::Employees, self.employees),
            (MenuKey::Departments, self.departments),
            (MenuKey::LeaveApprovals, self.leave_approvals),
            (MenuKey::AttendanceManagement, self.attendance_management),
            (MenuKey::Holidays, self.holidays),
            (MenuKey::SalarySlips, self.salary_slips),
        ];
        for (key, value) in values {
            prefs.set(key, value.is_some());
        }
        prefs
    }
}

/// Display the menu preference settings.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    axum::extract::Query(query): axum::extract::Query<SavedQuery>,
) -> Result<impl IntoResponse> {
    let sidebar = super::sidebar(&state, &session, &user, "/settings").await;

    // The loader absorbs fetch failures into defaults, which is also
    // the right page to render here.
    let prefs = state.preferences().load(user.id).await;

    let rows = FIELDS
        .into_iter()
        .map(|(field, label, key)| PreferenceRow {
            field,
            label,
            visible: prefs.is_visible(key),
        })
        .collect();

    Ok(SettingsTemplate {
        sidebar,
        user_name: user.name,
        rows,
        saved: query.saved,
    })
}

/// Save the menu preferences.
pub async fn save(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<SettingsForm>,
) -> Response {
    let prefs = form.into_preferences();

    match PreferenceRepository::new(state.pool()).set(user.id, &prefs).await {
        Ok(()) => {
            state.preferences().invalidate(user.id).await;
            tracing::info!(staff_id = %user.id, "menu preferences saved");
            Redirect::to("/settings?saved=true").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, staff_id = %user.id, "preference save failed");
            Redirect::to("/settings").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_form() -> SettingsForm {
        SettingsForm {
            overview: None,
            profile: None,
            attendance: None,
            report: None,
            leave: None,
            salary: None,
            employees: None,
            departments: None,
            leave_approvals: None,
            attendance_management: None,
            holidays: None,
            salary_slips: None,
        }
    }

    #[test]
    fn test_absent_checkbox_means_hidden() {
        let prefs = empty_form().into_preferences();
        for key in MenuKey::ALL {
            assert!(!prefs.is_visible(key));
        }
    }

    #[test]
    fn test_present_checkbox_means_visible() {
        let mut form = empty_form();
        form.leave_approvals = Some("on".to_string());
        let prefs = form.into_preferences();
        assert!(prefs.is_visible(MenuKey::LeaveApprovals));
        assert!(!prefs.is_visible(MenuKey::Overview));
    }

    #[test]
    fn test_settings_page_lists_every_flag() {
        let keys: Vec<MenuKey> = FIELDS.into_iter().map(|(_, _, key)| key).collect();
        for key in MenuKey::ALL {
            assert!(keys.contains(&key));
        }
    }
}
