//! Navigation menu tables and the visibility resolver.
//!
//! The sidebar is driven by two fixed, declaration-ordered item tables
//! (employee set and management set) plus a per-user preference record
//! fetched from the document store. [`resolve_menu`] is the pure core:
//! given a role and a preference record it returns exactly the entries
//! to render, already filtered and in table order.
//!
//! Preference records live one-per-user and are replaced wholesale on
//! write. Keys absent from an older stored record deserialize as
//! visible, so features added after a record was last saved do not
//! silently disappear for existing users.

use serde::{Deserialize, Serialize};

use crate::types::{Role, RoleCategory};

/// The fixed set of feature keys a preference record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuKey {
    Overview,
    Profile,
    Attendance,
    Report,
    Leave,
    Salary,
    Employees,
    Departments,
    LeaveApprovals,
    AttendanceManagement,
    Holidays,
    SalarySlips,
}

impl MenuKey {
    /// Every known key, in no particular order of significance.
    pub const ALL: [Self; 12] = [
        Self::Overview,
        Self::Profile,
        Self::Attendance,
        Self::Report,
        Self::Leave,
        Self::Salary,
        Self::Employees,
        Self::Departments,
        Self::LeaveApprovals,
        Self::AttendanceManagement,
        Self::Holidays,
        Self::SalarySlips,
    ];
}

const fn default_visible() -> bool {
    true
}

/// Per-user menu visibility flags.
///
/// One record per user, keyed by identity in the document store. The
/// default (no stored record, or a failed fetch) is everything visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPreferences {
    #[serde(default = "default_visible")]
    pub overview: bool,
    #[serde(default = "default_visible")]
    pub profile: bool,
    #[serde(default = "default_visible")]
    pub attendance: bool,
    #[serde(default = "default_visible")]
    pub report: bool,
    #[serde(default = "default_visible")]
    pub leave: bool,
    #[serde(default = "default_visible")]
    pub salary: bool,
    #[serde(default = "default_visible")]
    pub employees: bool,
    #[serde(default = "default_visible")]
    pub departments: bool,
    #[serde(default = "default_visible")]
    pub leave_approvals: bool,
    #[serde(default = "default_visible")]
    pub attendance_management: bool,
    #[serde(default = "default_visible")]
    pub holidays: bool,
    #[serde(default = "default_visible")]
    pub salary_slips: bool,
}

impl Default for MenuPreferences {
    fn default() -> Self {
        Self {
            overview: true,
            profile: true,
            attendance: true,
            report: true,
            leave: true,
            salary: true,
            employees: true,
            departments: true,
            leave_approvals: true,
            attendance_management: true,
            holidays: true,
            salary_slips: true,
        }
    }
}

impl MenuPreferences {
    /// Look up the flag for a key.
    #[must_use]
    pub const fn is_visible(&self, key: MenuKey) -> bool {
        match key {
            MenuKey::Overview => self.overview,
            MenuKey::Profile => self.profile,
            MenuKey::Attendance => self.attendance,
            MenuKey::Report => self.report,
            MenuKey::Leave => self.leave,
            MenuKey::Salary => self.salary,
            MenuKey::Employees => self.employees,
            MenuKey::Departments => self.departments,
            MenuKey::LeaveApprovals => self.leave_approvals,
            MenuKey::AttendanceManagement => self.attendance_management,
            MenuKey::Holidays => self.holidays,
            MenuKey::SalarySlips => self.salary_slips,
        }
    }

    /// Set the flag for a key.
    pub fn set(&mut self, key: MenuKey, visible: bool) {
        match key {
            MenuKey::Overview => self.overview = visible,
            MenuKey::Profile => self.profile = visible,
            MenuKey::Attendance => self.attendance = visible,
            MenuKey::Report => self.report = visible,
            MenuKey::Leave => self.leave = visible,
            MenuKey::Salary => self.salary = visible,
            MenuKey::Employees => self.employees = visible,
            MenuKey::Departments => self.departments = visible,
            MenuKey::LeaveApprovals => self.leave_approvals = visible,
            MenuKey::AttendanceManagement => self.attendance_management = visible,
            MenuKey::Holidays => self.holidays = visible,
            MenuKey::SalarySlips => self.salary_slips = visible,
        }
    }
}

/// A static menu item declaration.
///
/// `gate` is an additional exact-role requirement on top of the
/// preference flag. Items without a gate only need their flag.
#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    /// Route the entry navigates to. Matched by string equality for
    /// active-item highlighting, never by pattern.
    pub path: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Icon key for the template layer.
    pub icon: &'static str,
    /// Preference flag controlling this item.
    pub key: MenuKey,
    /// Extra exact-role condition, if any.
    pub gate: Option<Role>,
}

impl MenuItem {
    const fn open(path: &'static str, label: &'static str, icon: &'static str, key: MenuKey) -> Self {
        Self {
            path,
            label,
            icon,
            key,
            gate: None,
        }
    }

    const fn hr_only(
        path: &'static str,
        label: &'static str,
        icon: &'static str,
        key: MenuKey,
    ) -> Self {
        Self {
            path,
            label,
            icon,
            key,
            gate: Some(Role::Hr),
        }
    }
}

/// Item set for staff and interns. Declaration order is render order.
pub const EMPLOYEE_ITEMS: [MenuItem; 6] = [
    MenuItem::open("/dashboard", "Overview", "layout-grid", MenuKey::Overview),
    MenuItem::open("/profile", "Profile", "user", MenuKey::Profile),
    MenuItem::open("/attendance", "Attendance", "clock", MenuKey::Attendance),
    MenuItem::open("/report", "Report", "bar-chart", MenuKey::Report),
    MenuItem::open("/leave", "Leave", "calendar-off", MenuKey::Leave),
    MenuItem::open("/salary", "Salary", "wallet", MenuKey::Salary),
];

/// Item set for HR, HODs, and any unresolved role. Declaration order is
/// render order. The HR-gated entries are invisible to HODs even when
/// their preference flags are set.
pub const MANAGEMENT_ITEMS: [MenuItem; 9] = [
    MenuItem::open("/dashboard", "Overview", "layout-grid", MenuKey::Overview),
    MenuItem::open("/attendance", "My Attendance", "clock", MenuKey::Attendance),
    MenuItem::open("/leave", "My Leave", "calendar-off", MenuKey::Leave),
    MenuItem::hr_only("/employees", "Employees", "users", MenuKey::Employees),
    MenuItem::hr_only("/departments", "Departments", "building", MenuKey::Departments),
    MenuItem::open(
        "/leave/approvals",
        "Leave Approvals",
        "check-square",
        MenuKey::LeaveApprovals,
    ),
    MenuItem::hr_only(
        "/attendance/manage",
        "Attendance Mgmt",
        "clipboard-list",
        MenuKey::AttendanceManagement,
    ),
    MenuItem::hr_only("/holidays", "Holidays", "sun", MenuKey::Holidays),
    MenuItem::hr_only(
        "/salary/slips",
        "Salary Slips",
        "file-text",
        MenuKey::SalarySlips,
    ),
];

/// A resolved navigation entry. Only visible entries are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Resolve the navigation entries for a user.
///
/// Pure function of its inputs. Set selection: staff and interns get the
/// employee set; everyone else, including an unresolved role, gets the
/// management set. An item is produced iff its preference flag is set
/// and, where the item carries a role gate, the role matches exactly.
///
/// Unknown roles never fail here: they simply resolve as management with
/// every gated item suppressed.
#[must_use]
pub fn resolve_menu(role: Option<Role>, prefs: &MenuPreferences) -> Vec<MenuEntry> {
    let category = role.map_or(RoleCategory::Management, Role::category);

    let items: &[MenuItem] = match category {
        RoleCategory::Employee => &EMPLOYEE_ITEMS,
        RoleCategory::Management => &MANAGEMENT_ITEMS,
    };

    items
        .iter()
        .filter(|item| prefs.is_visible(item.key))
        .filter(|item| item.gate.is_none_or(|gate| role == Some(gate)))
        .map(|item| MenuEntry {
            path: item.path,
            label: item.label,
            icon: item.icon,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn labels(role: Option<Role>, prefs: &MenuPreferences) -> Vec<&'static str> {
        resolve_menu(role, prefs).iter().map(|e| e.label).collect()
    }

    #[test]
    fn test_employee_roles_get_employee_set() {
        let prefs = MenuPreferences::default();
        for role in [Role::Staff, Role::Intern] {
            assert_eq!(
                labels(Some(role), &prefs),
                vec!["Overview", "Profile", "Attendance", "Report", "Leave", "Salary"]
            );
        }
    }

    #[test]
    fn test_hr_sees_all_nine_management_items_in_order() {
        let prefs = MenuPreferences::default();
        assert_eq!(
            labels(Some(Role::Hr), &prefs),
            vec![
                "Overview",
                "My Attendance",
                "My Leave",
                "Employees",
                "Departments",
                "Leave Approvals",
                "Attendance Mgmt",
                "Holidays",
                "Salary Slips",
            ]
        );
    }

    #[test]
    fn test_hod_never_sees_hr_gated_items() {
        let prefs = MenuPreferences::default();
        assert_eq!(
            labels(Some(Role::Hod), &prefs),
            vec!["Overview", "My Attendance", "My Leave", "Leave Approvals"]
        );
    }

    #[test]
    fn test_unresolved_role_gets_management_set_without_gated_items() {
        let prefs = MenuPreferences::default();
        assert_eq!(
            labels(None, &prefs),
            vec!["Overview", "My Attendance", "My Leave", "Leave Approvals"]
        );
    }

    #[test]
    fn test_preference_flag_hides_single_item() {
        let mut prefs = MenuPreferences::default();
        prefs.set(MenuKey::Employees, false);
        let got = labels(Some(Role::Hr), &prefs);
        assert_eq!(got.len(), 8);
        assert!(!got.contains(&"Employees"));
        assert!(got.contains(&"Departments"));
    }

    #[test]
    fn test_gated_flag_is_irrelevant_for_hod() {
        // Flipping an HR-gated flag changes nothing for a HOD.
        let mut prefs = MenuPreferences::default();
        prefs.set(MenuKey::Holidays, false);
        assert_eq!(
            labels(Some(Role::Hod), &prefs),
            labels(Some(Role::Hod), &MenuPreferences::default())
        );
    }

    #[test]
    fn test_all_flags_false_yields_empty_menu() {
        let mut prefs = MenuPreferences::default();
        for key in MenuKey::ALL {
            prefs.set(key, false);
        }
        assert!(resolve_menu(Some(Role::Hr), &prefs).is_empty());
        assert!(resolve_menu(Some(Role::Staff), &prefs).is_empty());
    }

    #[test]
    fn test_missing_keys_deserialize_visible() {
        // A record saved before new keys existed must not hide them.
        let prefs: MenuPreferences =
            serde_json::from_str(r#"{"overview": true, "employees": false}"#).unwrap();
        assert!(!prefs.employees);
        assert!(prefs.salary_slips);
        assert!(prefs.profile);
    }

    #[test]
    fn test_record_roundtrips_with_camel_case_keys() {
        let mut prefs = MenuPreferences::default();
        prefs.set(MenuKey::LeaveApprovals, false);
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["leaveApprovals"], serde_json::json!(false));
        assert_eq!(json["attendanceManagement"], serde_json::json!(true));
    }

    #[test]
    fn test_default_is_all_visible() {
        let prefs = MenuPreferences::default();
        for key in MenuKey::ALL {
            assert!(prefs.is_visible(key));
        }
    }

    #[test]
    fn test_paths_are_unique_within_each_set() {
        for set in [&EMPLOYEE_ITEMS[..], &MANAGEMENT_ITEMS[..]] {
            let mut paths: Vec<_> = set.iter().map(|i| i.path).collect();
            paths.sort_unstable();
            paths.dedup();
            assert_eq!(paths.len(), set.len());
        }
    }
}
