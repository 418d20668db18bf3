//! Role-scoped navigation: which screens each role can reach.
//!
//! Pure functions over `(role, path)`. The UI shell calls these to build
//! its nav rail and to gate client-side navigation; the same tables back
//! the `/navigation` endpoints. Route sets are fixed per role and matched
//! exhaustively, so adding a role forces every table here to be revisited
//! at compile time.

use campus_db::entities::user::Role;
use serde::Serialize;

/// A named screen in the dashboard shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Dashboard,
    Students,
    StudentDetail,
    Programs,
    Registrations,
    Attendance,
    Finance,
    Quizzes,
    Grades,
    Invoices,
    Announcements,
    Settings,
}

/// One entry in a role's navigation rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    /// Route path, e.g. `/students`.
    pub path: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Screen the path renders.
    pub screen: Screen,
}

/// Outcome of resolving a requested path for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Resolution {
    /// The path is allowed; render this screen.
    Screen { screen: Screen },
    /// The path is outside the role's set; go to its default route.
    Redirect { to: &'static str },
    /// No authenticated session; go to the login entry point.
    Login,
}

/// Default landing route for every role.
pub const DEFAULT_ROUTE: &str = "/dashboard";

const ADMIN_NAV: &[NavEntry] = &[
    NavEntry { path: "/dashboard", label: "Dashboard", screen: Screen::Dashboard },
    NavEntry { path: "/students", label: "Students", screen: Screen::Students },
    NavEntry { path: "/programs", label: "Programs", screen: Screen::Programs },
    NavEntry { path: "/registrations", label: "Registrations", screen: Screen::Registrations },
    NavEntry { path: "/attendance", label: "Attendance", screen: Screen::Attendance },
    NavEntry { path: "/finance", label: "Finance", screen: Screen::Finance },
    NavEntry { path: "/announcements", label: "Announcements", screen: Screen::Announcements },
    NavEntry { path: "/settings", label: "Settings", screen: Screen::Settings },
];

const TEACHER_NAV: &[NavEntry] = &[
    NavEntry { path: "/dashboard", label: "Dashboard", screen: Screen::Dashboard },
    NavEntry { path: "/quizzes", label: "Quizzes", screen: Screen::Quizzes },
    NavEntry { path: "/students", label: "Students", screen: Screen::Students },
    NavEntry { path: "/announcements", label: "Announcements", screen: Screen::Announcements },
    NavEntry { path: "/settings", label: "Settings", screen: Screen::Settings },
];

const STUDENT_NAV: &[NavEntry] = &[
    NavEntry { path: "/dashboard", label: "Dashboard", screen: Screen::Dashboard },
    NavEntry { path: "/grades", label: "Grades", screen: Screen::Grades },
    NavEntry { path: "/invoices", label: "Invoices", screen: Screen::Invoices },
    NavEntry { path: "/announcements", label: "Announcements", screen: Screen::Announcements },
    NavEntry { path: "/settings", label: "Settings", screen: Screen::Settings },
];

/// The fixed navigation set for a role.
#[must_use]
pub const fn nav_entries(role: Role) -> &'static [NavEntry] {
    match role {
        Role::Admin => ADMIN_NAV,
        Role::Teacher => TEACHER_NAV,
        Role::Student => STUDENT_NAV,
    }
}

/// Resolve a requested path for the current session.
///
/// Unauthenticated requests always land on login. A path outside the
/// role's set never resolves to its screen; it redirects to the role's
/// dashboard instead.
#[must_use]
pub fn resolve(role: Option<Role>, requested_path: &str) -> Resolution {
    let Some(role) = role else {
        return Resolution::Login;
    };

    let path = normalize(requested_path);

    if path.is_empty() || path == "/" {
        return Resolution::Redirect { to: DEFAULT_ROUTE };
    }

    if let Some(entry) = nav_entries(role).iter().find(|entry| entry.path == path) {
        return Resolution::Screen {
            screen: entry.screen,
        };
    }

    // Student detail pages hang off /students but are not in the nav rail.
    // Only roles that list students may open them.
    if let Some(student_id) = path.strip_prefix("/students/") {
        let may_view = match role {
            Role::Admin | Role::Teacher => true,
            Role::Student => false,
        };
        if may_view && !student_id.is_empty() && !student_id.contains('/') {
            return Resolution::Screen {
                screen: Screen::StudentDetail,
            };
        }
    }

    Resolution::Redirect { to: DEFAULT_ROUTE }
}

/// Strip query string and trailing slashes so lookups are exact.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_always_goes_to_login() {
        assert_eq!(resolve(None, "/dashboard"), Resolution::Login);
        assert_eq!(resolve(None, "/registrations"), Resolution::Login);
        assert_eq!(resolve(None, "/"), Resolution::Login);
    }

    #[test]
    fn test_every_role_has_a_dashboard() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert_eq!(
                resolve(Some(role), "/dashboard"),
                Resolution::Screen {
                    screen: Screen::Dashboard
                }
            );
        }
    }

    #[test]
    fn test_root_redirects_to_dashboard() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert_eq!(
                resolve(Some(role), "/"),
                Resolution::Redirect { to: DEFAULT_ROUTE }
            );
        }
    }

    #[test]
    fn test_out_of_role_path_never_resolves_to_its_screen() {
        // Every path from every other role's nav set either redirects or
        // resolves to a screen the role also owns (shared names).
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            let own: Vec<&str> = nav_entries(role).iter().map(|e| e.path).collect();
            for other in [Role::Admin, Role::Teacher, Role::Student] {
                for entry in nav_entries(other) {
                    if own.contains(&entry.path) {
                        continue;
                    }
                    assert_eq!(
                        resolve(Some(role), entry.path),
                        Resolution::Redirect { to: DEFAULT_ROUTE },
                        "{role:?} must not reach {}",
                        entry.path,
                    );
                }
            }
        }
    }

    #[test]
    fn test_student_cannot_reach_admin_screens() {
        for path in ["/registrations", "/finance", "/programs", "/attendance"] {
            assert_eq!(
                resolve(Some(Role::Student), path),
                Resolution::Redirect { to: DEFAULT_ROUTE }
            );
        }
    }

    #[test]
    fn test_teacher_cannot_reach_finance_or_registrations() {
        for path in ["/finance", "/registrations"] {
            assert_eq!(
                resolve(Some(Role::Teacher), path),
                Resolution::Redirect { to: DEFAULT_ROUTE }
            );
        }
    }

    #[test]
    fn test_student_detail_for_admin_and_teacher_only() {
        assert_eq!(
            resolve(Some(Role::Admin), "/students/stu-001"),
            Resolution::Screen {
                screen: Screen::StudentDetail
            }
        );
        assert_eq!(
            resolve(Some(Role::Teacher), "/students/stu-001"),
            Resolution::Screen {
                screen: Screen::StudentDetail
            }
        );
        assert_eq!(
            resolve(Some(Role::Student), "/students/stu-001"),
            Resolution::Redirect { to: DEFAULT_ROUTE }
        );
    }

    #[test]
    fn test_unknown_path_redirects() {
        assert_eq!(
            resolve(Some(Role::Admin), "/does-not-exist"),
            Resolution::Redirect { to: DEFAULT_ROUTE }
        );
    }

    #[test]
    fn test_normalization_of_trailing_slash_and_query() {
        assert_eq!(
            resolve(Some(Role::Admin), "/students/"),
            Resolution::Screen {
                screen: Screen::Students
            }
        );
        assert_eq!(
            resolve(Some(Role::Admin), "/finance?month=2026-02"),
            Resolution::Screen {
                screen: Screen::Finance
            }
        );
    }

    #[test]
    fn test_nav_entries_are_role_disjoint_where_expected() {
        let admin: Vec<&str> = nav_entries(Role::Admin).iter().map(|e| e.path).collect();
        assert!(admin.contains(&"/registrations"));

        let student: Vec<&str> = nav_entries(Role::Student).iter().map(|e| e.path).collect();
        assert!(!student.contains(&"/registrations"));
        assert!(!student.contains(&"/students"));

        let teacher: Vec<&str> = nav_entries(Role::Teacher).iter().map(|e| e.path).collect();
        assert!(teacher.contains(&"/quizzes"));
        assert!(!teacher.contains(&"/finance"));
    }
}
