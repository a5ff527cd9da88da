//! Role-gated navigation model.
//!
//! The sidebar is data: a pure function from the current session to the
//! sections it may show. Rendering happens client-side; the portal only
//! decides visibility.

use serde::Serialize;

use openrad_client::Session;
use openrad_core::UserRole;

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
}

/// A navigation section: either a single link or a collapsible group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSection {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

impl NavSection {
    const fn link(title: &'static str, href: &'static str) -> Self {
        Self {
            title,
            href: Some(href),
            items: Vec::new(),
        }
    }

    fn group(title: &'static str, items: Vec<NavItem>) -> Self {
        Self {
            title,
            href: None,
            items,
        }
    }
}

/// The navigation sections visible to the given session.
///
/// - Dashboard and Profile are always visible.
/// - The Admin group requires app-admin capability.
/// - The Organization group requires org-admin capability; an org admin
///   whose session carries no organization sees nothing (the screens would
///   reject them anyway).
#[must_use]
pub fn navigation_for(session: Option<&Session>) -> Vec<NavSection> {
    let mut sections = vec![NavSection::link("Dashboard", "/")];

    let role = session.and_then(|s| s.user.role);

    if UserRole::grants_app_admin(role) {
        sections.push(NavSection::group(
            "Admin",
            vec![
                NavItem {
                    title: "Users",
                    href: "/admin/users",
                },
                NavItem {
                    title: "Organizations",
                    href: "/admin/organizations",
                },
            ],
        ));
    }

    let has_organization = session.is_some_and(|s| s.user.organization.is_some());
    let org_section_visible = match role {
        Some(UserRole::SuperAdmin) => true,
        Some(UserRole::OrgAdmin) => has_organization,
        _ => false,
    };
    if org_section_visible {
        sections.push(NavSection::group(
            "Organization",
            vec![
                NavItem {
                    title: "Edit Organization",
                    href: "/organization/edit",
                },
                NavItem {
                    title: "Manage Members",
                    href: "/organization/users",
                },
            ],
        ));
    }

    sections.push(NavSection::link("User Profile", "/profile"));
    sections
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use openrad_core::User;

    fn session_with(role: Option<&str>, organization: Option<&str>) -> Session {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u-1",
            "email": "doc@clinic.org",
            "firstName": "Grace",
            "lastName": "Hopper",
            "role": role,
            "organization": organization,
        }))
        .unwrap();
        Session::from_sign_in(user, "tok".to_string())
    }

    fn titles(sections: &[NavSection]) -> Vec<&'static str> {
        sections.iter().map(|s| s.title).collect()
    }

    #[test]
    fn test_member_sees_only_dashboard_and_profile() {
        let session = session_with(Some("MEMBER"), None);
        let sections = navigation_for(Some(&session));
        assert_eq!(titles(&sections), vec!["Dashboard", "User Profile"]);
    }

    #[test]
    fn test_app_admin_sees_admin_group() {
        let session = session_with(Some("APP_ADMIN"), None);
        let sections = navigation_for(Some(&session));
        assert_eq!(titles(&sections), vec!["Dashboard", "Admin", "User Profile"]);
    }

    #[test]
    fn test_super_admin_sees_everything() {
        let session = session_with(Some("SUPER_ADMIN"), None);
        let sections = navigation_for(Some(&session));
        assert_eq!(
            titles(&sections),
            vec!["Dashboard", "Admin", "Organization", "User Profile"]
        );
    }

    #[test]
    fn test_org_admin_without_organization_sees_no_org_group() {
        let session = session_with(Some("ORG_ADMIN"), None);
        let sections = navigation_for(Some(&session));
        assert_eq!(titles(&sections), vec!["Dashboard", "User Profile"]);
    }

    #[test]
    fn test_org_admin_with_organization_sees_org_group() {
        let session = session_with(Some("ORG_ADMIN"), Some("acme-health"));
        let sections = navigation_for(Some(&session));
        assert_eq!(
            titles(&sections),
            vec!["Dashboard", "Organization", "User Profile"]
        );
    }

    #[test]
    fn test_anonymous_gets_bare_navigation() {
        let sections = navigation_for(None);
        assert_eq!(titles(&sections), vec!["Dashboard", "User Profile"]);
    }
}
