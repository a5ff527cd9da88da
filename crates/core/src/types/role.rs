//! User roles and the capability checks derived from them.

use serde::{Deserialize, Serialize};

/// Application-wide user role, carried on the session and on user records.
///
/// Capability is monotonic: `SuperAdmin` and `AppAdmin` grant application
/// administration; `SuperAdmin` and `OrgAdmin` grant organization-scoped
/// administration. A missing or unknown role grants nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Full access everywhere, including every organization.
    SuperAdmin,
    /// Application administration: manage users and organizations.
    AppAdmin,
    /// Administration scoped to the user's own organization.
    OrgAdmin,
    /// Regular member with no administrative capability.
    Member,
}

impl UserRole {
    /// Whether this role grants application administration.
    #[must_use]
    pub const fn is_app_admin(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::AppAdmin)
    }

    /// Whether this role grants organization-scoped administration.
    ///
    /// The caller must additionally check that the session carries an
    /// organization; an org admin without one gets no access.
    #[must_use]
    pub const fn is_org_admin(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::OrgAdmin)
    }

    /// App-admin capability over an optional role, treating absence as no
    /// capability.
    #[must_use]
    pub const fn grants_app_admin(role: Option<Self>) -> bool {
        matches!(role, Some(Self::SuperAdmin | Self::AppAdmin))
    }

    /// Org-admin capability over an optional role, treating absence as no
    /// capability.
    #[must_use]
    pub const fn grants_org_admin(role: Option<Self>) -> bool {
        matches!(role, Some(Self::SuperAdmin | Self::OrgAdmin))
    }

    /// Lenient deserializer for role fields: unknown or absent role strings
    /// become `None` instead of failing the whole payload.
    ///
    /// Backend releases can introduce roles this build does not know about;
    /// such users are treated as having no capability.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|s| s.parse::<Self>().ok()))
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "SUPER_ADMIN"),
            Self::AppAdmin => write!(f, "APP_ADMIN"),
            Self::OrgAdmin => write!(f, "ORG_ADMIN"),
            Self::Member => write!(f, "MEMBER"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "APP_ADMIN" => Ok(Self::AppAdmin),
            "ORG_ADMIN" => Ok(Self::OrgAdmin),
            "MEMBER" => Ok(Self::Member),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_admin_capability() {
        assert!(UserRole::grants_app_admin(Some(UserRole::SuperAdmin)));
        assert!(UserRole::grants_app_admin(Some(UserRole::AppAdmin)));
        assert!(!UserRole::grants_app_admin(Some(UserRole::OrgAdmin)));
        assert!(!UserRole::grants_app_admin(Some(UserRole::Member)));
        assert!(!UserRole::grants_app_admin(None));
    }

    #[test]
    fn test_org_admin_capability() {
        assert!(UserRole::grants_org_admin(Some(UserRole::SuperAdmin)));
        assert!(UserRole::grants_org_admin(Some(UserRole::OrgAdmin)));
        assert!(!UserRole::grants_org_admin(Some(UserRole::AppAdmin)));
        assert!(!UserRole::grants_org_admin(None));
    }

    #[test]
    fn test_wire_values() {
        let json = serde_json::to_string(&UserRole::OrgAdmin).unwrap();
        assert_eq!(json, "\"ORG_ADMIN\"");
        let parsed: UserRole = serde_json::from_str("\"SUPER_ADMIN\"").unwrap();
        assert_eq!(parsed, UserRole::SuperAdmin);
    }

    #[test]
    fn test_display_fromstr_roundtrip() {
        for role in [
            UserRole::SuperAdmin,
            UserRole::AppAdmin,
            UserRole::OrgAdmin,
            UserRole::Member,
        ] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_lenient_deserialize_unknown_role() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "UserRole::deserialize_lenient")]
            role: Option<UserRole>,
        }

        let holder: Holder = serde_json::from_str(r#"{"role":"INTERGALACTIC_ADMIN"}"#).unwrap();
        assert!(holder.role.is_none());

        let holder: Holder = serde_json::from_str(r#"{"role":"APP_ADMIN"}"#).unwrap();
        assert_eq!(holder.role, Some(UserRole::AppAdmin));

        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.role.is_none());
    }
}
