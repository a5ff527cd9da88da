//! User accounts and the commands that manage them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::role::UserRole;

/// A user account as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_phone: Option<String>,
    pub work_phone: Option<String>,
    #[serde(default, deserialize_with = "UserRole::deserialize_lenient")]
    pub role: Option<UserRole>,
    pub country: Option<String>,
    pub timezone: Option<String>,
    /// Name of the organization the user belongs to, if any.
    pub organization: Option<String>,
}

impl User {
    /// Initials shown in the avatar badge.
    #[must_use]
    pub fn initials(&self) -> String {
        let first = self.first_name.chars().next();
        let last = self.last_name.chars().next();
        first.into_iter().chain(last).collect()
    }
}

/// Abbreviated user record for autocomplete results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserShortDetails {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Command completing a registration from an invitation token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_number: Option<String>,
}

/// Command sending an account-creation invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteUser {
    pub email: Email,
    pub role: UserRole,
    pub organization: String,
}

/// Command changing a user's role; `organization` is required when granting
/// an organization-scoped role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRole {
    pub user_id: UserId,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

/// Command moving a user into another organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserOrg {
    pub user_id: UserId,
    pub organization: String,
}

/// Command updating profile fields; absent fields are unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Command changing the user's password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePassword {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

/// Command starting the password-recovery flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPasswordRecovery {
    pub email: Email,
}

/// Command completing the password-recovery flow with a mailed token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    pub token: String,
    pub password: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_unknown_role_is_none() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "u-1",
                "email": "doc@clinic.org",
                "firstName": "Grace",
                "lastName": "Hopper",
                "role": "CHIEF_WIZARD"
            }"#,
        )
        .unwrap();
        assert!(user.role.is_none());
        assert_eq!(user.initials(), "GH");
    }

    #[test]
    fn test_update_role_wire_shape() {
        let command = UpdateUserRole {
            user_id: "u-1".into(),
            role: UserRole::OrgAdmin,
            organization: Some("acme-health".into()),
        };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(
            json,
            r#"{"userId":"u-1","role":"ORG_ADMIN","organization":"acme-health"}"#
        );
    }

    #[test]
    fn test_initials_tolerate_empty_names() {
        let user = User {
            id: "u-2".into(),
            email: "x@y.z".into(),
            first_name: String::new(),
            last_name: "Curie".into(),
            mobile_phone: None,
            work_phone: None,
            role: Some(UserRole::Member),
            country: None,
            timezone: None,
            organization: None,
        };
        assert_eq!(user.initials(), "C");
    }
}
