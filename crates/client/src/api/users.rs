//! User administration and profile management.

use openrad_core::{
    Envelope, InviteUser, Paged, RegisterUser, Report, ReportId, RequestPasswordRecovery,
    ResetPassword, SearchQuery, UpdatePassword, UpdateProfile, UpdateUserOrg, UpdateUserRole,
    User, UserId, UserShortDetails, Organization,
};

use super::path_segment;
use crate::client::ApiClient;
use crate::error::ApiError;

/// User search with optional organization filters.
#[derive(Debug, Clone, Default)]
pub struct UserSearch {
    pub query: SearchQuery,
    /// Filter by organization name.
    pub organization_name: Option<String>,
    /// Filter by organization ID.
    pub organization_id: Option<String>,
}

impl UserSearch {
    #[must_use]
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            query: SearchQuery::new(search),
            organization_name: None,
            organization_id: None,
        }
    }

    fn org_params(&self) -> [(&'static str, Option<&str>); 2] {
        [
            ("organizationName", self.organization_name.as_deref()),
            ("organizationId", self.organization_id.as_deref()),
        ]
    }
}

impl ApiClient {
    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_user(&self, user_id: &UserId) -> Result<Envelope<User>, ApiError> {
        self.get(&format!("/users/{}", path_segment(user_id.as_str())))
            .await
    }

    /// Get the organization a user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_user_organization(
        &self,
        user_id: &UserId,
    ) -> Result<Envelope<Organization>, ApiError> {
        self.get(&format!(
            "/users/{}/organization",
            path_segment(user_id.as_str())
        ))
        .await
    }

    /// List users, optionally filtered by search term and organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_users(&self, search: &UserSearch) -> Result<Paged<User>, ApiError> {
        self.get(&format!(
            "/users?{}",
            search.query.to_params(&search.org_params())
        ))
        .await
    }

    /// Search users by free text, returning abbreviated records for
    /// autocomplete.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn search_users(
        &self,
        search: &UserSearch,
    ) -> Result<Paged<UserShortDetails>, ApiError> {
        self.get(&format!(
            "/users/search/{}?{}",
            path_segment(&search.query.search),
            search.query.page.to_params(&search.org_params())
        ))
        .await
    }

    /// Send an account-creation invitation to an email address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn invite_user(&self, command: &InviteUser) -> Result<Envelope<()>, ApiError> {
        self.post("/users/invite", command).await
    }

    /// Get the reports a user has bookmarked.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_user_bookmarked_reports(
        &self,
        user_id: &UserId,
    ) -> Result<Envelope<Vec<Report>>, ApiError> {
        self.get(&format!(
            "/users/{}/bookmarked-reports",
            path_segment(user_id.as_str())
        ))
        .await
    }

    /// Check whether a user has bookmarked a specific report.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn has_user_bookmarked_report(
        &self,
        user_id: &UserId,
        report_id: &ReportId,
    ) -> Result<Envelope<bool>, ApiError> {
        self.get(&format!(
            "/users/{}/bookmarked-reports/{}/exists",
            path_segment(user_id.as_str()),
            path_segment(report_id.as_str())
        ))
        .await
    }

    /// Complete a registration from an invitation token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn register_user(&self, command: &RegisterUser) -> Result<Envelope<()>, ApiError> {
        self.post("/users/register", command).await
    }

    /// Start the password-recovery flow.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn request_password_recovery(
        &self,
        command: &RequestPasswordRecovery,
    ) -> Result<Envelope<()>, ApiError> {
        self.post("/users/password/recovery", command).await
    }

    /// Complete the password-recovery flow with a mailed token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn reset_password(&self, command: &ResetPassword) -> Result<Envelope<()>, ApiError> {
        self.post("/users/password/reset", command).await
    }

    /// Change a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn update_user_role(
        &self,
        command: &UpdateUserRole,
    ) -> Result<Envelope<()>, ApiError> {
        self.put(
            &format!("/users/{}/role", path_segment(command.user_id.as_str())),
            command,
        )
        .await
    }

    /// Move a user into another organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn update_user_organization(
        &self,
        command: &UpdateUserOrg,
    ) -> Result<Envelope<()>, ApiError> {
        self.put(
            &format!(
                "/users/{}/organization",
                path_segment(command.user_id.as_str())
            ),
            command,
        )
        .await
    }

    /// Update profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn update_profile(&self, command: &UpdateProfile) -> Result<Envelope<()>, ApiError> {
        self.put(
            &format!("/users/{}/profile", path_segment(command.user_id.as_str())),
            command,
        )
        .await
    }

    /// Change a user's password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn update_password(
        &self,
        command: &UpdatePassword,
    ) -> Result<Envelope<()>, ApiError> {
        self.put(
            &format!("/users/{}/password", path_segment(command.user_id.as_str())),
            command,
        )
        .await
    }
}
