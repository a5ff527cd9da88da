//! Organization administration and DICOMWeb lookup.

use openrad_core::{
    CreateOrganization, DicomWebConfig, Envelope, InviteToOrg, JoinOrganization, OrgShortDetails,
    Organization, OrganizationId, Paged, SearchQuery, UpdateOrganization,
};

use super::path_segment;
use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Get an organization by ID or name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_organization(&self, id: &str) -> Result<Envelope<Organization>, ApiError> {
        self.get(&format!("/organizations/{}", path_segment(id)))
            .await
    }

    /// Get the DICOMWeb data-source block for an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_org_dicomweb(&self, id: &str) -> Result<Envelope<DicomWebConfig>, ApiError> {
        self.get(&format!("/organizations/{}/dicomweb", path_segment(id)))
            .await
    }

    /// List organizations, optionally filtered by search term.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_organizations(
        &self,
        query: &SearchQuery,
    ) -> Result<Paged<Organization>, ApiError> {
        self.get(&format!("/organizations?{}", query.to_query_string()))
            .await
    }

    /// Search organizations by free text, returning abbreviated records for
    /// autocomplete.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn search_organizations(
        &self,
        query: &SearchQuery,
    ) -> Result<Paged<OrgShortDetails>, ApiError> {
        self.get(&format!(
            "/organizations/search/{}?{}",
            path_segment(&query.search),
            query.page.to_query_string()
        ))
        .await
    }

    /// Send an invitation email to join an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn invite_to_organization(
        &self,
        command: &InviteToOrg,
    ) -> Result<Envelope<()>, ApiError> {
        self.post("/organizations/invite", command).await
    }

    /// Join an organization with an invitation token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn join_organization(
        &self,
        command: &JoinOrganization,
    ) -> Result<Envelope<()>, ApiError> {
        self.post("/organizations/join", command).await
    }

    /// Create an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn create_organization(
        &self,
        command: &CreateOrganization,
    ) -> Result<Envelope<()>, ApiError> {
        self.post("/organizations", command).await
    }

    /// Update an organization; absent fields stay unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn update_organization(
        &self,
        command: &UpdateOrganization,
    ) -> Result<Envelope<()>, ApiError> {
        self.put(
            &format!("/organizations/{}", path_segment(command.id.as_str())),
            command,
        )
        .await
    }

    /// Delete an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn delete_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Envelope<()>, ApiError> {
        self.delete(&format!("/organizations/{}", path_segment(id.as_str())))
            .await
    }
}
