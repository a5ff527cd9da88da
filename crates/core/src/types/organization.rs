//! Organizations and their DICOMWeb wiring.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::OrganizationId;
use super::role::UserRole;

/// An organization (hospital, clinic, imaging center).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: OrganizationId,
    /// Unique short name, also used as a route parameter.
    pub name: String,
    pub display_name: Option<String>,
    /// Root URL of the organization's DICOMWeb endpoint.
    pub dicom_url: String,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Abbreviated organization record for autocomplete results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgShortDetails {
    pub id: OrganizationId,
    pub name: String,
    pub display_name: Option<String>,
}

/// DICOMWeb data-source block the viewer needs to reach the
/// organization's PACS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DicomWebConfig {
    pub name: String,
    pub wado_uri_root: String,
    pub qido_root: String,
    pub wado_root: String,
    pub qido_supports_include_field: bool,
    pub supports_reject: bool,
    pub image_rendering: String,
    pub thumbnail_rendering: String,
    pub enable_study_lazy_load: bool,
    pub supports_fuzzy_matching: bool,
    pub supports_wildcard: bool,
}

/// Command creating a new organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganization {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub dicom_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Command updating an existing organization; absent fields are unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganization {
    pub id: OrganizationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dicom_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Command inviting a user into an organization by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteToOrg {
    pub email: Email,
    pub organization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Command redeeming an organization invitation token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinOrganization {
    pub token: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_update_command_omits_unchanged_fields() {
        let command = UpdateOrganization {
            id: "org-1".into(),
            name: None,
            display_name: Some("Acme Health".into()),
            dicom_url: None,
            website: None,
            email: None,
            address: None,
        };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"id":"org-1","displayName":"Acme Health"}"#);
    }

    #[test]
    fn test_dicomweb_config_wire_shape() {
        let json = r#"{
            "name": "acme",
            "wadoUriRoot": "https://pacs.acme.test/wado",
            "qidoRoot": "https://pacs.acme.test/qido",
            "wadoRoot": "https://pacs.acme.test/wado-rs",
            "qidoSupportsIncludeField": true,
            "supportsReject": false,
            "imageRendering": "wadors",
            "thumbnailRendering": "wadors",
            "enableStudyLazyLoad": true,
            "supportsFuzzyMatching": true,
            "supportsWildcard": false
        }"#;
        let config: DicomWebConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.qido_root, "https://pacs.acme.test/qido");
        assert!(config.enable_study_lazy_load);
    }
}
