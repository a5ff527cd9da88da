//! Patient lookup, search, and per-patient listings.

use openrad_core::{Document, Envelope, PageQuery, Paged, Patient, PatientId, SearchQuery, Study};

use super::path_segment;
use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Get a patient by ID or MRN, scoped to an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_patient(
        &self,
        patient_id: &PatientId,
        organization: &str,
    ) -> Result<Envelope<Patient>, ApiError> {
        self.get(&format!(
            "/patients/{}?organization={}",
            path_segment(patient_id.as_str()),
            urlencoding::encode(organization)
        ))
        .await
    }

    /// List patients, optionally filtered by MRN, name, or date of birth.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_patients(&self, query: &SearchQuery) -> Result<Paged<Patient>, ApiError> {
        self.get(&format!("/patients?{}", query.to_query_string()))
            .await
    }

    /// Get a patient's studies, paginated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_patient_studies(
        &self,
        patient_id: &PatientId,
        page: &PageQuery,
    ) -> Result<Paged<Study>, ApiError> {
        self.get(&format!(
            "/patients/{}/studies?{}",
            path_segment(patient_id.as_str()),
            page.to_query_string()
        ))
        .await
    }

    /// Get a patient's documents, paginated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_patient_documents(
        &self,
        patient_id: &PatientId,
        page: &PageQuery,
    ) -> Result<Paged<Document>, ApiError> {
        self.get(&format!(
            "/patients/{}/documents?{}",
            path_segment(patient_id.as_str()),
            page.to_query_string()
        ))
        .await
    }
}
