//! Study and series retrieval from the DICOM server, plus prediction
//! triggering.

use openrad_core::{Envelope, PatientId, PredictSeries, Series, Study, StudyInstanceUid};

use super::path_segment;
use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Retrieve a patient's studies from the organization's DICOM server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_studies(
        &self,
        patient_id: &PatientId,
        organization: &str,
    ) -> Result<Envelope<Vec<Study>>, ApiError> {
        self.get(&format!(
            "/studies?patientId={}&organization={}",
            urlencoding::encode(patient_id.as_str()),
            urlencoding::encode(organization)
        ))
        .await
    }

    /// Retrieve a study's series from the organization's DICOM server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_study_series(
        &self,
        study_id: &StudyInstanceUid,
        organization: &str,
    ) -> Result<Envelope<Vec<Series>>, ApiError> {
        self.get(&format!(
            "/studies/{}/series?organization={}",
            path_segment(study_id.as_str()),
            urlencoding::encode(organization)
        ))
        .await
    }

    /// Queue an AI prediction for a series.
    ///
    /// The backend answers immediately; progress is observed by re-reading
    /// the series list while any row reports `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn predict_series(&self, command: &PredictSeries) -> Result<Envelope<()>, ApiError> {
        self.post("/studies/series/predict", command).await
    }
}
