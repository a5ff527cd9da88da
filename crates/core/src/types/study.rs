//! DICOM studies and series as the backend reports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ReportId, SeriesId, SeriesInstanceUid, StudyInstanceUid};
use super::patient::Patient;
use super::status::{MlModelType, PredictionStatus};

/// A DICOM study: one imaging encounter, grouping one or more series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    pub id: String,
    pub study_instance_uid: StudyInstanceUid,
    pub accession_number: Option<String>,
    pub study_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    /// Space-separated modality codes, e.g. `"PT CT"`.
    pub modalities: String,
    pub series_count: u32,
    pub instances_count: u32,
    pub patient: Patient,
}

impl Study {
    /// The study's modality codes, split and trimmed.
    #[must_use]
    pub fn modality_codes(&self) -> Vec<&str> {
        self.modalities.split_whitespace().collect()
    }
}

/// A series within a study, including its AI-prediction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: SeriesId,
    pub study_instance_uid: StudyInstanceUid,
    pub series_instance_uid: SeriesInstanceUid,
    pub series_number: u32,
    pub modality: String,
    pub description: Option<String>,
    pub body_part: Option<String>,
    pub instances_count: u32,
    pub series_date: Option<DateTime<Utc>>,
    pub prediction_status: PredictionStatus,
    pub prediction_accuracy: Option<f64>,
    pub prediction_output_file: Option<String>,
    pub report_id: Option<ReportId>,
}

/// Command that queues an AI prediction for a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictSeries {
    pub organization: String,
    pub study_instance_uid: StudyInstanceUid,
    pub series_instance_uid: SeriesInstanceUid,
    pub model_type: MlModelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_part: Option<String>,
    /// Re-run even when a terminal prediction already exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predict_again: Option<bool>,
}
