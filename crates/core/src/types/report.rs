//! Radiology reports, findings, and annotations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{AnnotationId, FindingId, ReportId, SeriesId, SeriesInstanceUid, StudyInstanceUid, UserId};
use super::patient::Patient;
use super::user::User;

/// A radiology report attached to one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub clinical_info: Option<String>,
    pub indication: Option<String>,
    pub technique: Option<String>,
    pub impression: Option<String>,
    pub recommendation: Option<String>,
    pub patient: Patient,
    pub series_id: SeriesId,
    pub series_instance_uid: SeriesInstanceUid,
    pub study_instance_uid: StudyInstanceUid,
    pub modality: String,
    #[serde(default)]
    pub findings: Vec<Finding>,
    /// Set once the report has been signed; signed reports are read-only.
    pub signed_at: Option<DateTime<Utc>>,
    pub referring_physician: Option<User>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Whether the report can still be edited.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.signed_at.is_none()
    }
}

/// A single finding within a report, optionally produced by an AI model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: FindingId,
    pub title: String,
    pub description: Option<String>,
    /// Model confidence for AI-generated findings, in `[0, 1]`.
    pub prediction_probability: Option<f64>,
    /// Radiologist sign-off on an AI-generated finding.
    pub approved: Option<bool>,
    pub annotation: Option<Annotation>,
    pub report_id: ReportId,
}

/// A rectangular image annotation belonging to a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    pub title: String,
    pub description: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Anatomical location label, when known.
    pub location: Option<String>,
    /// Mean Hounsfield units inside the box, for CT.
    pub hu: Option<f64>,
}

/// Command updating a report's narrative sections and findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub id: ReportId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<Vec<UpdateFinding>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referring_physician_id: Option<UserId>,
}

/// Per-finding payload inside an [`UpdateReport`] command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFinding {
    pub id: FindingId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

/// Command bookmarking a report for the calling user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkReport {
    pub user_id: UserId,
    pub report_id: ReportId,
}
