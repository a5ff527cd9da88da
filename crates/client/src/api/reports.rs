//! Radiology report reading, editing, and bookmarking.

use openrad_core::{BookmarkReport, Envelope, Report, ReportId, UpdateReport};

use super::path_segment;
use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Get a report by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn get_report(&self, id: &ReportId) -> Result<Envelope<Report>, ApiError> {
        self.get(&format!("/reports/{}", path_segment(id.as_str())))
            .await
    }

    /// Bookmark a report for the calling user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn bookmark_report(&self, command: &BookmarkReport) -> Result<Envelope<()>, ApiError> {
        self.post("/reports/bookmark", command).await
    }

    /// Update a report's narrative sections and findings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn update_report(&self, command: &UpdateReport) -> Result<Envelope<()>, ApiError> {
        self.put(
            &format!("/reports/{}", path_segment(command.id.as_str())),
            command,
        )
        .await
    }
}
