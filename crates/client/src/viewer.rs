//! URL building for the external OHIF viewer.
//!
//! The viewer is consumed purely by URL:
//! `{viewer_url}/{mode}?dicomUrl=…&StudyInstanceUIDs=…&SeriesInstanceUIDs=…`.
//! Which modes a study supports is decided by
//! [`openrad_core::ViewerMode::available_for`].

use thiserror::Error;
use url::Url;

use openrad_core::{SeriesInstanceUid, StudyInstanceUid, ViewerMode};

/// Errors building a viewer URL.
#[derive(Debug, Error)]
pub enum ViewerUrlError {
    /// The organization has no DICOM URL configured.
    #[error("no DICOM URL provided")]
    MissingDicomUrl,
    /// The configured viewer base URL does not parse.
    #[error("invalid viewer URL: {0}")]
    InvalidBase(#[from] url::ParseError),
}

/// Builds embed URLs for the external viewer.
#[derive(Debug, Clone)]
pub struct ViewerUrlBuilder {
    viewer_url: String,
}

impl ViewerUrlBuilder {
    #[must_use]
    pub fn new(viewer_url: impl Into<String>) -> Self {
        Self {
            viewer_url: viewer_url.into(),
        }
    }

    /// The URL opening `mode` on the study/series served by `dicom_url`.
    ///
    /// UID parameters are appended only when provided; the study browser
    /// omits the series UID to open a whole study.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerUrlError`] when `dicom_url` is empty or the viewer
    /// base does not parse.
    pub fn build(
        &self,
        mode: ViewerMode,
        dicom_url: &str,
        study: Option<&StudyInstanceUid>,
        series: Option<&SeriesInstanceUid>,
    ) -> Result<Url, ViewerUrlError> {
        if dicom_url.is_empty() {
            return Err(ViewerUrlError::MissingDicomUrl);
        }

        let mut url = Url::parse(&format!("{}/{}", self.viewer_url, mode.as_str()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("dicomUrl", dicom_url);
            if let Some(study) = study {
                query.append_pair("StudyInstanceUIDs", study.as_str());
            }
            if let Some(series) = series {
                query.append_pair("SeriesInstanceUIDs", series.as_str());
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn builder() -> ViewerUrlBuilder {
        ViewerUrlBuilder::new("https://viewer.openrad.test")
    }

    #[test]
    fn test_full_series_url() {
        let url = builder()
            .build(
                ViewerMode::Segmentation,
                "https://pacs.acme.test/dicomweb",
                Some(&"1.2.3".into()),
                Some(&"1.2.3.4".into()),
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://viewer.openrad.test/segmentation?dicomUrl=https%3A%2F%2Fpacs.acme.test%2Fdicomweb&StudyInstanceUIDs=1.2.3&SeriesInstanceUIDs=1.2.3.4"
        );
    }

    #[test]
    fn test_study_url_omits_series_parameter() {
        let url = builder()
            .build(
                ViewerMode::Viewer,
                "https://pacs.acme.test/dicomweb",
                Some(&"1.2.3".into()),
                None,
            )
            .unwrap();
        assert!(!url.as_str().contains("SeriesInstanceUIDs"));
        assert!(url.as_str().starts_with("https://viewer.openrad.test/viewer?"));
    }

    #[test]
    fn test_missing_dicom_url_is_an_error() {
        let result = builder().build(ViewerMode::Viewer, "", None, None);
        assert!(matches!(result, Err(ViewerUrlError::MissingDicomUrl)));
    }
}
