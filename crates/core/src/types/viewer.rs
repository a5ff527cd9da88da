//! OHIF viewer modes and the modality rules that select them.
//!
//! The viewer itself is an external service reached by URL; this module
//! only decides which of its modes a study's modalities can open.

use serde::{Deserialize, Serialize};

/// Modalities the basic viewer cannot display on its own.
const BASIC_VIEWER_EXCLUDED: &[&str] = &["SM", "ECG", "SR", "SEG", "RTSTRUC"];

/// Modalities the segmentation mode cannot work with.
const SEGMENTATION_EXCLUDED: &[&str] = &["SM", "US", "MG", "OT", "DOC", "CR"];

/// A mode of the external OHIF viewer, addressed as a URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerMode {
    Viewer,
    Segmentation,
    Microscopy,
    DynamicVolume,
    Tmtv,
}

impl ViewerMode {
    /// The URL path segment for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Segmentation => "segmentation",
            Self::Microscopy => "microscopy",
            Self::DynamicVolume => "dynamic-volume",
            Self::Tmtv => "tmtv",
        }
    }

    /// Human-readable label shown in the mode picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Viewer => "Basic Viewer",
            Self::Segmentation => "Segmentation",
            Self::Microscopy => "Microscopy",
            Self::DynamicVolume => "4D PT/CT",
            Self::Tmtv => "Total Metabolic Tumor Volume",
        }
    }

    /// The viewer modes a study with the given modality codes can open.
    ///
    /// `modalities` is the study's space-separated modality string, e.g.
    /// `"PT CT"`:
    /// - the basic viewer applies unless every modality is unviewable;
    /// - segmentation applies unless every modality is unsegmentable;
    /// - `tmtv` and `dynamic-volume` require both PT and CT;
    /// - microscopy requires SM to be the only modality.
    #[must_use]
    pub fn available_for(modalities: &str) -> Vec<Self> {
        let codes: Vec<&str> = modalities.split_whitespace().collect();
        let mut modes = Vec::new();

        if !codes.iter().all(|c| BASIC_VIEWER_EXCLUDED.contains(c)) {
            modes.push(Self::Viewer);
        }

        if !codes.iter().all(|c| SEGMENTATION_EXCLUDED.contains(c)) {
            modes.push(Self::Segmentation);
        }

        if codes.contains(&"PT") && codes.contains(&"CT") {
            modes.push(Self::Tmtv);
            modes.push(Self::DynamicVolume);
        }

        if codes == ["SM"] {
            modes.push(Self::Microscopy);
        }

        modes
    }
}

impl std::fmt::Display for ViewerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pt_ct_enables_tmtv_and_dynamic_volume() {
        let modes = ViewerMode::available_for("PT CT");
        assert_eq!(
            modes,
            vec![
                ViewerMode::Viewer,
                ViewerMode::Segmentation,
                ViewerMode::Tmtv,
                ViewerMode::DynamicVolume,
            ]
        );
    }

    #[test]
    fn test_single_sm_enables_microscopy_only() {
        let modes = ViewerMode::available_for("SM");
        assert_eq!(modes, vec![ViewerMode::Microscopy]);
    }

    #[test]
    fn test_sm_with_ct_is_not_microscopy() {
        let modes = ViewerMode::available_for("SM CT");
        assert!(modes.contains(&ViewerMode::Viewer));
        assert!(!modes.contains(&ViewerMode::Microscopy));
    }

    #[test]
    fn test_plain_ct() {
        let modes = ViewerMode::available_for("CT");
        assert_eq!(modes, vec![ViewerMode::Viewer, ViewerMode::Segmentation]);
    }

    #[test]
    fn test_cr_excluded_from_segmentation() {
        let modes = ViewerMode::available_for("CR");
        assert_eq!(modes, vec![ViewerMode::Viewer]);
    }

    #[test]
    fn test_mode_path_segments() {
        assert_eq!(ViewerMode::DynamicVolume.as_str(), "dynamic-volume");
        assert_eq!(ViewerMode::Tmtv.to_string(), "tmtv");
    }
}
