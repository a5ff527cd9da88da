//! Status enums for AI predictions.

use serde::{Deserialize, Serialize};

/// Lifecycle of an AI prediction on a series.
///
/// `InProgress` is the only transitional state; series grids poll the
/// backend while any row reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    #[default]
    NotStarted,
    InProgress,
    NotSupported,
    Failed,
    Canceled,
    Completed,
}

impl PredictionStatus {
    /// Whether the prediction is still running server-side.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Whether the status can still change without a new predict command.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::NotStarted | Self::InProgress)
    }
}

/// ML model selectable when triggering a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MlModelType {
    ChestXrayClassification,
    BrainTumorClassification,
    BrainTumorSegmentation,
    LungTumorSegmentation,
    AbdominalOrgansSegmentation,
}

impl std::fmt::Display for MlModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ChestXrayClassification => "chest_xray_classification",
            Self::BrainTumorClassification => "brain_tumor_classification",
            Self::BrainTumorSegmentation => "brain_tumor_segmentation",
            Self::LungTumorSegmentation => "lung_tumor_segmentation",
            Self::AbdominalOrgansSegmentation => "abdominal_organs_segmentation",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for MlModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chest_xray_classification" => Ok(Self::ChestXrayClassification),
            "brain_tumor_classification" => Ok(Self::BrainTumorClassification),
            "brain_tumor_segmentation" => Ok(Self::BrainTumorSegmentation),
            "lung_tumor_segmentation" => Ok(Self::LungTumorSegmentation),
            "abdominal_organs_segmentation" => Ok(Self::AbdominalOrgansSegmentation),
            _ => Err(format!("invalid ML model type: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        let json = serde_json::to_string(&PredictionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: PredictionStatus = serde_json::from_str("\"not_supported\"").unwrap();
        assert_eq!(parsed, PredictionStatus::NotSupported);
    }

    #[test]
    fn test_transitional_states() {
        assert!(PredictionStatus::InProgress.is_in_progress());
        assert!(!PredictionStatus::Completed.is_in_progress());

        assert!(!PredictionStatus::NotStarted.is_terminal());
        assert!(!PredictionStatus::InProgress.is_terminal());
        for status in [
            PredictionStatus::NotSupported,
            PredictionStatus::Failed,
            PredictionStatus::Canceled,
            PredictionStatus::Completed,
        ] {
            assert!(status.is_terminal());
        }
    }

    #[test]
    fn test_model_type_roundtrip() {
        let model: MlModelType = "brain_tumor_segmentation".parse().unwrap();
        assert_eq!(model, MlModelType::BrainTumorSegmentation);
        assert_eq!(model.to_string(), "brain_tumor_segmentation");
        assert!("resnet".parse::<MlModelType>().is_err());
    }
}
