//! Patient records and attached documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{DocumentId, PatientId};

/// Patient gender as reported by the DICOM server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A patient, addressable by internal ID or MRN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    /// Medical record number within the owning organization.
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Name of the organization that owns the record.
    pub organization: Option<String>,
}

impl Patient {
    /// Display name in "Last, First" order, as the worklist shows it.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// A non-imaging document attached to a patient (referrals, lab results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content_type: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_wire_shape() {
        let json = r#"{
            "id": "p-1",
            "mrn": "MRN-0042",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "gender": "FEMALE",
            "birthDate": "1815-12-10",
            "organization": "acme-health"
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.mrn, "MRN-0042");
        assert_eq!(patient.gender, Some(Gender::Female));
        assert_eq!(patient.display_name(), "Lovelace, Ada");
        assert!(patient.email.is_none());
    }
}
