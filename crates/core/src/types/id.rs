//! Newtype IDs for type-safe entity references.
//!
//! The backend identifies every entity by an opaque string (database IDs,
//! DICOM UIDs, MRNs all travel as strings on the wire). The `define_id!`
//! macro creates string-backed wrappers so a `PatientId` can never be passed
//! where a `ReportId` is expected.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use openrad_core::define_id;
/// define_id!(PatientId);
/// define_id!(ReportId);
///
/// let patient_id = PatientId::new("P-0001");
///
/// // These are different types, so this won't compile:
/// // let _: ReportId = patient_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(PatientId);
define_id!(UserId);
define_id!(OrganizationId);
define_id!(ReportId);
define_id!(SeriesId);
define_id!(DocumentId);
define_id!(FindingId);
define_id!(AnnotationId);

// DICOM instance identifiers; opaque here, interpreted only by the viewer
// and the DICOM server.
define_id!(StudyInstanceUid);
define_id!(SeriesInstanceUid);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = PatientId::new("P-0001");
        assert_eq!(id.as_str(), "P-0001");
        assert_eq!(id.to_string(), "P-0001");
        assert_eq!(id.clone().into_inner(), "P-0001");
    }

    #[test]
    fn test_serde_transparent() {
        let id = StudyInstanceUid::new("1.2.840.113619.2.55");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1.2.840.113619.2.55\"");

        let parsed: StudyInstanceUid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_str_and_string() {
        let a: ReportId = "r1".into();
        let b: ReportId = String::from("r1").into();
        assert_eq!(a, b);
    }
}
