//! Credential records and the fields an operation may target

use serde::{Deserialize, Serialize};

/// A credential as stored on the ledger.
///
/// Always serialized with all four fields present. Missing fields in stored
/// JSON read back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    /// Who holds the credential
    pub subject_id: String,
    /// When it was awarded
    pub period: String,
    /// Degree or level attained
    pub credential_level: String,
    /// Who issued it
    pub issuing_institution: String,
}

impl Record {
    pub fn new(
        subject_id: impl Into<String>,
        period: impl Into<String>,
        credential_level: impl Into<String>,
        issuing_institution: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            period: period.into(),
            credential_level: credential_level.into(),
            issuing_institution: issuing_institution.into(),
        }
    }

    /// Decode a stored value for read-modify-write.
    ///
    /// Absent or malformed bytes decode to a blank record instead of failing.
    /// The second element reports whether that fallback was taken.
    pub fn decode_lenient(bytes: Option<&[u8]>) -> (Self, bool) {
        match bytes {
            Some(bytes) => match serde_json::from_slice(bytes) {
                Ok(record) => (record, false),
                Err(_) => (Self::default(), true),
            },
            None => (Self::default(), true),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Get/set access to one field of a [`Record`].
///
/// Read-modify-write code is written once against this trait rather than
/// once per field.
pub trait FieldSelector {
    /// JSON name of the field
    fn name(&self) -> &'static str;

    fn get<'r>(&self, record: &'r Record) -> &'r str;

    fn set(&self, record: &mut Record, value: String);
}

/// The four fields of a [`Record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SubjectId,
    Period,
    CredentialLevel,
    IssuingInstitution,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::SubjectId,
        Field::Period,
        Field::CredentialLevel,
        Field::IssuingInstitution,
    ];
}

impl FieldSelector for Field {
    fn name(&self) -> &'static str {
        match self {
            Field::SubjectId => "subjectId",
            Field::Period => "period",
            Field::CredentialLevel => "credentialLevel",
            Field::IssuingInstitution => "issuingInstitution",
        }
    }

    fn get<'r>(&self, record: &'r Record) -> &'r str {
        match self {
            Field::SubjectId => &record.subject_id,
            Field::Period => &record.period,
            Field::CredentialLevel => &record.credential_level,
            Field::IssuingInstitution => &record.issuing_institution,
        }
    }

    fn set(&self, record: &mut Record, value: String) {
        let slot = match self {
            Field::SubjectId => &mut record.subject_id,
            Field::Period => &mut record.period,
            Field::CredentialLevel => &mut record.credential_level,
            Field::IssuingInstitution => &mut record.issuing_institution,
        };
        *slot = value;
    }
}
