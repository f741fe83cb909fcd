use super::record_kind::RecordKind;
use super::timestamp::{self, Timestamp};
use crate::shared::error::SyncError;
use crate::shared::Result;
use serde_json::Value;

/// Maximum accepted identifier length (security limit)
const MAX_ID_LENGTH: usize = 64;

/// Validated identifier of a mirrored record
///
/// Identifiers come from the API and end up in file names, so only the
/// documented shapes are accepted:
/// - CVE: `CVE-<4 digit year>-<4 or more digits>`
/// - CPE match criteria: a UUID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
    kind: RecordKind,
    value: String,
}

impl RecordId {
    pub fn new(kind: RecordKind, value: &str) -> Result<Self> {
        if value.is_empty() || value.len() > MAX_ID_LENGTH {
            return Err(invalid_id(kind, value, "length out of range"));
        }

        match kind {
            RecordKind::Cve => Self::validate_cve_id(value)?,
            RecordKind::CpeMatch => {
                // Only the plain hyphenated form; uuid also accepts braced and urn forms
                if value.len() != 36 || !value.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
                    return Err(invalid_id(kind, value, "expected a hyphenated UUID"));
                }
                uuid::Uuid::parse_str(value)
                    .map_err(|e| invalid_id(kind, value, &e.to_string()))?;
            }
        }

        Ok(Self {
            kind,
            value: value.to_string(),
        })
    }

    fn validate_cve_id(value: &str) -> Result<()> {
        let mut parts = value.split('-');
        let prefix = parts.next();
        let year = parts.next();
        let sequence = parts.next();

        let well_formed = prefix == Some("CVE")
            && year.is_some_and(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))
            && sequence.is_some_and(|s| s.len() >= 4 && s.chars().all(|c| c.is_ascii_digit()))
            && parts.next().is_none();

        if !well_formed {
            return Err(invalid_id(
                RecordKind::Cve,
                value,
                "expected CVE-YYYY-NNNN",
            ));
        }
        Ok(())
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Subdirectory grouping this record under its kind's storage root
    ///
    /// CVEs are grouped by year, match criteria by the first two characters
    /// of their UUID.
    pub fn bucket(&self) -> &str {
        match self.kind {
            RecordKind::Cve => self.value.split('-').nth(1).unwrap_or_default(),
            RecordKind::CpeMatch => &self.value[..2],
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

fn invalid_id(kind: RecordKind, value: &str, reason: &str) -> anyhow::Error {
    SyncError::Validation {
        message: format!("Invalid {} identifier '{}': {}", kind, value, reason),
    }
    .into()
}

/// A single record from an API page, kept verbatim
#[derive(Debug, Clone)]
pub struct Record {
    id: RecordId,
    last_modified: Timestamp,
    document: Value,
}

impl Record {
    /// Builds a record from one element of a page's result array
    pub fn from_document(kind: RecordKind, document: Value) -> Result<Self> {
        let inner = document.get(kind.object_key()).ok_or_else(|| {
            malformed(kind, format!("missing object '{}'", kind.object_key()))
        })?;

        let id = inner
            .get(kind.id_field())
            .and_then(Value::as_str)
            .ok_or_else(|| {
                malformed(
                    kind,
                    format!("missing field '{}.{}'", kind.object_key(), kind.id_field()),
                )
            })?;
        let id = RecordId::new(kind, id).map_err(|e| malformed(kind, e.to_string()))?;

        let last_modified = inner
            .get("lastModified")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                malformed(
                    kind,
                    format!("{}: missing field '{}.lastModified'", id, kind.object_key()),
                )
            })?;
        let last_modified = timestamp::parse_timestamp(last_modified)
            .map_err(|e| malformed(kind, format!("{}: {}", id, e)))?;

        Ok(Self {
            id,
            last_modified,
            document,
        })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn kind(&self) -> RecordKind {
        self.id.kind()
    }

    pub fn last_modified(&self) -> &Timestamp {
        &self.last_modified
    }

    pub fn document(&self) -> &Value {
        &self.document
    }
}

fn malformed(kind: RecordKind, details: String) -> anyhow::Error {
    SyncError::MalformedRecord {
        kind: kind.to_string(),
        details,
    }
    .into()
}
