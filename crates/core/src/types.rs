use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Route of the scans listing, both on the backend and in the dashboard.
pub const SCANS_PATH: &str = "/scans";

/// JSON:API media type used for `Accept` and `Content-Type`.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Query parameter reserved for the free-text search term.
pub const SEARCH_FILTER_KEY: &str = "filter[search]";

/// Checks run by an on-demand scan.
pub const ON_DEMAND_CHECKS: &[&str] = &["accessanalyzer_enabled"];

/// Form field carrying the provider ID.
pub const PROVIDER_ID_FIELD: &str = "providerId";

/// Form field carrying the scan name.
pub const SCAN_NAME_FIELD: &str = "scanName";

/// Request to start a scan against a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCreateRequest {
    pub name: String,
    pub provider_id: String,
}

impl ScanCreateRequest {
    pub fn new(name: impl Into<String>, provider_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider_id: provider_id.into(),
        }
    }

    /// Build a request from submitted form fields.
    ///
    /// The first occurrence of `providerId` and `scanName` wins.
    pub fn from_form<I, K, V>(fields: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut provider_id = None;
        let mut name = None;

        for (key, value) in fields {
            match key.as_ref() {
                PROVIDER_ID_FIELD if provider_id.is_none() => provider_id = Some(value.into()),
                SCAN_NAME_FIELD if name.is_none() => name = Some(value.into()),
                _ => {}
            }
        }

        Ok(Self {
            provider_id: provider_id.ok_or(ValidationError::MissingField(PROVIDER_ID_FIELD))?,
            name: name.ok_or(ValidationError::MissingField(SCAN_NAME_FIELD))?,
        })
    }

    /// JSON:API document sent to `POST /scans`.
    pub fn to_document(&self) -> ScanCreateDocument {
        ScanCreateDocument {
            data: ScanCreateData {
                kind: "Scan".to_string(),
                attributes: ScanCreateAttributes {
                    name: self.name.clone(),
                    scanner_args: ScannerArgs {
                        checks_to_execute: ON_DEMAND_CHECKS.iter().map(|c| c.to_string()).collect(),
                    },
                },
                relationships: ScanRelationships {
                    provider: Relationship {
                        data: ResourceIdentifier {
                            kind: "Provider".to_string(),
                            id: self.provider_id.clone(),
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanCreateDocument {
    pub data: ScanCreateData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanCreateData {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: ScanCreateAttributes,
    pub relationships: ScanRelationships,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanCreateAttributes {
    pub name: String,
    pub scanner_args: ScannerArgs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerArgs {
    pub checks_to_execute: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRelationships {
    pub provider: Relationship,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub data: ResourceIdentifier,
}

/// JSON:API resource linkage (`{"type": ..., "id": ...}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Typed view over a scan listing document.
///
/// Listing calls return the raw [`Value`]; convert with
/// [`ScanListDocument::from_value`] when fields are needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanListDocument {
    #[serde(default)]
    pub data: Vec<ScanResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Value>,
}

impl ScanListDocument {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Total page count from `meta.pagination.pages`, when present.
    pub fn total_pages(&self) -> Option<u64> {
        self.meta
            .as_ref()?
            .get("pagination")?
            .get("pages")?
            .as_u64()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: ScanAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,
}

impl ScanResource {
    /// ID of the provider this scan ran against.
    pub fn provider_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()?
            .get("provider")?
            .get("data")?
            .get("id")?
            .as_str()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanAttributes {
    pub name: Option<String>,
    pub trigger: Option<String>,
    pub state: Option<String>,
    pub unique_resource_count: Option<u64>,
    pub progress: Option<u32>,
    pub duration: Option<u64>,
    pub scanner_args: Option<Value>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub inserted_at: Option<DateTime<Utc>>,
}

/// One entry of a JSON:API `errors` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorObject {
    pub detail: Option<String>,
    pub status: Option<String>,
    pub code: Option<String>,
    pub source: Option<Value>,
}

/// Extract the backend's error envelope, if the document carries one.
///
/// Responses are passed through as-is; this lets callers inspect them.
pub fn api_errors(document: &Value) -> Option<Vec<ApiErrorObject>> {
    let errors = document.get("errors")?;
    serde_json::from_value(errors.clone()).ok()
}
