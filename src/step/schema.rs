//! The wire/storage representation of a workflow, as the backend stores
//! and transports it. Everything else in the crate is derived from these
//! types and flattened back into them on save.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A 2-D canvas layout hint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single unit of automation work within a workflow.
///
/// `next` holds the ids of successor steps; the field is omitted entirely
/// (not serialized as an empty list) for terminal steps, so repeated saves
/// of an unchanged workflow produce byte-identical output. `position` is
/// optional, since steps authored outside the canvas may carry no layout
/// hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    /// Task kind, e.g. `"web_scrape"` or `"send_email"`. The set of valid
    /// kinds is backend-defined; the editor treats them as opaque.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub config: AHashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Step {
    /// Convenience constructor for a step with empty configuration.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            config: AHashMap::new(),
            next: None,
            position: None,
        }
    }
}

/// The complete workflow payload exchanged with the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub steps: Vec<Step>,
    #[serde(default)]
    pub variables: AHashMap<String, serde_json::Value>,
}

/// Lifecycle status of a workflow on the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Published,
}

/// Metadata echoed back by save and publish calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: WorkflowStatus,
}
