//! Error type for the fallible JSON entry points.
//!
//! Everything found *inside* a workflow document is reported as a
//! `ValidationIssue`, never as an error; this type only covers input that is
//! not deserializable at all.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to deserialize workflow JSON: {0}")]
    Json(#[from] serde_json::Error),
}
