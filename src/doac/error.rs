//! DOAC error types

use thiserror::Error;

/// Errors that can occur while configuring the DOAC service
///
/// Clinical evaluation itself never fails: missing inputs yield `None` or
/// skipped checks.
#[derive(Error, Debug)]
pub enum DoacError {
    /// The scheme table does not hold exactly one scheme per drug
    #[error("Invalid scheme table: {reason}")]
    SchemeTable { reason: String },

    /// The scheme table could not be (de)serialized
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
