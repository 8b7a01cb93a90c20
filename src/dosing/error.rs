//! Dosing error types

use thiserror::Error;

use crate::distribution::DistributionError;

/// Errors that can occur during warfarin dose calculation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DosageError {
    /// An input is outside its valid domain; no suggestion is produced
    #[error("Invalid argument: {param} = {value}")]
    InvalidArgument { param: String, value: String },

    /// The weekly dose could not be split into daily doses
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}
