use thiserror::Error;

use crate::data::InrError;
use crate::distribution::DistributionError;
use crate::doac::DoacError;
use crate::dosing::DosageError;

/// Any error raised by the crate
#[derive(Error, Debug)]
pub enum AnticoagError {
    #[error("INR data error: {0}")]
    Inr(#[from] InrError),
    #[error("Dosage error: {0}")]
    Dosage(#[from] DosageError),
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),
    #[error("DOAC error: {0}")]
    Doac(#[from] DoacError),
}
