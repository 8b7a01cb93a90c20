//! Input value types
//!
//! Everything the engine consumes: INR observations and histories, therapeutic
//! ranges, patient snapshots and DOAC monitoring records. All types are plain
//! values; relations between them are by date or enum, never by reference.

pub mod builder;
pub mod inr_error;
pub mod observation;
pub mod patient;

pub use builder::InrHistoryBuilder;
pub use inr_error::InrError;
pub use observation::{InrHistory, InrObservation, RangePosition, TherapeuticRange, TherapyPhase};
pub use patient::{
    DoacDrug, DoacMonitoringRecord, Gender, Indication, LabValues, Patient, ThromboembolicRisk,
};
