//! Discharge workflow operations used by the CLI.
//!
//! - `discharge`: doctor verification, summary preparation, export, persistence
//! - `plan_files`: care-plan JSON loading for edited medication/diet plans

pub mod discharge;
pub mod plan_files;

pub use discharge::{export_report, list_patients, persist_summary, prepare_discharge, verify_doctor};
pub use plan_files::{load_plan, parse_plan};

use thiserror::Error;

use crate::registry::RegistryError;
use crate::report::ReportError;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Unknown doctor ID: {0}")]
    UnknownDoctor(String),

    #[error("No patients assigned to doctor {0}")]
    NoPatientsForDoctor(String),

    #[error("Patient {patient_id} is not assigned to doctor {doctor_id}")]
    PatientNotAssigned {
        patient_id: String,
        doctor_id: String,
    },

    #[error("Invalid care plan file {path}: {reason}")]
    PlanFile { path: String, reason: String },
}
