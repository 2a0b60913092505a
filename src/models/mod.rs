pub mod care_plan;
pub mod enums;
pub mod patient;
pub mod summary;
pub mod trajectory;

pub use care_plan::*;
pub use enums::PatientField;
pub use patient::*;
pub use summary::*;
pub use trajectory::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
