use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::care_plan::{DietPlan, MedicationPlan};
use super::patient::PatientRecord;
use super::trajectory::RecoveryTrajectory;

/// Everything one discharge report is rendered from.
///
/// Built once per request, edited by the caller (narrative, plans),
/// then handed read-only to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeSummary {
    pub patient: PatientRecord,
    pub trajectory: RecoveryTrajectory,
    pub narrative: String,
    pub medications: MedicationPlan,
    pub diet: DietPlan,
    /// Shown in the title block and used for document metadata.
    pub prepared_on: NaiveDate,
}

impl DischargeSummary {
    pub fn set_narrative(&mut self, text: impl Into<String>) {
        self.narrative = text.into();
    }

    /// Conventional download name: `<patient_id>_discharge_summary.pdf`.
    pub fn report_file_name(&self) -> String {
        format!("{}_discharge_summary.pdf", self.patient.patient_id)
    }
}
