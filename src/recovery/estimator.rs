//! Recovery narrative from a simulated trajectory.

use serde::{Deserialize, Serialize};

use crate::config::FULL_RECOVERY_SCORE;
use crate::models::{PatientRecord, RecoveryTrajectory};

/// Wording used when the registry has no disease for the patient.
const UNKNOWN_DISEASE: &str = "an unspecified condition";

/// Outcome of the days-to-recovery estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RecoveryEstimate {
    /// Final score reached 100.
    FullyRecovered,
    /// Days still needed at the observed average daily gain.
    Recovering { days: u32 },
    /// Average daily gain is zero/negative or there are fewer than two points.
    Undetermined,
}

/// Classifies a trajectory.
///
/// Days = ceil((100 − final) / mean of successive differences). The mean of
/// successive differences telescopes to `(last − first) / (n − 1)`.
pub fn assess(trajectory: &RecoveryTrajectory) -> RecoveryEstimate {
    let scores = trajectory.scores();
    let (Some(&first), Some(&last)) = (scores.first(), scores.last()) else {
        return RecoveryEstimate::Undetermined;
    };

    if last >= FULL_RECOVERY_SCORE {
        return RecoveryEstimate::FullyRecovered;
    }
    if scores.len() < 2 {
        return RecoveryEstimate::Undetermined;
    }

    let average_gain = (f64::from(last) - f64::from(first)) / (scores.len() - 1) as f64;
    if average_gain <= 0.0 {
        return RecoveryEstimate::Undetermined;
    }

    let remaining = f64::from(FULL_RECOVERY_SCORE - last);
    let days = (remaining / average_gain).ceil() as u32;
    RecoveryEstimate::Recovering { days }
}

impl RecoveryEstimate {
    /// Patient-facing sentence for this outcome.
    pub fn narrative(&self, patient: &PatientRecord) -> String {
        let name = patient.display_name();
        let disease = patient.disease.as_deref().unwrap_or(UNKNOWN_DISEASE);
        match self {
            Self::FullyRecovered => format!("{name} has fully recovered from {disease}."),
            Self::Recovering { days } => {
                let unit = if *days == 1 { "day" } else { "days" };
                format!(
                    "{name} is recovering from {disease}. Full recovery estimated in {days} {unit}."
                )
            }
            Self::Undetermined => format!(
                "{name} is recovering from {disease}. Estimated time to full recovery is unknown."
            ),
        }
    }
}

/// Narrative for a patient's trajectory.
pub fn estimate(patient: &PatientRecord, trajectory: &RecoveryTrajectory) -> String {
    let outcome = assess(trajectory);
    if outcome == RecoveryEstimate::Undetermined {
        tracing::warn!(
            patient_id = %patient.patient_id,
            "Recovery estimate undefined for trajectory"
        );
    }
    outcome.narrative(patient)
}
