//! Edited care plans arrive as JSON arrays of entries, e.g.
//! `[{"name": "Paracetamol", "dosage": "500mg", "timing": "Twice a day"}]`.

use std::path::Path;

use serde::de::DeserializeOwned;

use super::CommandError;
use crate::models::CarePlan;

/// Reads a plan from a JSON file.
pub fn load_plan<E: DeserializeOwned>(path: &Path) -> Result<CarePlan<E>, CommandError> {
    let text = std::fs::read_to_string(path).map_err(|e| CommandError::PlanFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let plan = parse_plan(&text).map_err(|reason| CommandError::PlanFile {
        path: path.display().to_string(),
        reason,
    })?;
    tracing::debug!(path = %path.display(), entries = plan.len(), "Loaded care plan file");
    Ok(plan)
}

/// Parses a JSON array of plan entries. Entries are free text and not validated further.
pub fn parse_plan<E: DeserializeOwned>(json: &str) -> Result<CarePlan<E>, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietItem, DietPlan, Medication, MedicationPlan};

    #[test]
    fn parses_medication_array() {
        let plan: MedicationPlan = parse_plan(
            r#"[{"name": "Ibuprofen", "dosage": "200mg", "timing": "After meals"}]"#,
        )
        .unwrap();
        assert_eq!(plan.entries(), &[Medication::new("Ibuprofen", "200mg", "After meals")]);
    }

    #[test]
    fn accepts_table_style_keys() {
        let plan: DietPlan =
            parse_plan(r#"[{"Meal": "Snack", "Quantity": "1 fruit", "Timing": "4:00 PM"}]"#)
                .unwrap();
        assert_eq!(plan.entries(), &[DietItem::new("Snack", "1 fruit", "4:00 PM")]);
    }

    #[test]
    fn empty_array_is_an_empty_plan() {
        let plan: DietPlan = parse_plan("[]").unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meds.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_plan::<Medication>(&path).unwrap_err();
        match err {
            CommandError::PlanFile { path: p, .. } => assert!(p.ends_with("meds.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_plan_error() {
        let err = load_plan::<DietItem>(Path::new("/nonexistent/diet.json")).unwrap_err();
        assert!(matches!(err, CommandError::PlanFile { .. }));
    }
}
