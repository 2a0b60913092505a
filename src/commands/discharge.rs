//! Doctor-facing discharge workflow.
//!
//! Order matches the interactive flow: verify the doctor, pick one of their
//! patients, prepare the summary (simulation, estimate, default plans), let the
//! caller edit it, then export the PDF and optionally persist the narrative.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::CommandError;
use crate::care_plan::CarePlanProvider;
use crate::models::{normalize_identifier, DischargeSummary, PatientRecord};
use crate::recovery::{estimate, simulate_for};
use crate::registry::PatientStore;
use crate::report;

/// Confirms the doctor has at least one patient. Returns the normalized id.
pub fn verify_doctor(store: &PatientStore, doctor_id: &str) -> Result<String, CommandError> {
    let id = normalize_identifier(doctor_id);
    if !store.has_doctor(&id) {
        tracing::warn!(doctor_id = %id, "Doctor verification failed");
        return Err(CommandError::UnknownDoctor(id));
    }
    tracing::info!(doctor_id = %id, "Doctor verified");
    Ok(id)
}

/// Patients assigned to a doctor, in registry order.
pub fn list_patients<'a>(
    store: &'a PatientStore,
    doctor_id: &str,
) -> Result<Vec<&'a PatientRecord>, CommandError> {
    let id = verify_doctor(store, doctor_id)?;
    Ok(store.find_by_doctor(&id))
}

/// Builds the editable discharge summary for one of the doctor's patients.
///
/// Fails before any simulation when the doctor has no patients or the patient
/// belongs to someone else.
pub fn prepare_discharge(
    store: &PatientStore,
    doctor_id: &str,
    patient_id: &str,
    provider: &dyn CarePlanProvider,
    prepared_on: NaiveDate,
) -> Result<DischargeSummary, CommandError> {
    let doctor_id = normalize_identifier(doctor_id);
    let patient_id = normalize_identifier(patient_id);

    if !store.has_doctor(&doctor_id) {
        return Err(CommandError::NoPatientsForDoctor(doctor_id));
    }

    let patient = store
        .get(&patient_id)
        .filter(|p| p.doctor_id == doctor_id)
        .ok_or_else(|| CommandError::PatientNotAssigned {
            patient_id: patient_id.clone(),
            doctor_id: doctor_id.clone(),
        })?
        .clone();

    let trajectory = simulate_for(&patient);
    let narrative = estimate(&patient, &trajectory);

    tracing::info!(
        patient_id = %patient.patient_id,
        doctor_id = %doctor_id,
        final_score = ?trajectory.final_score(),
        "Discharge summary prepared"
    );

    Ok(DischargeSummary {
        patient,
        trajectory,
        narrative,
        medications: provider.default_medications(),
        diet: provider.default_diet(),
        prepared_on,
    })
}

/// Renders the report and writes it under `out_dir`.
pub fn export_report(summary: &DischargeSummary, out_dir: &Path) -> Result<PathBuf, CommandError> {
    let report = report::render(summary)?;
    Ok(report.write_to_dir(out_dir)?)
}

/// Stores the (possibly edited) narrative in the registry and writes the
/// full table to `path`. The source registry file is left untouched.
pub fn persist_summary(
    store: &mut PatientStore,
    summary: &DischargeSummary,
    path: &Path,
) -> Result<(), CommandError> {
    store.update_summary(&summary.patient.patient_id, &summary.narrative)?;
    store.save_to(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::care_plan::StandardCarePlan;
    use crate::models::{Medication, PatientField};
    use crate::recovery::simulate;

    const REGISTRY: &str = "\
patient_id,doctor_id,first_name,last_name,disease,registration_date
ab12,d1,Asha,Rao,Typhoid,2024-01-10
CD34,D1,Ravi,Kumar,Dengue,N/A
EF56,D2,Meera,Iyer,Malaria,2024-02-27
";

    fn store() -> PatientStore {
        PatientStore::from_reader(REGISTRY.as_bytes()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()
    }

    #[test]
    fn verify_normalizes_and_rejects_unknown() {
        let store = store();
        assert_eq!(verify_doctor(&store, " d1 ").unwrap(), "D1");
        assert!(matches!(
            verify_doctor(&store, "D9"),
            Err(CommandError::UnknownDoctor(id)) if id == "D9"
        ));
        assert!(matches!(verify_doctor(&store, ""), Err(CommandError::UnknownDoctor(_))));
    }

    #[test]
    fn list_patients_in_table_order() {
        let store = store();
        let ids: Vec<&str> = list_patients(&store, "D1")
            .unwrap()
            .iter()
            .map(|p| p.patient_id.as_str())
            .collect();
        assert_eq!(ids, vec!["AB12", "CD34"]);
    }

    #[test]
    fn prepare_builds_full_summary() {
        let summary = prepare_discharge(&store(), "D1", "ab12", &StandardCarePlan, today()).unwrap();

        assert_eq!(summary.patient.patient_id, "AB12");
        assert_eq!(summary.trajectory, simulate("AB12", Some("2024-01-10")));
        assert!(summary.narrative.starts_with("Asha Rao "));
        assert_eq!(summary.medications.len(), 3);
        assert_eq!(summary.diet.len(), 3);
        assert_eq!(summary.prepared_on, today());
    }

    #[test]
    fn doctor_without_patients_is_rejected() {
        let err = prepare_discharge(&store(), "D9", "AB12", &StandardCarePlan, today()).unwrap_err();
        assert!(matches!(err, CommandError::NoPatientsForDoctor(id) if id == "D9"));

        let err = prepare_discharge(&store(), "  ", "AB12", &StandardCarePlan, today()).unwrap_err();
        assert!(matches!(err, CommandError::NoPatientsForDoctor(_)));
    }

    #[test]
    fn other_doctors_patient_is_rejected() {
        let err = prepare_discharge(&store(), "D1", "EF56", &StandardCarePlan, today()).unwrap_err();
        assert!(matches!(
            err,
            CommandError::PatientNotAssigned { ref patient_id, ref doctor_id }
                if patient_id == "EF56" && doctor_id == "D1"
        ));

        let err = prepare_discharge(&store(), "D1", "ZZ00", &StandardCarePlan, today()).unwrap_err();
        assert!(matches!(err, CommandError::PatientNotAssigned { .. }));
    }

    #[test]
    fn export_writes_named_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let summary = prepare_discharge(&store(), "D1", "CD34", &StandardCarePlan, today()).unwrap();

        let path = export_report(&summary, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("CD34_discharge_summary.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn persist_writes_edited_narrative() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("merged.csv");
        let mut store = store();

        let mut summary = prepare_discharge(&store, "D1", "AB12", &StandardCarePlan, today()).unwrap();
        summary.set_narrative("Stable, discharge approved");
        summary.medications.push(Medication::new("ORS", "1 sachet", "As needed"));
        persist_summary(&mut store, &summary, &out).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.lines().next().unwrap().ends_with(",doctor_summary"));
        assert!(written.contains("AB12,D1,Asha,Rao,Typhoid,2024-01-10,\"Stable, discharge approved\""));
        assert_eq!(
            store.get("AB12").unwrap().value(PatientField::DoctorSummary),
            Some("Stable, discharge approved")
        );
    }
}
