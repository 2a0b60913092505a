use serde::{Deserialize, Serialize};

use super::enums::PatientField;

/// One registry row. Identifiers are stored trimmed and upper-cased;
/// every other field is `None` when the column is absent or the cell blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub doctor_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: Option<String>,
    pub sex: Option<String>,
    pub disease: Option<String>,
    pub symptoms_text: Option<String>,
    pub lab_summary: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub registration_date: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,
    pub doctor_summary: Option<String>,
}

impl PatientRecord {
    pub fn new(patient_id: &str, doctor_id: &str) -> Self {
        Self {
            patient_id: normalize_identifier(patient_id),
            doctor_id: normalize_identifier(doctor_id),
            ..Self::default()
        }
    }

    /// Value of a field, `None` when not populated.
    pub fn value(&self, field: PatientField) -> Option<&str> {
        let value = match field {
            PatientField::PatientId => return non_empty(&self.patient_id),
            PatientField::DoctorId => return non_empty(&self.doctor_id),
            PatientField::FirstName => &self.first_name,
            PatientField::LastName => &self.last_name,
            PatientField::Gender => &self.gender,
            PatientField::DateOfBirth => &self.date_of_birth,
            PatientField::Age => &self.age,
            PatientField::Sex => &self.sex,
            PatientField::Disease => &self.disease,
            PatientField::SymptomsText => &self.symptoms_text,
            PatientField::LabSummary => &self.lab_summary,
            PatientField::Address => &self.address,
            PatientField::ContactNumber => &self.contact_number,
            PatientField::Email => &self.email,
            PatientField::RegistrationDate => &self.registration_date,
            PatientField::InsuranceProvider => &self.insurance_provider,
            PatientField::InsuranceNumber => &self.insurance_number,
            PatientField::DoctorSummary => &self.doctor_summary,
        };
        value.as_deref()
    }

    /// Sets a field from a raw cell. Identifiers are normalized, blank cells clear the field.
    pub fn set(&mut self, field: PatientField, raw: &str) {
        let cleaned = {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        let slot = match field {
            PatientField::PatientId => {
                self.patient_id = normalize_identifier(raw);
                return;
            }
            PatientField::DoctorId => {
                self.doctor_id = normalize_identifier(raw);
                return;
            }
            PatientField::FirstName => &mut self.first_name,
            PatientField::LastName => &mut self.last_name,
            PatientField::Gender => &mut self.gender,
            PatientField::DateOfBirth => &mut self.date_of_birth,
            PatientField::Age => &mut self.age,
            PatientField::Sex => &mut self.sex,
            PatientField::Disease => &mut self.disease,
            PatientField::SymptomsText => &mut self.symptoms_text,
            PatientField::LabSummary => &mut self.lab_summary,
            PatientField::Address => &mut self.address,
            PatientField::ContactNumber => &mut self.contact_number,
            PatientField::Email => &mut self.email,
            PatientField::RegistrationDate => &mut self.registration_date,
            PatientField::InsuranceProvider => &mut self.insurance_provider,
            PatientField::InsuranceNumber => &mut self.insurance_number,
            PatientField::DoctorSummary => &mut self.doctor_summary,
        };
        *slot = cleaned;
    }

    /// `First Last`, falling back to whichever part exists, then to the patient id.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [PatientField::FirstName, PatientField::LastName]
            .into_iter()
            .filter_map(|field| self.value(field))
            .collect();
        if parts.is_empty() {
            self.patient_id.clone()
        } else {
            parts.join(" ")
        }
    }

    /// Populated displayable fields in fixed order, as `(label, value)` pairs.
    pub fn populated_fields(&self) -> Vec<(String, &str)> {
        PatientField::DISPLAYED
            .iter()
            .filter_map(|field| self.value(*field).map(|value| (field.label(), value)))
            .collect()
    }
}

/// Trim + upper-case, as applied to patient and doctor identifiers.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_normalized() {
        let record = PatientRecord::new("  ab12 ", "d-7\t");
        assert_eq!(record.patient_id, "AB12");
        assert_eq!(record.doctor_id, "D-7");
    }

    #[test]
    fn blank_cells_clear_optional_fields() {
        let mut record = PatientRecord::new("P1", "D1");
        record.set(PatientField::Disease, "  Flu ");
        assert_eq!(record.value(PatientField::Disease), Some("Flu"));
        record.set(PatientField::Disease, "   ");
        assert_eq!(record.value(PatientField::Disease), None);
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut record = PatientRecord::new("P1", "D1");
        assert_eq!(record.display_name(), "P1");
        record.set(PatientField::LastName, "Rao");
        assert_eq!(record.display_name(), "Rao");
        record.set(PatientField::FirstName, "Asha");
        assert_eq!(record.display_name(), "Asha Rao");
    }

    #[test]
    fn populated_fields_skip_absent_values() {
        let mut record = PatientRecord::new("P1", "D1");
        record.set(PatientField::Email, "asha@example.org");
        record.set(PatientField::DoctorSummary, "Stable");
        let fields = record.populated_fields();
        assert_eq!(
            fields,
            vec![
                ("Patient Id".to_string(), "P1"),
                ("Doctor Id".to_string(), "D1"),
                ("Email".to_string(), "asha@example.org"),
            ]
        );
    }
}
