/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err($crate::models::ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

pub(crate) use str_enum;

// Column names as they appear in the registry header after normalization.
str_enum!(PatientField {
    PatientId => "patient_id",
    DoctorId => "doctor_id",
    FirstName => "first_name",
    LastName => "last_name",
    Gender => "gender",
    DateOfBirth => "date_of_birth",
    Age => "age",
    Sex => "sex",
    Disease => "disease",
    SymptomsText => "symptoms_text",
    LabSummary => "lab_summary",
    Address => "address",
    ContactNumber => "contact_number",
    Email => "email",
    RegistrationDate => "registration_date",
    InsuranceProvider => "insurance_provider",
    InsuranceNumber => "insurance_number",
    DoctorSummary => "doctor_summary",
});

impl PatientField {
    /// Fields shown as `Label: Value` lines in the report and the preview.
    /// The prior doctor summary is excluded: the narrative section carries it.
    pub const DISPLAYED: &'static [PatientField] = &[
        Self::PatientId,
        Self::DoctorId,
        Self::FirstName,
        Self::LastName,
        Self::Gender,
        Self::DateOfBirth,
        Self::Age,
        Self::Sex,
        Self::Disease,
        Self::SymptomsText,
        Self::LabSummary,
        Self::Address,
        Self::ContactNumber,
        Self::Email,
        Self::RegistrationDate,
        Self::InsuranceProvider,
        Self::InsuranceNumber,
    ];

    pub fn is_required(&self) -> bool {
        matches!(self, Self::PatientId | Self::DoctorId)
    }

    /// Human label: underscores become spaces, each word capitalized
    /// (`date_of_birth` → `Date Of Birth`).
    pub fn label(&self) -> String {
        column_label(self.as_str())
    }
}

/// Title-cases a snake_case column name.
pub fn column_label(column: &str) -> String {
    column
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn patient_field_round_trip() {
        for field in PatientField::ALL {
            assert_eq!(PatientField::from_str(field.as_str()).unwrap(), *field);
        }
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = PatientField::from_str("blood_type").unwrap_err();
        assert!(err.to_string().contains("blood_type"));
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(PatientField::DateOfBirth.label(), "Date Of Birth");
        assert_eq!(PatientField::SymptomsText.label(), "Symptoms Text");
        assert_eq!(PatientField::PatientId.label(), "Patient Id");
        assert_eq!(column_label("EMAIL"), "Email");
    }

    #[test]
    fn only_identifiers_are_required() {
        let required: Vec<_> = PatientField::ALL.iter().filter(|f| f.is_required()).collect();
        assert_eq!(required, vec![&PatientField::PatientId, &PatientField::DoctorId]);
    }

    #[test]
    fn displayed_fields_skip_doctor_summary() {
        assert!(!PatientField::DISPLAYED.contains(&PatientField::DoctorSummary));
        assert_eq!(PatientField::DISPLAYED.len(), PatientField::ALL.len() - 1);
    }
}
