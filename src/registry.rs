//! Patient/doctor registry loaded from a CSV table.
//!
//! Column names are trimmed and lower-cased; `patient_id` and `doctor_id`
//! values are trimmed and upper-cased so lookups match regardless of how the
//! table was typed. Unknown columns are carried through untouched so the
//! table can be written back with an edited summary.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::models::{normalize_identifier, PatientField, PatientRecord};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry is not valid tabular data: {0}")]
    DataFormat(String),

    #[error("Registry is missing required column `{column}`")]
    Schema { column: &'static str },

    #[error("Patient not found in registry: {0}")]
    UnknownPatient(String),

    #[error("Cannot write registry: {0}")]
    Write(String),
}

/// In-memory registry. Records are keyed by normalized patient id;
/// when an id repeats, the first row wins.
#[derive(Debug, Clone)]
pub struct PatientStore {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
    records: Vec<PatientRecord>,
    /// Row index in `rows` for each entry of `records`.
    record_rows: Vec<usize>,
    by_id: HashMap<String, usize>,
}

impl PatientStore {
    /// Opens and parses a CSV registry file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let file = File::open(path)?;
        let store = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            patients = store.records.len(),
            "Loaded patient registry"
        );
        Ok(store)
    }

    /// Parses CSV text from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| RegistryError::DataFormat(e.to_string()))?
            .iter()
            .map(normalize_column)
            .collect();

        if headers.iter().all(String::is_empty) {
            return Err(RegistryError::DataFormat("missing header row".into()));
        }

        let columns: Vec<Option<PatientField>> =
            headers.iter().map(|h| h.parse().ok()).collect();

        for required in [PatientField::PatientId, PatientField::DoctorId] {
            if !columns.contains(&Some(required)) {
                return Err(RegistryError::Schema {
                    column: required.as_str(),
                });
            }
        }

        let mut store = Self {
            headers,
            rows: Vec::new(),
            records: Vec::new(),
            record_rows: Vec::new(),
            by_id: HashMap::new(),
        };

        for (line, result) in rdr.records().enumerate() {
            let row = result.map_err(|e| RegistryError::DataFormat(e.to_string()))?;

            let mut record = PatientRecord::default();
            for (cell, column) in row.iter().zip(&columns) {
                if let Some(field) = column {
                    record.set(*field, cell);
                }
            }

            let row = normalize_identifier_cells(&row, &columns);
            let row_index = store.rows.len();
            store.rows.push(row);

            if record.patient_id.is_empty() {
                tracing::warn!(row = line + 2, "Skipping registry row without patient_id");
                continue;
            }
            if store.by_id.contains_key(&record.patient_id) {
                tracing::warn!(
                    row = line + 2,
                    patient_id = %record.patient_id,
                    "Duplicate patient_id, keeping first row"
                );
                continue;
            }

            store
                .by_id
                .insert(record.patient_id.clone(), store.records.len());
            store.records.push(record);
            store.record_rows.push(row_index);
        }

        Ok(store)
    }

    /// All patients in table order.
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a patient; the id is normalized first.
    pub fn get(&self, patient_id: &str) -> Option<&PatientRecord> {
        self.by_id
            .get(&normalize_identifier(patient_id))
            .map(|&i| &self.records[i])
    }

    /// Patients assigned to a doctor, in table order.
    pub fn find_by_doctor(&self, doctor_id: &str) -> Vec<&PatientRecord> {
        let doctor_id = normalize_identifier(doctor_id);
        self.records
            .iter()
            .filter(|r| r.doctor_id == doctor_id)
            .collect()
    }

    /// Whether any patient row names this doctor.
    pub fn has_doctor(&self, doctor_id: &str) -> bool {
        let doctor_id = normalize_identifier(doctor_id);
        !doctor_id.is_empty() && self.records.iter().any(|r| r.doctor_id == doctor_id)
    }

    /// Overwrites the stored doctor summary of one patient.
    /// Adds a `doctor_summary` column to the table if it had none.
    pub fn update_summary(&mut self, patient_id: &str, text: &str) -> Result<(), RegistryError> {
        let id = normalize_identifier(patient_id);
        let &index = self
            .by_id
            .get(&id)
            .ok_or_else(|| RegistryError::UnknownPatient(id.clone()))?;

        let column = self.summary_column();
        let row = &mut self.rows[self.record_rows[index]];
        let mut cells: Vec<String> = row.iter().map(String::from).collect();
        cells[column] = text.to_string();
        *row = csv::StringRecord::from(cells);

        self.records[index].set(PatientField::DoctorSummary, text);
        tracing::debug!(patient_id = %id, "Updated doctor summary");
        Ok(())
    }

    /// Writes the full table, normalized headers first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), RegistryError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)
            .map_err(|e| RegistryError::Write(e.to_string()))?;
        for row in &self.rows {
            wtr.write_record(row)
                .map_err(|e| RegistryError::Write(e.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), RegistryError> {
        let file = File::create(path)?;
        self.write_csv(file)?;
        tracing::info!(path = %path.display(), "Saved registry copy");
        Ok(())
    }

    fn summary_column(&mut self) -> usize {
        let name = PatientField::DoctorSummary.as_str();
        if let Some(pos) = self.headers.iter().position(|h| h == name) {
            return pos;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push_field("");
        }
        self.headers.len() - 1
    }
}

fn normalize_column(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The written-back table carries identifiers in their normalized form.
fn normalize_identifier_cells(
    row: &csv::StringRecord,
    columns: &[Option<PatientField>],
) -> csv::StringRecord {
    row.iter()
        .zip(columns)
        .map(|(cell, column)| match column {
            Some(field) if field.is_required() => normalize_identifier(cell),
            _ => cell.to_string(),
        })
        .collect()
}
