//! Printable instruction sheet for the patient.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Patient, Prescription, Verification};

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Plain-text summary of a verified prescription, offered as a download.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstructionSheet {
    pub patient_name: String,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub instructions: String,
}

impl InstructionSheet {
    /// Build a sheet from a verification outcome.
    ///
    /// Returns `None` when there are no instructions to hand out, i.e. the
    /// medication was unknown.
    pub fn from_verification(
        patient: &Patient,
        prescription: &Prescription,
        verification: &Verification,
    ) -> Option<Self> {
        if verification.instructions.is_empty() {
            return None;
        }
        Some(Self {
            patient_name: patient.name.clone(),
            medication: prescription.medication.clone(),
            dosage: prescription.dosage.clone(),
            frequency: prescription.frequency.clone(),
            instructions: verification.instructions.clone(),
        })
    }

    /// Download file name: `<patient_name>_instructions.txt`.
    pub fn file_name(&self) -> String {
        format!("{}_instructions.txt", self.patient_name)
    }

    /// Render the sheet as plain text.
    pub fn render(&self) -> String {
        format!(
            "Patient: {}\nMedication: {}\nDosage: {}\nFrequency: {}\n\nInstructions: {}",
            self.patient_name, self.medication, self.dosage, self.frequency, self.instructions
        )
    }

    /// Write the rendered sheet into `dir`, returning the file path.
    ///
    /// Fails with [`ExportError::InvalidFileName`] when the patient name would
    /// place the file outside `dir` (path separators or NUL).
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> ExportResult<PathBuf> {
        let file_name = self.file_name();
        if self
            .patient_name
            .contains(|c: char| matches!(c, '/' | '\\' | '\0'))
        {
            return Err(ExportError::InvalidFileName(file_name));
        }
        let path = dir.as_ref().join(file_name);
        std::fs::write(&path, self.render())?;
        tracing::info!(path = %path.display(), "Wrote instruction sheet");
        Ok(path)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
