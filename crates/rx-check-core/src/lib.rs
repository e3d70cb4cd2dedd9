//! Rx-Check Core Library
//!
//! Prescription verification against a fixed medication formulary.
//!
//! # Architecture
//!
//! ```text
//!  Patient form ──┐
//!                 │        ┌──────────────────────────────┐
//!  Image → OCR ───┼──────▶ │  Verifier                    │
//!   (shown only)  │        │  1. known medication?        │──▶ issues
//!  Manual entry ──┘        │  2. common dosage?           │
//!                          │  3. interactions             │──▶ instructions
//!                          │  4. allergy                  │
//!                          └──────────────┬───────────────┘
//!                                         │
//!                                         ▼
//!                               Printable instruction sheet
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (MedicationRecord, Patient, Prescription, Verification)
//! - [`formulary`]: Immutable medication table, built-in or loaded from JSON
//! - [`verifier`]: The verification checks
//! - [`export`]: Plain-text instruction sheet

pub mod export;
pub mod formulary;
pub mod models;
pub mod verifier;

// Re-export commonly used types
pub use export::InstructionSheet;
pub use formulary::{Formulary, FormularyError};
pub use models::{Issue, MedicationRecord, Patient, Prescription, Verification};
pub use verifier::{verify_prescription, Verifier};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum RxCheckError {
    #[error("Formulary error: {0}")]
    FormularyError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

impl From<formulary::FormularyError> for RxCheckError {
    fn from(e: formulary::FormularyError) -> Self {
        RxCheckError::FormularyError(e.to_string())
    }
}

impl From<export::ExportError> for RxCheckError {
    fn from(e: export::ExportError) -> Self {
        RxCheckError::ExportError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open the built-in formulary.
#[uniffi::export]
pub fn open_builtin_formulary() -> Arc<RxCheckCore> {
    Arc::new(RxCheckCore {
        formulary: Arc::new(Formulary::builtin()),
    })
}

/// Open a formulary from a JSON document.
#[uniffi::export]
pub fn open_formulary_json(json: String) -> Result<Arc<RxCheckCore>, RxCheckError> {
    let formulary = Formulary::from_json(&json)?;
    Ok(Arc::new(RxCheckCore {
        formulary: Arc::new(formulary),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Shared read-only formulary handle for FFI callers. No locking needed.
#[derive(uniffi::Object)]
pub struct RxCheckCore {
    formulary: Arc<Formulary>,
}

#[uniffi::export]
impl RxCheckCore {
    /// Verify a prescription for a patient.
    pub fn verify(
        &self,
        prescription: FfiPrescription,
        patient: FfiPatient,
    ) -> Result<FfiVerification, RxCheckError> {
        let prescription: Prescription = prescription.into();
        if !prescription.has_medication() {
            return Err(RxCheckError::InvalidInput(
                "Please enter a medication name.".into(),
            ));
        }
        let patient: Patient = patient.into();
        let verification = Verifier::new(&self.formulary).verify(&prescription, &patient);
        Ok(verification.into())
    }

    /// Build the printable instruction sheet, if the medication is known.
    pub fn instruction_sheet(
        &self,
        prescription: FfiPrescription,
        patient: FfiPatient,
    ) -> Option<FfiInstructionSheet> {
        let prescription: Prescription = prescription.into();
        let patient: Patient = patient.into();
        let verification = Verifier::new(&self.formulary).verify(&prescription, &patient);
        InstructionSheet::from_verification(&patient, &prescription, &verification)
            .map(Into::into)
    }

    /// Write the instruction sheet into a directory, returning the file path.
    pub fn export_instruction_sheet(
        &self,
        sheet: FfiInstructionSheet,
        dir: String,
    ) -> Result<String, RxCheckError> {
        let sheet: InstructionSheet = sheet.into();
        let path = sheet.write_to_dir(&dir)?;
        Ok(path.display().to_string())
    }

    /// Sorted medication names.
    pub fn medication_names(&self) -> Vec<String> {
        self.formulary.names().into_iter().map(String::from).collect()
    }

    /// Get a medication record by name.
    pub fn get_medication(&self, name: String) -> Option<FfiMedication> {
        let key = name.to_lowercase();
        self.formulary
            .get(&key)
            .map(|record| FfiMedication::from_record(key, record))
    }

    /// Closest known medication name for a misspelling.
    pub fn suggest(&self, name: String) -> Option<String> {
        self.formulary.suggest(&name).map(String::from)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe prescription.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescription {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
}

impl From<FfiPrescription> for Prescription {
    fn from(rx: FfiPrescription) -> Self {
        Prescription {
            medication: rx.medication,
            dosage: rx.dosage,
            frequency: rx.frequency,
        }
    }
}

/// FFI-safe patient. Lists are expected already lowercased.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub name: String,
    pub age: u32,
    pub current_medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl From<FfiPatient> for Patient {
    fn from(patient: FfiPatient) -> Self {
        Patient {
            name: patient.name,
            age: patient.age,
            current_medications: patient.current_medications,
            allergies: patient.allergies,
        }
    }
}

/// FFI-safe verification result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVerification {
    pub issues: Vec<String>,
    pub instructions: String,
}

impl From<Verification> for FfiVerification {
    fn from(verification: Verification) -> Self {
        let (issues, instructions) = verification.into_parts();
        Self {
            issues,
            instructions,
        }
    }
}

/// FFI-safe medication record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub name: String,
    pub common_dosages: Vec<String>,
    pub max_daily: String,
    pub interactions: Vec<String>,
    pub patient_instructions: String,
}

impl FfiMedication {
    fn from_record(name: String, record: &MedicationRecord) -> Self {
        Self {
            name,
            common_dosages: record.common_dosages.clone(),
            max_daily: record.max_daily.clone(),
            interactions: record.interactions.clone(),
            patient_instructions: record.patient_instructions.clone(),
        }
    }
}

/// FFI-safe instruction sheet.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInstructionSheet {
    pub file_name: String,
    pub patient_name: String,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub instructions: String,
    pub text: String,
}

impl From<InstructionSheet> for FfiInstructionSheet {
    fn from(sheet: InstructionSheet) -> Self {
        Self {
            file_name: sheet.file_name(),
            text: sheet.render(),
            patient_name: sheet.patient_name,
            medication: sheet.medication,
            dosage: sheet.dosage,
            frequency: sheet.frequency,
            instructions: sheet.instructions,
        }
    }
}

impl From<FfiInstructionSheet> for InstructionSheet {
    fn from(sheet: FfiInstructionSheet) -> Self {
        InstructionSheet {
            patient_name: sheet.patient_name,
            medication: sheet.medication,
            dosage: sheet.dosage,
            frequency: sheet.frequency,
            instructions: sheet.instructions,
        }
    }
}
