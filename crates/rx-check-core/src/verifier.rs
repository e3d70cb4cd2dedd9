//! Prescription verification against the formulary.
//!
//! Checks, in order:
//! 1. Medication is known (short-circuits when it is not)
//! 2. Dosage is one of the common dosages
//! 3. No current medication interacts with it
//! 4. Patient is not allergic to it
//!
//! Frequency is carried through untouched; nothing validates it.

use crate::formulary::Formulary;
use crate::models::{Issue, Patient, Prescription, Verification};

/// Verifies prescriptions against a shared formulary.
pub struct Verifier<'a> {
    formulary: &'a Formulary,
}

impl<'a> Verifier<'a> {
    /// Create a new verifier.
    pub fn new(formulary: &'a Formulary) -> Self {
        Self { formulary }
    }

    /// Verify one prescription for a patient.
    pub fn verify(&self, prescription: &Prescription, patient: &Patient) -> Verification {
        let key = prescription.medication_key();

        let Some(record) = self.formulary.get(&key) else {
            tracing::debug!(medication = %prescription.medication, "Unknown medication");
            return Verification {
                issues: vec![Issue::UnknownMedication(prescription.medication.clone())],
                instructions: String::new(),
            };
        };

        let mut issues = Vec::new();

        if !record.accepts_dosage(&prescription.dosage) {
            issues.push(Issue::UnusualDosage(prescription.dosage.clone()));
        }

        issues.extend(
            patient
                .current_medications
                .iter()
                .filter(|med| record.interacts_with(med))
                .map(|med| Issue::Interaction(med.clone())),
        );

        if patient.is_allergic_to(&key) {
            issues.push(Issue::Allergy(prescription.medication.clone()));
        }

        tracing::debug!(
            medication = %key,
            issues = issues.len(),
            "Verified prescription"
        );

        Verification {
            issues,
            instructions: record.patient_instructions.clone(),
        }
    }

    /// Verify several prescriptions for the same patient.
    pub fn verify_all(&self, prescriptions: &[Prescription], patient: &Patient) -> Vec<Verification> {
        prescriptions
            .iter()
            .map(|rx| self.verify(rx, patient))
            .collect()
    }

    /// Get the formulary for direct access.
    pub fn formulary(&self) -> &'a Formulary {
        self.formulary
    }
}

/// Verify a prescription given as loose fields.
///
/// Returns (issue messages, instructions).
pub fn verify_prescription(
    medication: &str,
    dosage: &str,
    frequency: &str,
    patient: &Patient,
    formulary: &Formulary,
) -> (Vec<String>, String) {
    let prescription = Prescription::new(medication, dosage, frequency);
    Verifier::new(formulary)
        .verify(&prescription, patient)
        .into_parts()
}
