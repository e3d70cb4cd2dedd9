//! Prescription models.

use serde::{Deserialize, Serialize};

/// A prescription as entered on the form or transcribed from an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    /// Medication name as given (any case)
    pub medication: String,
    /// Dosage string, compared verbatim
    pub dosage: String,
    /// Frequency, carried through for display only
    pub frequency: String,
}

impl Prescription {
    /// Create a new prescription.
    pub fn new(
        medication: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            medication: medication.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
        }
    }

    /// Formulary lookup key.
    pub fn medication_key(&self) -> String {
        self.medication.to_lowercase()
    }

    /// A prescription can only be verified once a medication name is entered.
    pub fn has_medication(&self) -> bool {
        !self.medication.trim().is_empty()
    }
}
