//! Medication reference models.

use serde::{Deserialize, Serialize};

/// The fixed reference entry for one drug in the formulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationRecord {
    /// Accepted dosage strings, in display order (e.g., ["5mg", "10mg"])
    pub common_dosages: Vec<String>,
    /// Maximum daily dose, display only
    pub max_daily: String,
    /// Substances this medication interacts with (lowercase)
    pub interactions: Vec<String>,
    /// Instructions handed to the patient
    #[serde(default)]
    pub patient_instructions: String,
}

impl MedicationRecord {
    /// Create a record with no dosages, interactions or instructions.
    pub fn new(max_daily: impl Into<String>) -> Self {
        Self {
            common_dosages: Vec::new(),
            max_daily: max_daily.into(),
            interactions: Vec::new(),
            patient_instructions: String::new(),
        }
    }

    /// Builder-style setter for accepted dosages.
    pub fn with_dosages<I, S>(mut self, dosages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.common_dosages = dosages.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style setter for interacting substances.
    pub fn with_interactions<I, S>(mut self, interactions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interactions = interactions.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style setter for patient instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.patient_instructions = instructions.into();
        self
    }

    /// Exact, case-sensitive dosage match. "20mg" and "20 mg" differ.
    pub fn accepts_dosage(&self, dosage: &str) -> bool {
        self.common_dosages.iter().any(|d| d == dosage)
    }

    /// Check whether a substance is listed as interacting.
    pub fn interacts_with(&self, substance: &str) -> bool {
        self.interactions.iter().any(|i| i == substance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MedicationRecord {
        MedicationRecord::new("40mg")
            .with_dosages(["5mg", "10mg", "20mg"])
            .with_interactions(["potassium supplements", "spironolactone"])
            .with_instructions("Take once daily.")
    }

    #[test]
    fn test_accepts_dosage_exact() {
        let record = record();
        assert!(record.accepts_dosage("10mg"));
        assert!(!record.accepts_dosage("10MG"));
        assert!(!record.accepts_dosage("10 mg"));
        assert!(!record.accepts_dosage(""));
    }

    #[test]
    fn test_interacts_with() {
        let record = record();
        assert!(record.interacts_with("spironolactone"));
        assert!(!record.interacts_with("aspirin"));
    }

    #[test]
    fn test_missing_instructions_deserialize_empty() {
        let json = r#"{"common_dosages":["1mg"],"max_daily":"2mg","interactions":[]}"#;
        let record: MedicationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.patient_instructions, "");
    }
}
