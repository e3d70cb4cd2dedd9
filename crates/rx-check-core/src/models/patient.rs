//! Patient models.

use serde::{Deserialize, Serialize};

/// Youngest age the intake form accepts.
pub const MIN_PATIENT_AGE: u32 = 18;

/// Oldest age the intake form accepts.
pub const MAX_PATIENT_AGE: u32 = 100;

/// A per-request patient record. Built fresh from form input, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Patient name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Current medications (lowercase), in the order entered
    pub current_medications: Vec<String>,
    /// Known allergies (lowercase)
    pub allergies: Vec<String>,
}

impl Patient {
    /// Create a patient with no medications or allergies.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            current_medications: Vec::new(),
            allergies: Vec::new(),
        }
    }

    /// Build a patient from raw form fields, parsing the comma-separated lists.
    pub fn from_form(name: &str, age: u32, current_medications: &str, allergies: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            current_medications: parse_list(current_medications),
            allergies: parse_list(allergies),
        }
    }

    /// Builder-style setter for current medications. Entries are used as given.
    pub fn with_medications<I, S>(mut self, meds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current_medications = meds.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style setter for allergies. Entries are used as given.
    pub fn with_allergies<I, S>(mut self, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergies = allergies.into_iter().map(Into::into).collect();
        self
    }

    /// Check for a listed allergy (exact match against the stored entries).
    pub fn is_allergic_to(&self, substance: &str) -> bool {
        self.allergies.iter().any(|a| a == substance)
    }
}

/// Split a comma-separated form field into trimmed, lowercase, non-empty entries.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}
