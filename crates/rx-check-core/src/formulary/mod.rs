//! Medication formulary: the read-only reference table verification runs against.
//!
//! A formulary is built once at startup (from the built-in table or a JSON
//! file) and never mutated afterwards, so it can be shared freely between
//! callers by reference or behind an `Arc`.

mod builtin;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use strsim::jaro_winkler;
use thiserror::Error;

use crate::models::MedicationRecord;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Formulary errors.
#[derive(Error, Debug)]
pub enum FormularyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate medication: {0}")]
    Duplicate(String),

    #[error("Medication name must not be empty")]
    EmptyName,
}

pub type FormularyResult<T> = Result<T, FormularyError>;

/// Immutable map from lowercase medication name to its reference record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formulary {
    records: HashMap<String, MedicationRecord>,
}

impl Formulary {
    /// The built-in four-drug table.
    pub fn builtin() -> Self {
        Self {
            records: builtin::records(),
        }
    }

    /// Build a formulary from (name, record) pairs. Names are lowercased.
    pub fn from_records<I, S>(records: I) -> FormularyResult<Self>
    where
        I: IntoIterator<Item = (S, MedicationRecord)>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (name, record) in records {
            let key = name.as_ref().trim().to_lowercase();
            if key.is_empty() {
                return Err(FormularyError::EmptyName);
            }
            if map.insert(key.clone(), record).is_some() {
                return Err(FormularyError::Duplicate(key));
            }
        }
        Ok(Self { records: map })
    }

    /// Parse a formulary from a JSON object keyed by medication name.
    ///
    /// ```json
    /// { "aspirin": { "common_dosages": ["81mg"], "max_daily": "4000mg",
    ///                "interactions": ["ibuprofen"], "patient_instructions": "..." } }
    /// ```
    pub fn from_json(json: &str) -> FormularyResult<Self> {
        let raw: BTreeMap<String, MedicationRecord> = serde_json::from_str(json)?;
        Self::from_records(raw)
    }

    /// Load a formulary from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> FormularyResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let formulary = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            medications = formulary.len(),
            "Loaded formulary"
        );
        Ok(formulary)
    }

    /// Look up a medication, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&MedicationRecord> {
        self.records.get(&name.to_lowercase())
    }

    /// Check whether a medication is known, case-insensitively.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Known medication names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Records sorted by medication name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MedicationRecord)> {
        let mut entries: Vec<(&str, &MedicationRecord)> = self
            .records
            .iter()
            .map(|(name, record)| (name.as_str(), record))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Number of medications.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the formulary has no medications.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Closest known name for a misspelled medication.
    ///
    /// Returns `None` when the name is already known or nothing is close enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let query = name.trim().to_lowercase();
        if query.is_empty() || self.records.contains_key(&query) {
            return None;
        }

        self.names()
            .into_iter()
            .map(|known| (known, jaro_winkler(&query, known)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(known, _)| known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contents() {
        let formulary = Formulary::builtin();
        assert_eq!(formulary.len(), 4);
        assert_eq!(
            formulary.names(),
            vec!["aspirin", "atorvastatin", "lisinopril", "metformin"]
        );

        let metformin = formulary.get("metformin").unwrap();
        assert_eq!(metformin.common_dosages, vec!["500mg", "850mg", "1000mg"]);
        assert_eq!(metformin.max_daily, "2000mg");
        assert_eq!(metformin.interactions, vec!["alcohol", "contrast dyes"]);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let formulary = Formulary::builtin();
        assert!(formulary.contains("Aspirin"));
        assert!(formulary.contains("ATORVASTATIN"));
        assert!(!formulary.contains("ibuprofen"));
    }

    #[test]
    fn test_from_json_lowercases_keys() {
        let json = r#"{
            "Warfarin": {
                "common_dosages": ["2mg", "5mg"],
                "max_daily": "10mg",
                "interactions": ["aspirin"]
            }
        }"#;
        let formulary = Formulary::from_json(json).unwrap();
        assert_eq!(formulary.names(), vec!["warfarin"]);
        assert_eq!(formulary.get("warfarin").unwrap().patient_instructions, "");
    }

    #[test]
    fn test_from_json_rejects_case_duplicates() {
        let json = r#"{
            "Warfarin": {"common_dosages": [], "max_daily": "10mg", "interactions": []},
            "warfarin": {"common_dosages": [], "max_daily": "10mg", "interactions": []}
        }"#;
        let err = Formulary::from_json(json).unwrap_err();
        assert!(matches!(err, FormularyError::Duplicate(name) if name == "warfarin"));
    }

    #[test]
    fn test_from_records_rejects_empty_name() {
        let err = Formulary::from_records([("  ", MedicationRecord::new("1mg"))]).unwrap_err();
        assert!(matches!(err, FormularyError::EmptyName));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Formulary::from_json("not json"),
            Err(FormularyError::Json(_))
        ));
    }

    #[test]
    fn test_suggest() {
        let formulary = Formulary::builtin();
        assert_eq!(formulary.suggest("atorvastatine"), Some("atorvastatin"));
        assert_eq!(formulary.suggest("Metformine"), Some("metformin"));
        assert_eq!(formulary.suggest("aspirin"), None);
        assert_eq!(formulary.suggest("ibuprofen"), None);
        assert_eq!(formulary.suggest(""), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formulary.json");
        std::fs::write(
            &path,
            r#"{"digoxin": {"common_dosages": ["0.125mg"], "max_daily": "0.5mg", "interactions": []}}"#,
        )
        .unwrap();

        let formulary = Formulary::load(&path).unwrap();
        assert!(formulary.contains("digoxin"));

        let missing = Formulary::load(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(FormularyError::Io(_))));
    }
}
