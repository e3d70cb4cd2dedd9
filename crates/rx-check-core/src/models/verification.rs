//! Verification outcome models.

use std::fmt;

use serde::Serialize;

/// One detected problem with a prescription.
///
/// Renders to the human-readable message shown to the user; serializes as
/// that same message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Issue {
    /// Medication is not in the formulary (name as given)
    UnknownMedication(String),
    /// Dosage is not one of the medication's common dosages
    UnusualDosage(String),
    /// A current medication interacts with the prescribed one
    Interaction(String),
    /// Patient is allergic to the prescribed medication (name as given)
    Allergy(String),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::UnknownMedication(med) => write!(f, "Unknown medication: {}", med),
            Issue::UnusualDosage(dosage) => write!(f, "Unusual dosage: {}", dosage),
            Issue::Interaction(med) => write!(f, "Potential interaction with {}", med),
            Issue::Allergy(med) => write!(f, "Patient has known allergy to {}", med),
        }
    }
}

impl From<Issue> for String {
    fn from(issue: Issue) -> Self {
        issue.to_string()
    }
}

/// Result of verifying one prescription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// Detected issues in check order; empty means every check passed
    pub issues: Vec<Issue>,
    /// Patient instructions; empty when the medication is unknown
    pub instructions: String,
}

impl Verification {
    /// Whether every check passed.
    pub fn is_clear(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether the medication was found in the formulary.
    pub fn is_known_medication(&self) -> bool {
        !matches!(self.issues.first(), Some(Issue::UnknownMedication(_)))
    }

    /// Issues rendered as display messages.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Split into (issue messages, instructions).
    pub fn into_parts(self) -> (Vec<String>, String) {
        let messages = self.messages();
        (messages, self.instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_messages() {
        assert_eq!(
            Issue::UnknownMedication("Ibuprofen".into()).to_string(),
            "Unknown medication: Ibuprofen"
        );
        assert_eq!(Issue::UnusualDosage("100mg".into()).to_string(), "Unusual dosage: 100mg");
        assert_eq!(
            Issue::Interaction("alcohol".into()).to_string(),
            "Potential interaction with alcohol"
        );
        assert_eq!(
            Issue::Allergy("aspirin".into()).to_string(),
            "Patient has known allergy to aspirin"
        );
    }

    #[test]
    fn test_serializes_as_messages() {
        let verification = Verification {
            issues: vec![Issue::UnusualDosage("100mg".into())],
            instructions: "Take with food.".into(),
        };
        let json = serde_json::to_string(&verification).unwrap();
        assert_eq!(json, r#"{"issues":["Unusual dosage: 100mg"],"instructions":"Take with food."}"#);
    }

    #[test]
    fn test_known_medication() {
        let unknown = Verification {
            issues: vec![Issue::UnknownMedication("x".into())],
            instructions: String::new(),
        };
        assert!(!unknown.is_known_medication());
        assert!(Verification::default().is_known_medication());
        assert!(Verification::default().is_clear());
    }
}
