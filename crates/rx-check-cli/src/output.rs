//! Terminal rendering for verification results and the formulary listing.

use serde::Serialize;

use rx_check_core::{Formulary, InstructionSheet, MedicationRecord, Patient, Prescription, Verification};

/// Everything one `verify` run produced.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub patient: Patient,
    pub prescription: Prescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    pub verification: Verification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_sheet: Option<InstructionSheet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_to: Option<String>,
}

/// One formulary entry for JSON listing.
#[derive(Debug, Serialize)]
pub struct FormularyEntry<'a> {
    pub name: &'a str,
    #[serde(flatten)]
    pub record: &'a MedicationRecord,
}

/// Human-readable report.
pub fn render_report(report: &VerifyReport) -> String {
    let mut out = String::new();

    if let Some(text) = &report.extracted_text {
        section(&mut out, "Extracted Text");
        line(&mut out, text.trim_end());
    }

    section(&mut out, "Verification Results");
    line(
        &mut out,
        &format!("Patient: {} (age {})", report.patient.name, report.patient.age),
    );
    line(&mut out, &format!("Medication: {}", report.prescription.medication));
    line(&mut out, &format!("Dosage: {}", report.prescription.dosage));
    line(&mut out, &format!("Frequency: {}", report.prescription.frequency));

    section(&mut out, "Issues Found");
    if report.verification.is_clear() {
        line(&mut out, "No issues found with this prescription.");
    } else {
        for issue in &report.verification.issues {
            line(&mut out, &format!("  - {}", issue));
        }
    }
    if let Some(suggestion) = &report.suggestion {
        line(&mut out, &format!("Did you mean: {}?", suggestion));
    }

    if !report.verification.instructions.is_empty() {
        section(&mut out, "Patient Instructions");
        line(&mut out, &report.verification.instructions);
    }

    if let Some(path) = &report.exported_to {
        out.push('\n');
        line(&mut out, &format!("Instructions written to {}", path));
    }

    out
}

/// Human-readable formulary listing.
pub fn render_formulary(formulary: &Formulary) -> String {
    let mut out = String::new();
    for (name, record) in formulary.iter() {
        line(&mut out, name);
        line(
            &mut out,
            &format!("  Common dosages: {}", record.common_dosages.join(", ")),
        );
        line(&mut out, &format!("  Max daily:      {}", record.max_daily));
        line(
            &mut out,
            &format!("  Interactions:   {}", record.interactions.join(", ")),
        );
        if !record.patient_instructions.is_empty() {
            line(
                &mut out,
                &format!("  Instructions:   {}", record.patient_instructions),
            );
        }
    }
    out
}

/// Formulary entries in name order, for JSON output.
pub fn formulary_entries(formulary: &Formulary) -> Vec<FormularyEntry<'_>> {
    formulary
        .iter()
        .map(|(name, record)| FormularyEntry { name, record })
        .collect()
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    line(out, &format!("== {} ==", title));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rx_check_core::Verifier;

    fn report(medication: &str, dosage: &str, patient: Patient) -> VerifyReport {
        let formulary = Formulary::builtin();
        let prescription = Prescription::new(medication, dosage, "daily");
        let verification = Verifier::new(&formulary).verify(&prescription, &patient);
        VerifyReport {
            suggestion: formulary.suggest(medication).map(String::from),
            instruction_sheet: InstructionSheet::from_verification(&patient, &prescription, &verification),
            patient,
            prescription,
            extracted_text: None,
            verification,
            exported_to: None,
        }
    }

    #[test]
    fn test_render_clear() {
        let text = render_report(&report("atorvastatin", "20mg", Patient::new("John Doe", 45)));
        assert!(text.contains("== Verification Results =="));
        assert!(text.contains("No issues found with this prescription."));
        assert!(text.contains("== Patient Instructions ==\nTake in the evening."));
    }

    #[test]
    fn test_render_issues_and_suggestion() {
        let patient = Patient::new("Jane", 30).with_allergies(["metformin"]);
        let text = render_report(&report("metformin", "5mg", patient));
        assert!(text.contains("  - Unusual dosage: 5mg\n  - Patient has known allergy to metformin"));

        let text = render_report(&report("metforman", "500mg", Patient::new("Jane", 30)));
        assert!(text.contains("  - Unknown medication: metforman"));
        assert!(text.contains("Did you mean: metformin?"));
        assert!(!text.contains("Patient Instructions"));
    }

    #[test]
    fn test_report_json() {
        let json = serde_json::to_value(report("aspirin", "81mg", Patient::new("John Doe", 45))).unwrap();
        assert_eq!(json["verification"]["issues"], serde_json::json!([]));
        assert_eq!(json["instruction_sheet"]["patient_name"], "John Doe");
        assert!(json.get("suggestion").is_none());
        assert!(json.get("extracted_text").is_none());
    }

    #[test]
    fn test_render_sections_and_export_line() {
        let mut report = report("lisinopril", "10mg", Patient::new("Jane", 30));
        report.extracted_text = Some("Lisinopril 10mg\n\n".into());
        report.exported_to = Some("/tmp/Jane_instructions.txt".into());

        let text = render_report(&report);
        assert!(text.starts_with("== Extracted Text ==\nLisinopril 10mg\n\n== Verification Results ==\n"));
        assert!(text.contains("Patient: Jane (age 30)\nMedication: lisinopril\nDosage: 10mg\nFrequency: daily\n"));
        assert!(text.ends_with(
            "Take once daily. May cause dizziness.\n\nInstructions written to /tmp/Jane_instructions.txt\n"
        ));
    }

    #[test]
    fn test_render_formulary() {
        let text = render_formulary(&Formulary::builtin());
        assert!(text.starts_with("aspirin\n  Common dosages: 81mg, 325mg\n  Max daily:      4000mg"));
        assert!(text.contains("metformin\n"));
    }

    #[test]
    fn test_formulary_entries_json() {
        let formulary = Formulary::builtin();
        let json = serde_json::to_value(formulary_entries(&formulary)).unwrap();
        assert_eq!(json[0]["name"], "aspirin");
        assert_eq!(json[0]["max_daily"], "4000mg");
        assert_eq!(json.as_array().unwrap().len(), 4);
    }
}
