//! Built-in medication table.

use std::collections::HashMap;

use crate::models::MedicationRecord;

/// Default formulary records keyed by lowercase name.
pub(super) fn records() -> HashMap<String, MedicationRecord> {
    let mut map = HashMap::new();

    map.insert(
        "lisinopril".into(),
        MedicationRecord::new("40mg")
            .with_dosages(["5mg", "10mg", "20mg"])
            .with_interactions(["potassium supplements", "spironolactone"])
            .with_instructions("Take once daily. May cause dizziness."),
    );

    map.insert(
        "metformin".into(),
        MedicationRecord::new("2000mg")
            .with_dosages(["500mg", "850mg", "1000mg"])
            .with_interactions(["alcohol", "contrast dyes"])
            .with_instructions("Take with meals to reduce stomach upset."),
    );

    map.insert(
        "atorvastatin".into(),
        MedicationRecord::new("80mg")
            .with_dosages(["10mg", "20mg", "40mg", "80mg"])
            .with_interactions(["grapefruit juice", "certain antibiotics"])
            .with_instructions("Take in the evening. Report unexplained muscle pain."),
    );

    map.insert(
        "aspirin".into(),
        MedicationRecord::new("4000mg")
            .with_dosages(["81mg", "325mg"])
            .with_interactions(["blood thinners", "ibuprofen"])
            .with_instructions("Take with food to minimize stomach irritation."),
    );

    map
}
