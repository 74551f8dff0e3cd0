//! Static symptom reference data

use serde::{Deserialize, Serialize};

/// A symptom the user can select
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
}

impl Symptom {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

const STANDARD_SYMPTOMS: &[(&str, &str)] = &[
    ("1", "Headache"),
    ("2", "Fever"),
    ("3", "Cough"),
    ("4", "Fatigue"),
    ("5", "Shortness of breath"),
    ("6", "Sore throat"),
    ("7", "Dizziness"),
    ("8", "Nausea"),
    ("9", "Muscle pain"),
    ("10", "Abdominal pain"),
];

/// Ordered, read-only list of symptoms
#[derive(Debug, Clone)]
pub struct SymptomCatalog {
    symptoms: Vec<Symptom>,
}

impl SymptomCatalog {
    pub fn new(symptoms: Vec<Symptom>) -> Self {
        Self { symptoms }
    }

    /// The built-in catalog
    pub fn standard() -> Self {
        Self::new(
            STANDARD_SYMPTOMS
                .iter()
                .map(|(id, name)| Symptom::new(*id, *name))
                .collect(),
        )
    }

    pub fn all(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn get(&self, id: &str) -> Option<&Symptom> {
        self.symptoms.iter().find(|s| s.id == id)
    }

    /// Find a symptom by display name, ignoring case
    #[cfg(test)]
    pub fn find_by_name(&self, name: &str) -> Option<&Symptom> {
        self.symptoms
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Symptoms whose name contains `query`, case-insensitive, in catalog order
    pub fn filter(&self, query: &str) -> Vec<&Symptom> {
        let needle = query.trim().to_lowercase();
        self.symptoms
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect()
    }
}

impl Default for SymptomCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
