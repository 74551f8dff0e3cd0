//! Keyword-based topic classification
//!
//! Maps free text onto one of the fixed health topics. Evaluation walks an
//! ordered table so overlapping inputs always resolve the same way.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Topical focus of a health-related exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Disease,
    Medicine,
    Treatment,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Disease => "disease",
            Category::Medicine => "medicine",
            Category::Treatment => "treatment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword sets in priority order. First matching set wins.
const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Disease,
        &["headache", "fever", "pain", "symptoms", "feeling"],
    ),
    (Category::Medicine, &["medicine", "drug", "pill", "medication"]),
    (
        Category::Treatment,
        &["treatment", "therapy", "cure", "care", "heal"],
    ),
];

/// Classify free text into a topic category.
///
/// Matching is a case-insensitive substring test, so "Headaches" counts as
/// `headache`. Returns `None` when no keyword occurs.
pub fn classify(text: &str) -> Option<Category> {
    let lowered = text.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(category, _)| *category)
}

/// Keywords that select the given category
#[cfg(test)]
pub fn keywords_for(category: Category) -> &'static [&'static str] {
    KEYWORD_TABLE
        .iter()
        .find(|(c, _)| *c == category)
        .map_or(&[], |(_, keywords)| keywords)
}
