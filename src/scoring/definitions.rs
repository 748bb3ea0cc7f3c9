use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

/// Stable identifier for one survey item (e.g. "Q7").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty and made only of ASCII letters, digits, `_`, `-` or `.`.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Which end of the 0-100 range is the unfavourable one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// High scores mean high exposure (e.g. Burnout, Work pace).
    #[default]
    Risk,
    /// High scores are protective (e.g. Role clarity, Social support).
    Resource,
}

impl Polarity {
    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Risk => "risk",
            Polarity::Resource => "resource",
        }
    }
}

/// A named psychosocial dimension and the questions averaged into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub name: String,
    pub questions: Vec<QuestionId>,
    pub polarity: Polarity,
}

impl Scale {
    pub fn new<I, Q>(name: impl Into<String>, questions: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<QuestionId>,
    {
        Self {
            name: name.into(),
            questions: questions.into_iter().map(Into::into).collect(),
            polarity: Polarity::default(),
        }
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }
}

/// Ordered scale definitions for one questionnaire version.
///
/// Declaration order is kept: it drives result and export column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleDefinition {
    scales: Vec<Scale>,
}

impl ScaleDefinition {
    pub fn new(scales: Vec<Scale>) -> Self {
        Self { scales }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scale> {
        self.scales.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scales.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Every referenced question, in first-seen order, without repeats.
    pub fn question_ids(&self) -> Vec<QuestionId> {
        let mut seen = HashSet::new();
        self.scales
            .iter()
            .flat_map(|s| s.questions.iter())
            .filter(|q| seen.insert(q.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_validity() {
        assert!(QuestionId::from("Q7").is_valid());
        assert!(QuestionId::from("work_pace-1.a").is_valid());
        assert!(!QuestionId::from("").is_valid());
        assert!(!QuestionId::from("Q 7").is_valid());
        assert!(!QuestionId::from("Qé").is_valid());
    }

    #[test]
    fn test_polarity_defaults_to_risk() {
        let scale = Scale::new("Pace", ["Q1", "Q2"]);
        assert_eq!(scale.polarity, Polarity::Risk);
        let scale = scale.with_polarity(Polarity::Resource);
        assert_eq!(scale.polarity.label(), "resource");
    }

    #[test]
    fn test_definition_keeps_declaration_order() {
        let definitions = ScaleDefinition::new(vec![
            Scale::new("Zeta", ["Q3"]),
            Scale::new("Alpha", ["Q1"]),
        ]);
        let names: Vec<&str> = definitions.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert!(definitions.get("Alpha").is_some());
        assert!(definitions.get("Beta").is_none());
    }

    #[test]
    fn test_question_ids_are_deduplicated() {
        let definitions = ScaleDefinition::new(vec![
            Scale::new("A", ["Q2", "Q1"]),
            Scale::new("B", ["Q1", "Q3"]),
        ]);
        let ids: Vec<String> = definitions
            .question_ids()
            .into_iter()
            .map(|q| q.to_string())
            .collect();
        assert_eq!(ids, vec!["Q2", "Q1", "Q3"]);
    }

    #[test]
    fn test_polarity_serde_lowercase() {
        let polarity: Polarity = serde_json::from_str("\"resource\"").unwrap();
        assert_eq!(polarity, Polarity::Resource);
        assert_eq!(serde_json::to_string(&Polarity::Risk).unwrap(), "\"risk\"");
    }
}
