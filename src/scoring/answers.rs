use std::collections::HashMap;

/// An ordered, closed set of answer labels spread evenly over 0-100.
///
/// For an n-point scale the label at `index` is worth `100 * index / (n - 1)`,
/// so a five-point frequency scale maps Never/Rarely/Sometimes/Often/Always to
/// 0/25/50/75/100.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerScale {
    name: String,
    labels: Vec<String>,
}

impl AnswerScale {
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Value of the label at `index`. Scales with fewer than two labels have no values.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        let n = self.labels.len();
        if n < 2 || index >= n {
            return None;
        }
        Some(100.0 * index as f64 / (n - 1) as f64)
    }

    /// Value of `label`, matched exactly.
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|index| self.value_at(index))
    }

    /// Labels paired with their values, in scale order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(i, label)| self.value_at(i).map(|v| (label.as_str(), v)))
    }
}

/// Union of a questionnaire's answer scales, used as one label lookup.
///
/// When a label occurs in more than one scale the first occurrence wins.
/// Validation rejects configurations where the occurrences disagree.
#[derive(Debug, Clone, Default)]
pub struct AnswerVocabulary {
    scales: Vec<AnswerScale>,
    lookup: HashMap<String, f64>,
}

impl AnswerVocabulary {
    pub fn new(scales: Vec<AnswerScale>) -> Self {
        let mut lookup = HashMap::new();
        for scale in &scales {
            for (label, value) in scale.entries() {
                lookup.entry(label.to_string()).or_insert(value);
            }
        }
        Self { scales, lookup }
    }

    /// Numeric value for an answer label, or `None` when the label is unknown.
    pub fn resolve(&self, label: &str) -> Option<f64> {
        self.lookup.get(label).copied()
    }

    pub fn scale(&self, name: &str) -> Option<&AnswerScale> {
        self.scales.iter().find(|s| s.name() == name)
    }

    pub fn scales(&self) -> &[AnswerScale] {
        &self.scales
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frequency() -> AnswerScale {
        AnswerScale::new("frequency", ["Never", "Rarely", "Sometimes", "Often", "Always"])
    }

    #[test]
    fn test_five_point_values_are_evenly_spaced() {
        let scale = frequency();
        let values: Vec<f64> = scale.entries().map(|(_, v)| v).collect();
        assert_eq!(values, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_value_of_known_and_unknown_label() {
        let scale = frequency();
        assert_eq!(scale.value_of("Often"), Some(75.0));
        assert_eq!(scale.value_of("Maybe"), None);
        // Matching is exact
        assert_eq!(scale.value_of("often"), None);
    }

    #[test]
    fn test_four_point_scale() {
        let scale = AnswerScale::new("agreement", ["No", "A little", "Quite", "Yes"]);
        assert_eq!(scale.value_of("A little").map(|v| (v * 100.0).round()), Some(3333.0));
        assert_eq!(scale.value_of("Yes"), Some(100.0));
    }

    #[test]
    fn test_single_label_scale_has_no_values() {
        let scale = AnswerScale::new("broken", ["Only"]);
        assert_eq!(scale.value_of("Only"), None);
        assert_eq!(scale.entries().count(), 0);
    }

    #[test]
    fn test_vocabulary_resolves_across_scales() {
        let quality = AnswerScale::new("quality", ["Very poor", "Poor", "Fair", "Good", "Very good"]);
        let vocabulary = AnswerVocabulary::new(vec![frequency(), quality]);
        assert_eq!(vocabulary.resolve("Always"), Some(100.0));
        assert_eq!(vocabulary.resolve("Poor"), Some(25.0));
        assert_eq!(vocabulary.resolve("Maybe"), None);
        assert!(vocabulary.scale("quality").is_some());
        assert!(vocabulary.scale("missing").is_none());
    }

    #[test]
    fn test_vocabulary_first_occurrence_wins() {
        let a = AnswerScale::new("a", ["No", "Yes"]);
        let b = AnswerScale::new("b", ["Yes", "No"]);
        let vocabulary = AnswerVocabulary::new(vec![a, b]);
        assert_eq!(vocabulary.resolve("Yes"), Some(100.0));
    }

    #[test]
    fn test_empty_vocabulary() {
        assert!(AnswerVocabulary::default().is_empty());
    }
}
