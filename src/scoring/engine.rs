use super::answers::AnswerVocabulary;
use super::definitions::{QuestionId, ScaleDefinition};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// One respondent's answers at scoring time.
///
/// A question maps to `None` (or is missing) while unanswered. Deserializes
/// from a JSON object such as `{"Q1": "Always", "Q2": null}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: HashMap<QuestionId, Option<String>>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the selected label for a question.
    pub fn answer(&mut self, id: impl Into<QuestionId>, label: impl Into<String>) {
        self.answers.insert(id.into(), Some(label.into()));
    }

    /// Mark a question as unanswered again.
    pub fn clear(&mut self, id: &str) {
        if let Some(slot) = self.answers.get_mut(id) {
            *slot = None;
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.answers.get(id).and_then(|a| a.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, Option<&str>)> {
        self.answers.iter().map(|(id, a)| (id, a.as_deref()))
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| a.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<Q: Into<QuestionId>> FromIterator<(Q, Option<String>)> for ResponseSet {
    fn from_iter<T: IntoIterator<Item = (Q, Option<String>)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().map(|(id, a)| (id.into(), a)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaleScore {
    pub scale: String,
    /// `None` when no member question was answered with a known label.
    pub score: Option<f64>,
}

/// Per-scale outcome for one response set, in definition order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreResult {
    entries: Vec<ScaleScore>,
}

impl ScoreResult {
    pub fn entries(&self) -> &[ScaleScore] {
        &self.entries
    }

    /// Score of a scale. The outer `None` means the scale is not in the result,
    /// the inner one that it had no data.
    pub fn get(&self, scale: &str) -> Option<Option<f64>> {
        self.entries
            .iter()
            .find(|e| e.scale == scale)
            .map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scored_count(&self) -> usize {
        self.entries.iter().filter(|e| e.score.is_some()).count()
    }
}

// Serialized as an ordered map so JSON keeps column order; undefined is `null`.
impl Serialize for ScoreResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.scale, &entry.score)?;
        }
        map.end()
    }
}

/// Score every defined scale from one response set.
///
/// Unanswered questions and labels missing from the vocabulary are left out of
/// the average. A scale with nothing left scores `None`, never 0. Means are
/// rounded to two decimals, halves away from zero.
pub fn score_dimensions(
    responses: &ResponseSet,
    definitions: &ScaleDefinition,
    vocabulary: &AnswerVocabulary,
) -> ScoreResult {
    let resolved: HashMap<&str, f64> = responses
        .iter()
        .filter_map(|(id, answer)| Some((id.as_str(), vocabulary.resolve(answer?)?)))
        .collect();

    let entries = definitions
        .iter()
        .map(|scale| {
            let values: Vec<f64> = scale
                .questions
                .iter()
                .filter_map(|q| resolved.get(q.as_str()).copied())
                .collect();
            ScaleScore {
                scale: scale.name.clone(),
                score: mean(&values).map(round2),
            }
        })
        .collect();

    ScoreResult { entries }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Round to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{AnswerScale, Scale};

    fn vocabulary() -> AnswerVocabulary {
        AnswerVocabulary::new(vec![AnswerScale::new(
            "frequency",
            ["Never", "Rarely", "Sometimes", "Often", "Always"],
        )])
    }

    fn definitions() -> ScaleDefinition {
        ScaleDefinition::new(vec![
            Scale::new("Pace", ["Q1", "Q2"]),
            Scale::new("Cognitive", ["Q3", "Q4", "Q5"]),
            Scale::new("Role clarity", ["Q6"]),
        ])
    }

    fn responses(pairs: &[(&str, &str)]) -> ResponseSet {
        pairs
            .iter()
            .map(|(id, label)| (*id, Some(label.to_string())))
            .collect()
    }

    #[test]
    fn test_scenario_a_full_answers() {
        let result = score_dimensions(
            &responses(&[("Q1", "Always"), ("Q2", "Sometimes")]),
            &definitions(),
            &vocabulary(),
        );
        assert_eq!(result.get("Pace"), Some(Some(75.0)));
    }

    #[test]
    fn test_scenario_b_partial_answers() {
        let result = score_dimensions(&responses(&[("Q1", "Often")]), &definitions(), &vocabulary());
        assert_eq!(result.get("Pace"), Some(Some(75.0)));
    }

    #[test]
    fn test_scenario_c_empty_responses() {
        let result = score_dimensions(&ResponseSet::new(), &definitions(), &vocabulary());
        assert_eq!(result.len(), 3);
        assert!(result.entries().iter().all(|e| e.score.is_none()));
        assert_eq!(result.scored_count(), 0);
    }

    #[test]
    fn test_scenario_d_unknown_label_is_absent() {
        let result = score_dimensions(&responses(&[("Q6", "Maybe")]), &definitions(), &vocabulary());
        assert_eq!(result.get("Role clarity"), Some(None));
    }

    #[test]
    fn test_scenario_e_three_question_mean() {
        let result = score_dimensions(
            &responses(&[("Q3", "Always"), ("Q4", "Never"), ("Q5", "Sometimes")]),
            &definitions(),
            &vocabulary(),
        );
        assert_eq!(result.get("Cognitive"), Some(Some(50.0)));
    }

    #[test]
    fn test_all_zero_answers_score_zero_not_undefined() {
        let result = score_dimensions(
            &responses(&[("Q1", "Never"), ("Q2", "Never")]),
            &definitions(),
            &vocabulary(),
        );
        assert_eq!(result.get("Pace"), Some(Some(0.0)));
    }

    #[test]
    fn test_explicit_null_answer_is_absent() {
        let set: ResponseSet = serde_json::from_str(r#"{"Q1": null, "Q2": "Rarely"}"#).unwrap();
        let result = score_dimensions(&set, &definitions(), &vocabulary());
        assert_eq!(result.get("Pace"), Some(Some(25.0)));
    }

    #[test]
    fn test_mean_is_rounded_to_two_decimals() {
        // (100 + 25 + 0) / 3 = 41.666...
        let result = score_dimensions(
            &responses(&[("Q3", "Always"), ("Q4", "Rarely"), ("Q5", "Never")]),
            &definitions(),
            &vocabulary(),
        );
        assert_eq!(result.get("Cognitive"), Some(Some(41.67)));
    }

    #[test]
    fn test_round2_halves_away_from_zero() {
        assert_eq!(round2(12.5), 12.5);
        assert_eq!(round2(33.3333), 33.33);
        assert_eq!(round2(66.6666), 66.67);
        assert_eq!(round2(0.125), 0.13);
    }

    #[test]
    fn test_result_follows_definition_order() {
        let result = score_dimensions(&ResponseSet::new(), &definitions(), &vocabulary());
        let names: Vec<&str> = result.entries().iter().map(|e| e.scale.as_str()).collect();
        assert_eq!(names, vec!["Pace", "Cognitive", "Role clarity"]);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let set = responses(&[("Q1", "Often"), ("Q3", "Never"), ("Q6", "Always")]);
        let first = score_dimensions(&set, &definitions(), &vocabulary());
        let second = score_dimensions(&set, &definitions(), &vocabulary());
        assert_eq!(first, second);
    }

    #[test]
    fn test_response_order_does_not_matter() {
        let forward = responses(&[("Q3", "Always"), ("Q4", "Rarely"), ("Q5", "Often")]);
        let backward = responses(&[("Q5", "Often"), ("Q4", "Rarely"), ("Q3", "Always")]);
        assert_eq!(
            score_dimensions(&forward, &definitions(), &vocabulary()),
            score_dimensions(&backward, &definitions(), &vocabulary())
        );
    }

    #[test]
    fn test_higher_label_never_lowers_score() {
        let labels = ["Never", "Rarely", "Sometimes", "Often", "Always"];
        for fixed in labels {
            let mut previous = f64::MIN;
            for varied in labels {
                let result = score_dimensions(
                    &responses(&[("Q1", fixed), ("Q2", varied)]),
                    &definitions(),
                    &vocabulary(),
                );
                let score = result.get("Pace").flatten().unwrap();
                assert!(score >= previous, "{} then {} dropped the score", fixed, varied);
                previous = score;
            }
        }
    }

    #[test]
    fn test_unreferenced_answers_are_ignored() {
        let result = score_dimensions(&responses(&[("Q99", "Always")]), &definitions(), &vocabulary());
        assert_eq!(result.scored_count(), 0);
    }

    #[test]
    fn test_question_shared_between_scales() {
        let definitions = ScaleDefinition::new(vec![
            Scale::new("A", ["Q1"]),
            Scale::new("B", ["Q1", "Q2"]),
        ]);
        let result = score_dimensions(
            &responses(&[("Q1", "Always"), ("Q2", "Never")]),
            &definitions,
            &vocabulary(),
        );
        assert_eq!(result.get("A"), Some(Some(100.0)));
        assert_eq!(result.get("B"), Some(Some(50.0)));
    }

    #[test]
    fn test_response_set_editing() {
        let mut set = ResponseSet::new();
        set.answer("Q1", "Often");
        set.answer("Q2", "Never");
        set.answer("Q1", "Always");
        assert_eq!(set.get("Q1"), Some("Always"));
        assert_eq!(set.answered_count(), 2);

        set.clear("Q2");
        assert_eq!(set.get("Q2"), None);
        assert_eq!(set.answered_count(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_score_result_serializes_in_order_with_nulls() {
        let result = score_dimensions(
            &responses(&[("Q1", "Always"), ("Q2", "Sometimes")]),
            &definitions(),
            &vocabulary(),
        );
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"Pace":75.0,"Cognitive":null,"Role clarity":null}"#);
    }
}
