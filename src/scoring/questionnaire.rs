use super::answers::{AnswerScale, AnswerVocabulary};
use super::config::QuestionnaireConfig;
use super::definitions::{QuestionId, Scale, ScaleDefinition};
use super::engine::{score_dimensions, ResponseSet, ScoreResult};
use super::validation::validate_questionnaire;

/// A validated, immutable questionnaire version: its answer vocabulary, scale
/// definitions and item catalogue.
///
/// Built once at startup and shared read-only between scoring calls.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    name: String,
    version: Option<String>,
    vocabulary: AnswerVocabulary,
    definitions: ScaleDefinition,
    items: Vec<QuestionItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionItem {
    pub id: QuestionId,
    pub answer_scale: Option<String>,
}

impl Questionnaire {
    /// Validate `config` and build the runtime form. On failure every
    /// configuration error is returned.
    pub fn from_config(config: QuestionnaireConfig) -> Result<Self, Vec<String>> {
        validate_questionnaire(&config)?;

        let vocabulary = AnswerVocabulary::new(
            config
                .answer_scales
                .into_iter()
                .map(|s| AnswerScale::new(s.name, s.labels))
                .collect(),
        );

        let definitions = ScaleDefinition::new(
            config
                .scales
                .into_iter()
                .map(|s| Scale::new(s.name, s.questions).with_polarity(s.polarity))
                .collect(),
        );

        let items = match config.questions {
            Some(questions) => questions
                .into_iter()
                .map(|q| QuestionItem {
                    id: QuestionId::from(q.id),
                    answer_scale: q.answer_scale,
                })
                .collect(),
            None => definitions
                .question_ids()
                .into_iter()
                .map(|id| QuestionItem {
                    id,
                    answer_scale: None,
                })
                .collect(),
        };

        Ok(Self {
            name: config.name,
            version: config.version,
            vocabulary,
            definitions,
            items,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn vocabulary(&self) -> &AnswerVocabulary {
        &self.vocabulary
    }

    pub fn definitions(&self) -> &ScaleDefinition {
        &self.definitions
    }

    pub fn items(&self) -> &[QuestionItem] {
        &self.items
    }

    /// Question ids in catalogue order.
    pub fn question_ids(&self) -> impl Iterator<Item = &QuestionId> {
        self.items.iter().map(|item| &item.id)
    }

    /// Labels a respondent may pick for `id`: the item's own answer scale, or
    /// the first answer scale when the item names none.
    pub fn answer_options(&self, id: &str) -> Option<&AnswerScale> {
        let item = self.items.iter().find(|item| item.id.as_str() == id)?;
        match item.answer_scale {
            Some(ref name) => self.vocabulary.scale(name),
            None => self.vocabulary.scales().first(),
        }
    }

    pub fn score(&self, responses: &ResponseSet) -> ScoreResult {
        score_dimensions(responses, &self.definitions, &self.vocabulary)
    }
}
