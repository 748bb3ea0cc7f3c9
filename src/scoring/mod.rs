pub mod answers;
pub mod builtin;
pub mod config;
pub mod definitions;
pub mod engine;
pub mod questionnaire;
pub mod validation;

pub use answers::{AnswerScale, AnswerVocabulary};
pub use config::*;
pub use definitions::{Polarity, QuestionId, Scale, ScaleDefinition};
pub use engine::{round2, score_dimensions, ResponseSet, ScaleScore, ScoreResult};
pub use questionnaire::{QuestionItem, Questionnaire};
pub use validation::validate_questionnaire;
