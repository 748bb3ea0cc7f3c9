use super::definitions::Polarity;
use serde::{Deserialize, Serialize};

/// Questionnaire configuration as read from YAML.
///
/// Answer scales and scale definitions are versioned together: changing one
/// without the other makes older scored rows incomparable.
///
/// Example YAML:
/// ```yaml
/// name: COPSOQ II short form
/// version: "1"
/// answer_scales:
///   - name: frequency
///     labels: [Never, Rarely, Sometimes, Often, Always]
/// scales:
///   - name: Work pace
///     questions: [Q1, Q2]
///   - name: Role clarity
///     questions: [Q3]
///     polarity: resource
/// questions:
///   - id: Q1
///   - id: Q2
///   - id: Q3
///     answer_scale: frequency
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionnaireConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Label vocabularies. Values are spread evenly over 0-100 in label order.
    pub answer_scales: Vec<AnswerScaleConfig>,

    /// Scales in presentation/export order.
    pub scales: Vec<ScaleConfig>,

    /// Optional item catalogue. When present every scale member must be listed
    /// here and every item must belong to a scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionConfig>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnswerScaleConfig {
    pub name: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScaleConfig {
    pub name: String,
    pub questions: Vec<String>,
    #[serde(default)]
    pub polarity: Polarity,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionConfig {
    pub id: String,

    /// Answer scale offered for this item; defaults to the first answer scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_scale: Option<String>,
}
