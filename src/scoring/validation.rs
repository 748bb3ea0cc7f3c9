use super::answers::AnswerScale;
use super::config::QuestionnaireConfig;
use super::definitions::QuestionId;
use std::collections::{HashMap, HashSet};

/// Validate questionnaire configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_questionnaire(config: &QuestionnaireConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push("name: must not be empty".to_string());
    }

    validate_answer_scales(config, &mut errors);
    validate_scales(config, &mut errors);

    if let Some(ref questions) = config.questions {
        validate_catalogue(config, questions, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_answer_scales(config: &QuestionnaireConfig, errors: &mut Vec<String>) {
    if config.answer_scales.is_empty() {
        errors.push("answer_scales: at least one answer scale is required".to_string());
        return;
    }

    let mut names = HashSet::new();
    // label -> (scale name, value) of the first occurrence
    let mut seen_labels: HashMap<&str, (&str, f64)> = HashMap::new();

    for (i, scale) in config.answer_scales.iter().enumerate() {
        if scale.name.trim().is_empty() {
            errors.push(format!("answer_scales[{}].name: must not be empty", i));
        } else if !names.insert(scale.name.as_str()) {
            errors.push(format!(
                "answer_scales[{}].name: duplicate answer scale '{}'",
                i, scale.name
            ));
        }

        if scale.labels.len() < 2 {
            errors.push(format!(
                "answer_scales[{}].labels: needs at least 2 labels, found {}",
                i,
                scale.labels.len()
            ));
        }

        let mut labels = HashSet::new();
        for (j, label) in scale.labels.iter().enumerate() {
            if label.trim().is_empty() {
                errors.push(format!("answer_scales[{}].labels[{}]: must not be empty", i, j));
            } else if !labels.insert(label.as_str()) {
                errors.push(format!(
                    "answer_scales[{}].labels[{}]: duplicate label '{}'",
                    i, j, label
                ));
            }
        }

        let runtime = AnswerScale::new(scale.name.clone(), scale.labels.iter().cloned());
        for (j, label) in scale.labels.iter().enumerate() {
            let Some(value) = runtime.value_at(j) else {
                continue;
            };
            match seen_labels.get(label.as_str()) {
                Some((other, other_value)) if *other != scale.name.as_str() => {
                    if (other_value - value).abs() > 1e-9 {
                        errors.push(format!(
                            "answer_scales[{}].labels[{}]: '{}' is worth {} here but {} in '{}'",
                            i, j, label, value, other_value, other
                        ));
                    }
                }
                Some(_) => {}
                None => {
                    seen_labels.insert(label.as_str(), (scale.name.as_str(), value));
                }
            }
        }
    }
}

fn validate_scales(config: &QuestionnaireConfig, errors: &mut Vec<String>) {
    if config.scales.is_empty() {
        errors.push("scales: at least one scale is required".to_string());
        return;
    }

    let mut names = HashSet::new();
    for (i, scale) in config.scales.iter().enumerate() {
        if scale.name.trim().is_empty() {
            errors.push(format!("scales[{}].name: must not be empty", i));
        } else if !names.insert(scale.name.as_str()) {
            errors.push(format!("scales[{}].name: duplicate scale '{}'", i, scale.name));
        }

        if scale.questions.is_empty() {
            errors.push(format!(
                "scales[{}].questions: scale '{}' has no questions",
                i, scale.name
            ));
        }

        let mut members = HashSet::new();
        for (j, id) in scale.questions.iter().enumerate() {
            if !QuestionId::from(id.as_str()).is_valid() {
                errors.push(format!(
                    "scales[{}].questions[{}]: invalid question id '{}'",
                    i, j, id
                ));
            } else if !members.insert(id.as_str()) {
                errors.push(format!(
                    "scales[{}].questions[{}]: '{}' listed twice in '{}'",
                    i, j, id, scale.name
                ));
            }
        }
    }
}

fn validate_catalogue(
    config: &QuestionnaireConfig,
    questions: &[super::config::QuestionConfig],
    errors: &mut Vec<String>,
) {
    let answer_scales: HashSet<&str> = config
        .answer_scales
        .iter()
        .map(|s| s.name.as_str())
        .collect();

    let mut catalogue = HashSet::new();
    for (i, question) in questions.iter().enumerate() {
        if !QuestionId::from(question.id.as_str()).is_valid() {
            errors.push(format!("questions[{}].id: invalid question id '{}'", i, question.id));
        } else if !catalogue.insert(question.id.as_str()) {
            errors.push(format!("questions[{}].id: duplicate question '{}'", i, question.id));
        }

        if let Some(ref scale) = question.answer_scale {
            if !answer_scales.contains(scale.as_str()) {
                errors.push(format!(
                    "questions[{}].answer_scale: unknown answer scale '{}'",
                    i, scale
                ));
            }
        }
    }

    let mut scored = HashSet::new();
    for (i, scale) in config.scales.iter().enumerate() {
        for (j, id) in scale.questions.iter().enumerate() {
            scored.insert(id.as_str());
            if !catalogue.contains(id.as_str()) {
                errors.push(format!(
                    "scales[{}].questions[{}]: '{}' is not in the question catalogue",
                    i, j, id
                ));
            }
        }
    }

    for (i, question) in questions.iter().enumerate() {
        if !scored.contains(question.id.as_str()) {
            errors.push(format!(
                "questions[{}].id: '{}' does not belong to any scale",
                i, question.id
            ));
        }
    }
}
