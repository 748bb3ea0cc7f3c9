//! Bundled COPSOQ II short form, as validated for Brazil.

use super::config::{AnswerScaleConfig, QuestionConfig, QuestionnaireConfig, ScaleConfig};
use super::definitions::Polarity;

const FREQUENCY: &str = "frequencia";
const QUALITY: &str = "qualidade";

const FREQUENCY_LABELS: [&str; 5] = ["Nunca", "Raramente", "Às vezes", "Frequentemente", "Sempre"];
const QUALITY_LABELS: [&str; 5] = ["Muito ruim", "Ruim", "Razoável", "Boa", "Muito boa"];

// Items answered on the quality scale rather than the frequency one.
const QUALITY_ITEMS: [&str; 1] = ["Q27"];

const DIMENSIONS: [(&str, &[&str], Polarity); 23] = [
    ("Ritmo de Trabalho", &["Q1", "Q2"], Polarity::Risk),
    ("Exigências Cognitivas", &["Q3", "Q4"], Polarity::Risk),
    ("Exigências Emocionais", &["Q5", "Q6"], Polarity::Risk),
    ("Influência", &["Q7", "Q8"], Polarity::Resource),
    ("Possibilidades de Desenvolvimento", &["Q9", "Q10"], Polarity::Resource),
    ("Sentido do Trabalho", &["Q11", "Q12"], Polarity::Resource),
    ("Comprometimento com o Local de Trabalho", &["Q13", "Q14"], Polarity::Resource),
    ("Previsibilidade", &["Q15", "Q16"], Polarity::Resource),
    ("Clareza de Papel", &["Q17"], Polarity::Resource),
    ("Conflito de Papel", &["Q18"], Polarity::Risk),
    ("Qualidade da Liderança", &["Q19", "Q20"], Polarity::Resource),
    ("Apoio Social do Superior", &["Q21"], Polarity::Resource),
    ("Apoio Social dos Colegas", &["Q22"], Polarity::Resource),
    ("Sentido de Comunidade", &["Q23"], Polarity::Resource),
    ("Insegurança no Emprego", &["Q24"], Polarity::Risk),
    ("Conflito Trabalho-Família", &["Q25"], Polarity::Risk),
    ("Satisfação no Trabalho", &["Q26"], Polarity::Resource),
    ("Saúde em Geral", &["Q27"], Polarity::Resource),
    ("Burnout", &["Q28"], Polarity::Risk),
    ("Estresse", &["Q29"], Polarity::Risk),
    ("Problemas de Sono", &["Q30"], Polarity::Risk),
    ("Sintomas Depressivos", &["Q31"], Polarity::Risk),
    ("Assédio Moral", &["Q32"], Polarity::Risk),
];

/// COPSOQ II short form (Brazil): 23 dimensions over items Q1-Q32.
pub fn copsoq_br_short() -> QuestionnaireConfig {
    let scales: Vec<ScaleConfig> = DIMENSIONS
        .iter()
        .map(|(name, questions, polarity)| ScaleConfig {
            name: name.to_string(),
            questions: questions.iter().map(|q| q.to_string()).collect(),
            polarity: *polarity,
        })
        .collect();

    let questions = scales
        .iter()
        .flat_map(|s| s.questions.iter())
        .map(|id| {
            let answer_scale = if QUALITY_ITEMS.contains(&id.as_str()) {
                QUALITY
            } else {
                FREQUENCY
            };
            QuestionConfig {
                id: id.clone(),
                answer_scale: Some(answer_scale.to_string()),
            }
        })
        .collect();

    QuestionnaireConfig {
        name: "COPSOQ II - Versão Curta BR".to_string(),
        version: Some("v1".to_string()),
        answer_scales: vec![
            AnswerScaleConfig {
                name: FREQUENCY.to_string(),
                labels: FREQUENCY_LABELS.iter().map(|l| l.to_string()).collect(),
            },
            AnswerScaleConfig {
                name: QUALITY.to_string(),
                labels: QUALITY_LABELS.iter().map(|l| l.to_string()).collect(),
            },
        ],
        scales,
        questions: Some(questions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let config = copsoq_br_short();
        assert_eq!(config.scales.len(), 23);
        assert_eq!(config.questions.as_ref().map(Vec::len), Some(32));
        assert_eq!(config.scales[0].name, "Ritmo de Trabalho");
        assert_eq!(config.scales[22].name, "Assédio Moral");
    }

    #[test]
    fn test_general_health_uses_quality_scale() {
        let config = copsoq_br_short();
        let questions = config.questions.unwrap();
        let q27 = questions.iter().find(|q| q.id == "Q27").unwrap();
        assert_eq!(q27.answer_scale.as_deref(), Some(QUALITY));
        let q1 = questions.iter().find(|q| q.id == "Q1").unwrap();
        assert_eq!(q1.answer_scale.as_deref(), Some(FREQUENCY));
    }

    #[test]
    fn test_catalogue_follows_scale_order() {
        let config = copsoq_br_short();
        let ids: Vec<String> = config.questions.unwrap().into_iter().map(|q| q.id).collect();
        let expected: Vec<String> = (1..=32).map(|i| format!("Q{}", i)).collect();
        assert_eq!(ids, expected);
    }
}
