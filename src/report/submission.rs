use crate::scoring::{Questionnaire, ResponseSet, ScoreResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::io::Write;

pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const ANSWER_PREFIX: &str = "Resp_";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One scored submission, laid out as the row the tabular store appends.
#[derive(Debug, Clone)]
pub struct Submission {
    pub submitted_at: DateTime<Local>,
    /// Answers in catalogue order; `None` while unanswered.
    pub answers: Vec<Option<String>>,
    pub scores: ScoreResult,
}

impl Submission {
    pub fn new(questionnaire: &Questionnaire, responses: &ResponseSet, submitted_at: DateTime<Local>) -> Self {
        let answers = questionnaire
            .question_ids()
            .map(|id| responses.get(id.as_str()).map(str::to_string))
            .collect();
        Self {
            submitted_at,
            answers,
            scores: questionnaire.score(responses),
        }
    }

    /// Cells matching [`header`]: timestamp, answers, then scale scores.
    /// Missing answers and undefined scores are empty cells.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(1 + self.answers.len() + self.scores.len());
        record.push(self.submitted_at.format(TIMESTAMP_FORMAT).to_string());
        record.extend(self.answers.iter().map(|a| a.clone().unwrap_or_default()));
        record.extend(
            self.scores
                .entries()
                .iter()
                .map(|e| e.score.map(|s| format!("{:.2}", s)).unwrap_or_default()),
        );
        record
    }
}

/// Column names of the submission row for `questionnaire`.
pub fn header(questionnaire: &Questionnaire) -> Vec<String> {
    std::iter::once(TIMESTAMP_COLUMN.to_string())
        .chain(
            questionnaire
                .question_ids()
                .map(|id| format!("{}{}", ANSWER_PREFIX, id)),
        )
        .chain(questionnaire.definitions().names().map(str::to_string))
        .collect()
}

/// Write submissions as CSV, optionally preceded by the header row.
pub fn write_csv<W: Write>(
    writer: W,
    questionnaire: &Questionnaire,
    submissions: &[Submission],
    include_header: bool,
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if include_header {
        csv.write_record(header(questionnaire))
            .context("Failed to write CSV header")?;
    }
    for submission in submissions {
        csv.write_record(submission.to_record())
            .context("Failed to write CSV row")?;
    }
    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}
