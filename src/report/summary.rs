use crate::scoring::{round2, Polarity, Questionnaire};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use tracing::{debug, warn};

/// Cross-respondent mean of one scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleSummary {
    pub scale: String,
    pub polarity: Polarity,
    /// Rows with a usable value for this scale.
    pub respondents: usize,
    /// `None` when no row had a value.
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Data rows read, header excluded.
    pub total_rows: usize,
    pub scales: Vec<ScaleSummary>,
    /// Defined scales with no column in the export.
    pub missing: Vec<String>,
}

impl Summary {
    /// Order by mean ascending, scales without data last.
    pub fn sort_by_mean(&mut self) {
        self.scales.sort_by(|a, b| match (a.mean, b.mean) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }
}

/// Parse a stored score cell.
///
/// Accepts `,` as the decimal separator. Empty or unparseable cells are
/// treated as missing.
pub fn parse_score_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Summarize an exported submissions table (CSV with a header row).
///
/// Scale columns are found by header name. Rows may be shorter than the
/// header; absent cells count as missing.
pub fn summarize<R: Read>(reader: R, questionnaire: &Questionnaire) -> Result<Summary> {
    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers().context("Failed to read export header")?.clone();

    let mut missing = Vec::new();
    let mut columns = Vec::new();
    for scale in questionnaire.definitions().iter() {
        match headers.iter().position(|h| h.trim() == scale.name) {
            Some(index) => columns.push((scale, index)),
            None => missing.push(scale.name.clone()),
        }
    }
    if !missing.is_empty() {
        warn!(count = missing.len(), "export is missing scale columns");
    }

    let mut sums = vec![(0.0_f64, 0_usize); columns.len()];
    let mut total_rows = 0;
    for (line, record) in csv.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read export row {}", line + 2))?;
        total_rows += 1;
        for (slot, (_, index)) in sums.iter_mut().zip(&columns) {
            if let Some(value) = record.get(*index).and_then(parse_score_cell) {
                slot.0 += value;
                slot.1 += 1;
            }
        }
    }
    debug!(rows = total_rows, scales = columns.len(), "summarized export");

    let scales = columns
        .iter()
        .zip(sums)
        .map(|((scale, _), (sum, count))| ScaleSummary {
            scale: scale.name.clone(),
            polarity: scale.polarity,
            respondents: count,
            mean: (count > 0).then(|| round2(sum / count as f64)),
        })
        .collect();

    Ok(Summary {
        total_rows,
        scales,
        missing,
    })
}
