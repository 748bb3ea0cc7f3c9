use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::report::{Assessment, Summary};
use crate::scoring::{Polarity, Questionnaire, ScoreResult};

const SCORE_WIDTH: usize = 6; // fits "100.00"
const ASSESSMENT_WIDTH: usize = 9; // fits "attention"
const SEPARATOR: &str = "  ";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a scale score with two decimals, or "N/A" when undefined
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:.2}", value),
        None => "N/A".to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a scale name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pad by character count; `format!` width counts bytes of accented names wrong
fn pad_name(name: &str, width: usize) -> String {
    let len = name.chars().count();
    format!("{}{}", name, " ".repeat(width.saturating_sub(len)))
}

/// Width available for scale names, given the widest name
fn name_column_width<'a>(names: impl Iterator<Item = &'a str>, term_width: Option<usize>) -> usize {
    let widest = names.map(|n| n.chars().count()).max().unwrap_or(0);
    let fixed = SEPARATOR.len() * 2 + SCORE_WIDTH + ASSESSMENT_WIDTH;
    match term_width {
        Some(width) if width > fixed + 10 => widest.min(width - fixed),
        Some(_) => widest.min(20),
        None => widest,
    }
}

fn format_assessment(assessment: Option<Assessment>, use_colors: bool) -> String {
    let label = assessment.map(|a| a.label()).unwrap_or("-");
    if !use_colors {
        return label.to_string();
    }
    match assessment {
        Some(Assessment::Favorable) => label.green().to_string(),
        Some(Assessment::Attention) => label.yellow().to_string(),
        Some(Assessment::Critical) => label.red().bold().to_string(),
        None => label.dimmed().to_string(),
    }
}

fn format_row(
    name: &str,
    name_width: usize,
    score: Option<f64>,
    polarity: Polarity,
    suffix: &str,
    use_colors: bool,
) -> String {
    let name = pad_name(&truncate_name(name, name_width), name_width);
    let score_str = format!("{:>width$}", format_score(score), width = SCORE_WIDTH);
    let assessment = format_assessment(Assessment::of(score, polarity), use_colors);

    let line = if use_colors {
        let score_str = if score.is_some() {
            score_str.bold().to_string()
        } else {
            score_str.dimmed().to_string()
        };
        format!("{}{}{}{}{}", name, SEPARATOR, score_str, SEPARATOR, assessment)
    } else {
        format!("{}{}{}{}{}", name, SEPARATOR, score_str, SEPARATOR, assessment)
    };

    if suffix.is_empty() {
        line.trim_end().to_string()
    } else {
        format!("{}{}{}", line, SEPARATOR, suffix)
    }
}

/// Format one respondent's scores, one scale per line, in definition order.
/// Columns: scale name, score (or N/A), assessment
pub fn format_scores_table(
    result: &ScoreResult,
    questionnaire: &Questionnaire,
    use_colors: bool,
) -> String {
    if result.is_empty() {
        return "No scales defined.".to_string();
    }

    let name_width = name_column_width(
        result.entries().iter().map(|e| e.scale.as_str()),
        get_terminal_width(),
    );

    result
        .entries()
        .iter()
        .map(|entry| {
            let polarity = questionnaire
                .definitions()
                .get(&entry.scale)
                .map(|s| s.polarity)
                .unwrap_or_default();
            format_row(&entry.scale, name_width, entry.score, polarity, "", use_colors)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format cross-respondent means with respondent counts and missing columns
pub fn format_summary_table(summary: &Summary, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let heading = format!("{} responses", summary.total_rows);
    lines.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading
    });

    if summary.scales.is_empty() {
        lines.push("No scale columns found in export.".to_string());
    } else {
        let name_width = name_column_width(
            summary.scales.iter().map(|s| s.scale.as_str()),
            get_terminal_width(),
        );
        for scale in &summary.scales {
            let count = format!("n={}", scale.respondents);
            lines.push(format_row(
                &scale.scale,
                name_width,
                scale.mean,
                scale.polarity,
                &count,
                use_colors,
            ));
        }
    }

    if !summary.missing.is_empty() {
        let note = format!("Missing columns: {}", summary.missing.join(", "));
        lines.push(if use_colors {
            note.dimmed().to_string()
        } else {
            note
        });
    }

    lines.join("\n")
}

/// List scales with their polarity and member questions
pub fn format_scales_list(questionnaire: &Questionnaire, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let title = match questionnaire.version() {
        Some(version) => format!("{} (version {})", questionnaire.name(), version),
        None => questionnaire.name().to_string(),
    };
    lines.push(if use_colors { title.bold().to_string() } else { title });

    for (i, scale) in questionnaire.definitions().iter().enumerate() {
        let questions = scale
            .questions
            .iter()
            .map(|q| q.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let polarity = format!("[{}]", scale.polarity.label());
        if use_colors {
            lines.push(format!(
                "{:>2}. {} {}: {}",
                i + 1,
                scale.name,
                polarity.dimmed(),
                questions.cyan()
            ));
        } else {
            lines.push(format!("{:>2}. {} {}: {}", i + 1, scale.name, polarity, questions));
        }
    }

    lines.join("\n")
}
