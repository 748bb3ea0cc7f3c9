use clap::{Parser, Subcommand, ValueEnum};
use copsoq_score::report::{self, Submission};
use copsoq_score::scoring::{Questionnaire, ResponseSet};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, warn};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScoreFormat {
    Table,
    Json,
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SummaryFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one respondent's answers (JSON object of question id -> label)
    Score {
        /// Responses file; reads stdin when omitted
        responses: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: ScoreFormat,
        /// Print the column header before the CSV row
        #[arg(long)]
        header: bool,
    },
    /// Mean score per scale across an exported submissions CSV
    Summary {
        /// CSV export with a header row
        export: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: SummaryFormat,
        /// Order scales by mean, lowest first
        #[arg(long)]
        sort: bool,
    },
    /// Check the questionnaire configuration and report every problem
    Validate,
    /// List scales with their polarity and questions
    Scales,
    /// Write the bundled questionnaire to a file for editing
    Init {
        /// Destination (defaults to ~/.config/copsoq-score/questionnaire.yaml)
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "copsoq-score")]
#[command(about = "Score COPSOQ psychosocial-risk questionnaires", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to questionnaire file (defaults to ~/.config/copsoq-score/questionnaire.yaml,
    /// then the bundled COPSOQ II short form)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = copsoq_score::telemetry::init(cli.verbose) {
        eprintln!("Logging setup failed: {}", e);
    }

    let use_colors = copsoq_score::output::should_use_colors();

    match cli.command {
        Commands::Init { path, force } => {
            match copsoq_score::config::init::run_init(path, force) {
                Ok(path) => println!("Questionnaire written to {}", path.display()),
                Err(e) => {
                    eprintln!("Init failed: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Validate => {
            let questionnaire = load_questionnaire_or_exit(cli.config);
            println!(
                "{}: OK ({} scales, {} questions)",
                questionnaire.name(),
                questionnaire.definitions().len(),
                questionnaire.items().len()
            );
        }
        Commands::Scales => {
            let questionnaire = load_questionnaire_or_exit(cli.config);
            println!(
                "{}",
                copsoq_score::output::format_scales_list(&questionnaire, use_colors)
            );
        }
        Commands::Score {
            responses,
            format,
            header,
        } => {
            let questionnaire = load_questionnaire_or_exit(cli.config);
            let responses = match read_responses(responses) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            warn_unscorable(&questionnaire, &responses);

            match format {
                ScoreFormat::Table => {
                    let result = questionnaire.score(&responses);
                    println!(
                        "{}",
                        copsoq_score::output::format_scores_table(&result, &questionnaire, use_colors)
                    );
                }
                ScoreFormat::Json => {
                    let result = questionnaire.score(&responses);
                    match serde_json::to_string_pretty(&result) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Failed to serialize scores: {}", e);
                            std::process::exit(EXIT_INPUT);
                        }
                    }
                }
                ScoreFormat::Csv => {
                    let submission =
                        Submission::new(&questionnaire, &responses, chrono::Local::now());
                    if let Err(e) =
                        report::write_csv(io::stdout().lock(), &questionnaire, &[submission], header)
                    {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            }
        }
        Commands::Summary {
            export,
            format,
            sort,
        } => {
            let questionnaire = load_questionnaire_or_exit(cli.config);
            let summary = File::open(&export)
                .map_err(anyhow::Error::from)
                .and_then(|file| report::summarize(file, &questionnaire));
            let mut summary = match summary {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to summarize {}: {:#}", export.display(), e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            if sort {
                summary.sort_by_mean();
            }

            match format {
                SummaryFormat::Table => {
                    println!(
                        "{}",
                        copsoq_score::output::format_summary_table(&summary, use_colors)
                    );
                }
                SummaryFormat::Json => match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize summary: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load and validate the questionnaire, exiting with every config error on failure
fn load_questionnaire_or_exit(path: Option<PathBuf>) -> Questionnaire {
    let config = match copsoq_score::config::load_questionnaire(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    match Questionnaire::from_config(config) {
        Ok(q) => {
            debug!(
                name = q.name(),
                scales = q.definitions().len(),
                "questionnaire ready"
            );
            q
        }
        Err(errors) => {
            eprintln!("Questionnaire config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    }
}

/// Read a response set from a file, or stdin when no path is given
fn read_responses(path: Option<PathBuf>) -> anyhow::Result<ResponseSet> {
    use anyhow::Context;

    let mut content = String::new();
    match path {
        Some(ref path) => {
            File::open(path)
                .and_then(|mut f| f.read_to_string(&mut content))
                .with_context(|| format!("Failed to read responses from {}", path.display()))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read responses from stdin")?;
        }
    }

    serde_json::from_str(&content).context("Responses must be a JSON object of question id to label or null")
}

/// Answers the scorer will silently skip are worth a warning at the CLI
fn warn_unscorable(questionnaire: &Questionnaire, responses: &ResponseSet) {
    let known: std::collections::HashSet<&str> =
        questionnaire.question_ids().map(|q| q.as_str()).collect();

    for (id, answer) in responses.iter() {
        if !known.contains(id.as_str()) {
            debug!(question = %id, "answer for a question outside the questionnaire");
            continue;
        }
        if let Some(label) = answer {
            if questionnaire.vocabulary().resolve(label).is_none() {
                warn!(question = %id, label, "unrecognized answer label, treated as unanswered");
            }
        }
    }
}
