pub mod init;

use crate::scoring::{builtin, QuestionnaireConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Get the config directory path (~/.config/copsoq-score/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("copsoq-score"))
}

/// Get the default questionnaire file path (~/.config/copsoq-score/questionnaire.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("questionnaire.yaml"))
}

/// Parse a questionnaire from YAML text.
pub fn parse_questionnaire(yaml: &str) -> Result<QuestionnaireConfig> {
    serde_saphyr::from_str(yaml).context("Failed to parse questionnaire: invalid YAML")
}

/// Load questionnaire configuration.
///
/// An explicit `path` must exist. Without one, the default config path is used
/// when present; otherwise the bundled COPSOQ II short form is returned.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_questionnaire(path: Option<PathBuf>) -> Result<QuestionnaireConfig> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Questionnaire file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path() {
            Ok(default) if default.exists() => default,
            _ => {
                debug!("no questionnaire file configured, using bundled COPSOQ II short form");
                return Ok(builtin::copsoq_br_short());
            }
        },
    };

    read_questionnaire(&config_path)
}

fn read_questionnaire(path: &Path) -> Result<QuestionnaireConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read questionnaire at {}", path.display()))?;

    let config: QuestionnaireConfig = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse questionnaire: invalid YAML in {}", path.display()))?;

    info!(
        path = %path.display(),
        name = %config.name,
        scales = config.scales.len(),
        "loaded questionnaire"
    );
    Ok(config)
}
