use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::get_config_path;
use crate::scoring::{builtin, QuestionnaireConfig};

/// Write `config` as YAML to `path` atomically.
///
/// Refuses to replace an existing file unless `force` is set. Parent
/// directories are created as needed.
pub fn write_questionnaire(path: &Path, config: &QuestionnaireConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Questionnaire already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize questionnaire: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write questionnaire")?;
    file.commit().context("Failed to save questionnaire")?;

    info!(path = %path.display(), "wrote questionnaire");
    Ok(())
}

/// Write the bundled COPSOQ II short form so it can be edited.
///
/// Uses the default config path when `path` is None. Returns the path written.
pub fn run_init(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };
    write_questionnaire(&path, &builtin::copsoq_br_short(), force)?;
    Ok(path)
}
