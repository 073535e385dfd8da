//! Command handlers, one module per subcommand.
//!
//! Helpers shared by `generate`, `inspect` and `interactive` live here:
//! reading the sample and building the core services from config.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod inspect;
pub mod interactive;

use std::io::{IsTerminal as _, Read as _};
use std::path::{Path, PathBuf};

use tracing::debug;

use entigen_core::domain::{EmitOptions, Emitter, Inferencer};

use crate::{
    cli::SampleInput,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli as _},
};

/// Read the sample text from `--json`, `-i FILE`, `-i -` or piped stdin.
pub(crate) fn read_sample(input: &SampleInput) -> CliResult<String> {
    let text = match (&input.json, &input.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path.as_os_str() == "-" => read_stdin()?,
        (None, Some(path)) => {
            if !path.exists() {
                return Err(CliError::InputNotFound { path: path.clone() });
            }
            std::fs::read_to_string(path)
                .with_cli_context(|| format!("Failed to read sample '{}'", path.display()))?
        }
        (None, None) if !std::io::stdin().is_terminal() => read_stdin()?,
        (None, None) => {
            return Err(CliError::InvalidInput {
                message: "no JSON sample given".into(),
                source: None,
            });
        }
    };

    if text.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "the JSON sample is empty".into(),
            source: None,
        });
    }
    debug!(bytes = text.len(), "sample read");
    Ok(text)
}

fn read_stdin() -> CliResult<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .with_cli_context(|| "Failed to read sample from stdin")?;
    Ok(text)
}

pub(crate) fn inferencer(config: &AppConfig, strict: bool) -> Inferencer {
    Inferencer::new(config.naming.clone(), config.inference.policy(strict))
}

/// Emitter from config alone; unset import prefixes are filled in once the
/// output folders are known.
pub(crate) fn emitter(config: &AppConfig) -> Emitter {
    let emit = &config.emit;
    let options = EmitOptions {
        hive: emit.hive,
        hive_type_id: emit.hive_type_id,
        entity_import_prefix: emit.entity_import_prefix.clone(),
        model_import_prefix: emit.model_import_prefix.clone(),
    };
    debug!(?options, "emit options resolved");
    Emitter::new(config.naming.clone(), options)
}

/// Emitter for files landing in `entity_dir` and `model_dir`.
///
/// Both folders are resolved against the working directory first, so a mix
/// of absolute and relative folders still yields relative imports.
pub(crate) fn emitter_for(config: &AppConfig, entity_dir: &Path, model_dir: &Path) -> Emitter {
    emitter(config).for_folders(&absolute(entity_dir), &absolute(model_dir))
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
