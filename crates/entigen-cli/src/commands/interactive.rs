//! `entigen interactive`: the prompt-driven flow.

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[cfg(feature = "interactive")]
pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    use entigen_adapters::LocalFilesystem;
    use entigen_core::application::GenerateService;

    use crate::{error::IntoCli as _, prompter::DialoguerPrompter};

    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read the working directory")?;
    let prompter = DialoguerPrompter::new(cwd);

    // Unset import prefixes are derived from the folders picked at the prompt.
    let service = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        super::inferencer(&config, false),
        super::emitter(&config),
    );

    let report = match service.run_interactive(&prompter) {
        Ok(report) => report,
        Err(e) if e.is_cancelled() => {
            tracing::info!(reason = %e, "interactive run abandoned");
            return Err(CliError::Cancelled);
        }
        Err(e) => return Err(e.into()),
    };

    for class in &report.collisions {
        output.warning(&format!(
            "class {class} was inferred more than once; the last shape was kept"
        ))?;
    }
    for path in &report.written {
        output.success(&format!("Wrote {}", path.display()))?;
    }
    Ok(())
}

#[cfg(not(feature = "interactive"))]
pub fn execute(_config: AppConfig, _output: OutputManager) -> CliResult<()> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
