//! `entigen generate`: non-interactive generation.

use std::path::PathBuf;

use tracing::{info, instrument};

use entigen_adapters::{LocalFilesystem, MemoryFilesystem};
use entigen_core::application::{GenerateService, GenerationReport, OutputDirs};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, finish_spinner},
};

#[instrument(skip_all, fields(class = %args.class))]
pub fn execute(args: GenerateArgs, mut config: AppConfig, output: OutputManager) -> CliResult<()> {
    let text = super::read_sample(&args.sample)?;
    let sample = GenerateService::parse_sample(&text)?;

    let dirs = resolve_dirs(&args, &config);
    if let Some(id) = args.hive_type_id {
        config.emit.hive_type_id = id;
    }
    if args.no_hive {
        config.emit.hive = false;
    }
    let inferencer = super::inferencer(&config, args.strict);
    let emitter = super::emitter_for(&config, &dirs.entity_dir, &dirs.model_dir);

    if args.stdout {
        let service = GenerateService::new(Box::new(MemoryFilesystem::new()), inferencer, emitter);
        let files = service.plan(&args.class, &sample)?;
        if output.format() == OutputFormat::Json {
            output.json(&files)?;
        } else {
            for file in files.iter() {
                output.emit(&format!("// {}\n{}\n", file.file_name(), file.content))?;
            }
        }
        return Ok(());
    }

    if args.dry_run {
        let service = GenerateService::new(Box::new(MemoryFilesystem::new()), inferencer, emitter);
        let report = service.generate(&args.class, &sample, &dirs)?;
        return print_report(&report, true, &output);
    }

    let service = GenerateService::new(Box::new(LocalFilesystem::new()), inferencer, emitter);
    let spinner = output.spinner(&format!("Generating {}", args.class));
    let result = service.generate(&args.class, &sample, &dirs);
    finish_spinner(spinner);

    let report = result?;
    info!(files = report.written.len(), "generation finished");
    print_report(&report, false, &output)
}

/// `--entity-dir`/`--model-dir`, then `-o`, then config.
fn resolve_dirs(args: &GenerateArgs, config: &AppConfig) -> OutputDirs {
    let pick = |specific: &Option<PathBuf>, configured: &PathBuf| {
        specific
            .clone()
            .or_else(|| args.output.clone())
            .unwrap_or_else(|| configured.clone())
    };
    OutputDirs::new(
        pick(&args.entity_dir, &config.paths.entity_dir),
        pick(&args.model_dir, &config.paths.model_dir),
    )
}

fn print_report(report: &GenerationReport, dry_run: bool, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(report)?;
        return Ok(());
    }

    for class in &report.collisions {
        output.warning(&format!(
            "class {class} was inferred more than once; the last shape was kept"
        ))?;
    }

    if dry_run {
        output.header("Would write:")?;
        for path in &report.written {
            output.detail(&path.display().to_string())?;
        }
    } else {
        for path in &report.written {
            output.success(&format!("Wrote {}", path.display()))?;
        }
    }
    Ok(())
}
