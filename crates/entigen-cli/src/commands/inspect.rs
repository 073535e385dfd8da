//! `entigen inspect`: show the inferred schemas without emitting code.

use entigen_core::{
    application::GenerateService,
    domain::{Schema, emitter::dart_type},
    error::EntigenError,
};

use crate::{
    cli::{InspectArgs, InspectFormat, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: InspectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let text = super::read_sample(&args.sample)?;
    let sample = GenerateService::parse_sample(&text)?;
    let registry = super::inferencer(&config, args.strict)
        .infer(&args.class, &sample)
        .map_err(EntigenError::from)?;

    if args.format == InspectFormat::Json || output.format() == OutputFormat::Json {
        output.json(&registry)?;
        return Ok(());
    }

    for schema in registry.iter() {
        output.header(&heading(schema))?;
        for row in rows(schema) {
            output.detail(&row)?;
        }
    }
    for class in registry.collisions() {
        output.warning(&format!(
            "class {class} was inferred more than once; the last shape was kept"
        ))?;
    }
    Ok(())
}

fn heading(schema: &Schema) -> String {
    if schema.is_root {
        format!("{} (root)", schema.class_name)
    } else {
        schema.class_name.clone()
    }
}

/// One aligned `key  inferred  dart` line per field.
fn rows(schema: &Schema) -> Vec<String> {
    if schema.fields.is_empty() {
        return vec!["(no fields)".into()];
    }
    let key_width = schema.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    let kinds: Vec<String> = schema.fields.iter().map(|f| f.ty.to_string()).collect();
    let kind_width = kinds.iter().map(String::len).max().unwrap_or(0);

    schema
        .fields
        .iter()
        .zip(&kinds)
        .map(|(field, kind)| {
            format!(
                "{:<key_width$}  {:<kind_width$}  {}",
                field.name,
                kind,
                dart_type(&field.ty)
            )
            .trim_end()
            .to_owned()
        })
        .collect()
}
