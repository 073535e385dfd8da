//! CLI argument definitions using the clap derive API.
//!
//! This module is the only place that knows about argument names, aliases,
//! help text, and value enums. No generation logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "entigen",
    bin_name = "entigen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Entity and model classes from a sample JSON document",
    long_about = "entigen infers field types from a sample JSON document and writes \
                  a Dart entity, its json_serializable model, and one value class \
                  per nested object.",
    after_help = "EXAMPLES:\n\
        \x20 entigen generate User -i user.json\n\
        \x20 curl -s https://api.example.com/me | entigen gen User -o lib/generated\n\
        \x20 entigen inspect Order --json '{\"items\": [{\"id\": 1}]}'\n\
        \x20 entigen interactive",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate entity, model and nested classes from a sample.
    #[command(
        visible_alias = "gen",
        about = "Generate classes from a JSON sample",
        after_help = "EXAMPLES:\n\
            \x20 entigen generate User -i user.json\n\
            \x20 entigen generate User --json '{\"uuid\": \"abc\"}' --stdout\n\
            \x20 entigen generate Order -i order.json --entity-dir lib/domain/entities --model-dir lib/data/models\n\
            \x20 entigen generate Order -i order.json --dry-run"
    )]
    Generate(GenerateArgs),

    /// Prompt for class name, sample and folders.
    #[command(about = "Generate classes through interactive prompts")]
    Interactive,

    /// Print the schemas inferred from a sample without emitting code.
    #[command(
        about = "Show the inferred schemas",
        after_help = "EXAMPLES:\n\
            \x20 entigen inspect User -i user.json\n\
            \x20 entigen inspect User -i user.json --format json"
    )]
    Inspect(InspectArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 entigen init                      # platform config dir\n\
            \x20 entigen --config entigen.toml init  # explicit location"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 entigen completions bash > ~/.local/share/bash-completion/completions/entigen\n\
            \x20 entigen completions zsh  > ~/.zfunc/_entigen\n\
            \x20 entigen completions fish > ~/.config/fish/completions/entigen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 entigen config get emit.hive_type_id\n\
            \x20 entigen config list\n\
            \x20 entigen config path"
    )]
    Config(ConfigCommands),
}

// ── sample input ──────────────────────────────────────────────────────────────

/// Where the sample JSON comes from. Standard input is used when neither
/// flag is given and stdin is not a terminal.
#[derive(Debug, Args)]
pub struct SampleInput {
    /// Read the sample from a file; `-` reads standard input.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        conflicts_with = "json",
        help = "Sample JSON file (- for stdin)"
    )]
    pub input: Option<PathBuf>,

    /// Inline sample text.
    #[arg(long = "json", value_name = "TEXT", help = "Inline sample JSON")]
    pub json: Option<String>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `entigen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Root class name, e.g. `User` or `UserEntity`.
    #[arg(value_name = "CLASS", help = "Root class name")]
    pub class: String,

    #[command(flatten)]
    pub sample: SampleInput,

    /// Put entity and model files into the same folder.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Folder for all generated files"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long = "entity-dir",
        value_name = "DIR",
        help = "Folder for entity and nested class files"
    )]
    pub entity_dir: Option<PathBuf>,

    #[arg(long = "model-dir", value_name = "DIR", help = "Folder for the model file")]
    pub model_dir: Option<PathBuf>,

    /// List the files that would be written without writing them.
    #[arg(long = "dry-run", conflicts_with = "stdout", help = "Show what would be written")]
    pub dry_run: bool,

    /// Print the generated sources instead of writing files.
    #[arg(long = "stdout", help = "Print generated sources to stdout")]
    pub stdout: bool,

    #[arg(long = "hive-type-id", value_name = "N", help = "Hive typeId of the root entity")]
    pub hive_type_id: Option<u32>,

    #[arg(long = "no-hive", help = "Omit Hive annotations")]
    pub no_hive: bool,

    /// Fail on shapes that cannot be typed instead of using `dynamic`.
    #[arg(long = "strict", help = "Fail on untypeable values")]
    pub strict: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `entigen inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    #[arg(value_name = "CLASS", help = "Root class name")]
    pub class: String,

    #[command(flatten)]
    pub sample: SampleInput,

    #[arg(long = "strict", help = "Fail on untypeable values")]
    pub strict: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: InspectFormat,
}

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    /// One block per class.
    Table,
    /// The registry as JSON.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `entigen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `entigen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `entigen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `emit.hive_type_id`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "entigen",
            "generate",
            "User",
            "-i",
            "user.json",
            "--entity-dir",
            "lib/entities",
            "--hive-type-id",
            "9",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.class, "User");
        assert_eq!(args.sample.input, Some(PathBuf::from("user.json")));
        assert_eq!(args.entity_dir, Some(PathBuf::from("lib/entities")));
        assert_eq!(args.hive_type_id, Some(9));
        assert!(!args.strict);
    }

    #[test]
    fn gen_alias() {
        let cli = Cli::parse_from(["entigen", "gen", "User", "--json", "{}", "--stdout"]);
        assert!(matches!(cli.command, Commands::Generate(ref a) if a.stdout));
    }

    #[test]
    fn input_and_json_conflict() {
        let result =
            Cli::try_parse_from(["entigen", "gen", "User", "-i", "a.json", "--json", "{}"]);
        assert!(result.is_err());
    }

    #[test]
    fn dry_run_and_stdout_conflict() {
        let result =
            Cli::try_parse_from(["entigen", "gen", "User", "--json", "{}", "--dry-run", "--stdout"]);
        assert!(result.is_err());
    }

    #[test]
    fn inspect_defaults_to_table() {
        let cli = Cli::parse_from(["entigen", "inspect", "User", "--json", "{}"]);
        assert!(matches!(
            cli.command,
            Commands::Inspect(ref a) if a.format == InspectFormat::Table
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["entigen", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
