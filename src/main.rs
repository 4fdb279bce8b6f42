//! ddlforge
//!
//! Command-line harness around the schema engine: loads a model exported as
//! JSON, sanitizes it, and prints either the generated DDL or a validation
//! report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use ddlforge_codegen::{DdlGenerator, DdlOptions};
use ddlforge_editor::{EditorConfig, SchemaEditor};
use ddlforge_model::{Model, load_model, save_model, sanitize_model, validate_model};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ddlforge", version, about = "Schema consistency engine and DDL generator")]
struct Cli {
    /// Log engine activity at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate SQL DDL from a model file
    Generate(GenerateArgs),

    /// Check a model file against the structural invariants
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Model JSON file
    file: PathBuf,

    /// Write the script here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Schema that already exists and gets no CREATE SCHEMA
    #[arg(long, default_value = ddlforge_model::DEFAULT_SCHEMA_NAME, env = "DDLFORGE_DEFAULT_SCHEMA")]
    default_schema: String,

    /// Longest CREATE TABLE kept on a single line
    #[arg(long, default_value_t = 80)]
    inline_width: usize,

    /// Leave out COMMENT ON statements
    #[arg(long)]
    no_comments: bool,

    /// Leave out CREATE INDEX statements
    #[arg(long)]
    no_indexes: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Model JSON file
    file: PathBuf,

    /// Save the repaired model to this path
    #[arg(long)]
    sanitized_output: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Model> {
    load_model(path).with_context(|| format!("could not load model from {}", path.display()))
}

fn generate(args: GenerateArgs) -> Result<()> {
    let (editor, repairs) = SchemaEditor::from_model(load(&args.file)?, EditorConfig::default());
    if !repairs.is_clean() {
        eprintln!(
            "{} {} repair(s) applied while loading",
            "note:".yellow().bold(),
            repairs.len()
        );
    }

    let mut options = DdlOptions::new()
        .with_default_schema(args.default_schema)
        .with_inline_width(args.inline_width);
    if args.no_comments {
        options = options.without_comments();
    }
    if args.no_indexes {
        options = options.without_indexes();
    }
    debug!(?options, "Generator options");

    let report = DdlGenerator::new(options).generate_report(editor.model());
    match &args.output {
        Some(path) => {
            fs::write(path, &report.sql)
                .with_context(|| format!("could not write {}", path.display()))?;
            info!(path = %path.display(), "Wrote DDL");
        }
        None => print!("{}", report.sql),
    }

    for table in &report.cyclic_tables {
        eprintln!("{} {} is part of a reference cycle", "warning:".yellow().bold(), table);
    }
    for skipped in &report.skipped_foreign_keys {
        eprintln!(
            "{} skipped foreign key {} on {}: {}",
            "warning:".yellow().bold(),
            skipped.name,
            skipped.table,
            skipped.reason
        );
    }
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let model = load(&args.file)?;
    let result = validate_model(&model);

    for issue in &result.errors {
        println!("{} {} {}", "error".red().bold(), issue.code.as_str().dimmed(), issue);
    }
    for issue in &result.warnings {
        println!("{} {} {}", "warning".yellow().bold(), issue.code.as_str().dimmed(), issue);
    }

    let (sanitized, report) = sanitize_model(model);
    if let Some(path) = &args.sanitized_output {
        save_model(&sanitized, path)
            .with_context(|| format!("could not save sanitized model to {}", path.display()))?;
        println!("{} {} repair(s) saved to {}", "fixed".green().bold(), report.len(), path.display());
    }

    if !result.is_valid() {
        bail!(
            "{} error(s), {} warning(s); {} repair(s) would make the model valid",
            result.errors.len(),
            result.warnings.len(),
            report.len()
        );
    }
    println!(
        "{} {} table(s), {} foreign key(s), {} warning(s)",
        "valid".green().bold(),
        sanitized.tables.len(),
        sanitized.foreign_key_count(),
        result.warnings.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Validate(args) => validate(args),
    }
}
