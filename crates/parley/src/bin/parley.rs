//! Parley command-line tool.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parley::{
    ChatHistory, Dialect, LogFormat, ParleyConfig, SchemaConfig, SchemaSynthesizer, ToolRegistry,
    VariadicKeywordPolicy, init_tracing_with, validate_history,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Render tool schemas and check chat histories")]
#[command(version)]
struct Cli {
    /// Log format: pretty or json
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tool schemas of a manifest for one dialect
    Schema {
        /// Tool manifest (TOML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Target dialect: openai or genai
        #[arg(short, long, default_value = "openai")]
        dialect: Dialect,

        /// Configuration file
        #[arg(short, long, env = "PARLEY_CONFIG")]
        config: Option<PathBuf>,

        /// Disable strict mode
        #[arg(long)]
        non_strict: bool,

        /// Leave out tools with variadic keyword parameters instead of failing
        #[arg(long)]
        skip_variadic_keyword: bool,
    },
    /// Check a saved chat history for integrity errors and role alternation warnings
    Validate {
        /// History file (JSON)
        history: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_with(cli.log_format);

    match cli.command {
        Commands::Schema {
            manifest,
            dialect,
            config,
            non_strict,
            skip_variadic_keyword,
        } => print_schema(
            &manifest,
            dialect,
            config.as_deref(),
            non_strict,
            skip_variadic_keyword,
        ),
        Commands::Validate { history } => validate(&history),
    }
}

fn load_config(path: Option<&Path>) -> Result<ParleyConfig> {
    let config = match path {
        Some(path) => ParleyConfig::from_file(path)?,
        None => ParleyConfig::default(),
    };
    Ok(config.apply_env()?)
}

#[tracing::instrument(skip_all, fields(manifest = %manifest.display(), %dialect))]
fn print_schema(
    manifest: &Path,
    dialect: Dialect,
    config: Option<&Path>,
    non_strict: bool,
    skip_variadic_keyword: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if non_strict || skip_variadic_keyword {
        let schema = SchemaConfig::builder()
            .strict(*config.schema().strict() && !non_strict)
            .on_variadic_keyword(if skip_variadic_keyword {
                VariadicKeywordPolicy::Skip
            } else {
                *config.schema().on_variadic_keyword()
            })
            .build()?;
        config = ParleyConfig::builder()
            .schema(schema)
            .conversion(config.conversion().clone())
            .build()?;
    }

    let registry = ToolRegistry::from_manifest_file(manifest)?;
    info!(tools = registry.len(), "Loaded manifest");

    let schemas =
        SchemaSynthesizer::new(&registry, config.synthesis_options()).synthesize(dialect)?;
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
fn validate(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let history = ChatHistory::from_json(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let warnings = validate_history(history.messages())?;
    for warning in &warnings {
        warn!(%warning, "Role alternation violation");
        println!("warning: {}", warning);
    }
    println!(
        "{}: {} messages, {} warnings",
        path.display(),
        history.messages().len(),
        warnings.len()
    );
    Ok(())
}
