use anyhow::{Context, Result};
use boundcase_core::schema::Issue;
use boundcase_core::{generate, GenerateError, GenerateOptions, Schema, TestCase, Value, Warning};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "boundcase")]
#[command(about = "Generate boundary-value test cases from a schema file")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate valid and invalid cases for a schema
    Generate {
        /// Input schema file
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generation options file (kebab-case JSON)
        #[arg(long)]
        options: Option<PathBuf>,

        /// RNG seed, overrides the options file
        #[arg(long)]
        seed: Option<u64>,

        /// Clock anchor for calendar cases (RFC 3339), overrides the options file
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Emit only one bucket
        #[arg(long, value_enum)]
        only: Option<Bucket>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Validate one JSON value against a schema; exits 1 when it is rejected
    Check {
        /// Input schema file
        schema: PathBuf,

        /// The value, as inline JSON
        value: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Bucket {
    Valid,
    Invalid,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

#[derive(Serialize)]
struct GenerateReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<Vec<TestCase>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid: Option<Vec<TestCase>>,
    warnings: Vec<Warning>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    is_valid: bool,
    issues: Vec<Issue>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            input,
            output,
            options,
            seed,
            now,
            only,
            format,
        } => {
            let schema = read_schema(&input)?;

            let mut options = match options {
                Some(path) => read_json::<GenerateOptions>(&path, "options")?,
                None => GenerateOptions::default(),
            };
            if let Some(seed) = seed {
                options = options.with_seed(seed);
            }
            if let Some(now) = now {
                options = options.with_now(now);
            }

            let generated =
                generate(&schema, &options).map_err(|e| structured(e, "Generation failed"))?;
            debug!(
                valid = generated.valid.len(),
                invalid = generated.invalid.len(),
                warnings = generated.warnings.len(),
                "generation finished"
            );

            for warning in &generated.warnings {
                let at = if warning.path.is_empty() {
                    "(root)"
                } else {
                    warning.path.as_str()
                };
                eprintln!("Warning: {} at {}", warning.message, at);
            }

            let report = GenerateReport {
                valid: (only != Some(Bucket::Invalid)).then_some(generated.valid),
                invalid: (only != Some(Bucket::Valid)).then_some(generated.invalid),
                warnings: generated.warnings,
            };
            write_json(&report, output.as_ref(), format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            schema,
            value,
            format,
        } => {
            let schema = read_schema(&schema)?;
            let raw: serde_json::Value =
                serde_json::from_str(&value).context("Failed to parse value as JSON")?;

            let report = match schema.safe_parse(&Value::from(raw)) {
                Ok(()) => CheckReport {
                    is_valid: true,
                    issues: Vec::new(),
                },
                Err(error) => CheckReport {
                    is_valid: false,
                    issues: error.issues,
                },
            };
            write_json(&report, None, format)?;
            Ok(if report.is_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn read_schema(path: &Path) -> Result<Schema> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open schema file: {}", path.display()))?;
    Schema::from_json(&text)
        .map_err(|e| structured(e, format!("Failed to parse schema from: {}", path.display())))
}

/// Carry a core error's code and path to stderr as JSON.
fn structured(err: GenerateError, context: impl Into<String>) -> anyhow::Error {
    anyhow::anyhow!("{}", err.to_json()).context(context.into())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", what, path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {} from: {}", what, path.display()))
}

fn write_json<T: Serialize>(val: &T, path: Option<&PathBuf>, format: OutputFormat) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
