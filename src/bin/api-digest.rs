//! API Digest CLI
//!
//! Loads an API description, resolves component references and writes the
//! flattened text digest.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use api_digest::{load_and_resolve, render_with, DigestError, Document, RenderOptions};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "api-digest")]
#[command(about = "Flatten a Swagger 2.0 or endpoint-list API description into a text digest")]
#[command(version)]
struct Cli {
    /// API description (JSON or YAML, detected from content)
    #[arg(default_value = "swagger.json")]
    input: PathBuf,

    /// Output file for the digest
    #[arg(long, short, default_value = "llm1.txt", conflicts_with = "stdout")]
    output: PathBuf,

    /// Print the digest to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Emit the resolved document as JSON instead of the text digest
    #[arg(long)]
    emit_json: bool,

    /// Endpoint descriptions longer than this are truncated
    #[arg(long, default_value_t = api_digest::DEFAULT_TRUNCATE_THRESHOLD)]
    truncate_threshold: usize,

    /// Length an over-long description is cut down to
    #[arg(long, default_value_t = api_digest::DEFAULT_TRUNCATE_LENGTH)]
    truncate_length: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run(cli: &Cli) -> Result<(), u8> {
    info!("Reading spec from: {}", cli.input.display());
    let document = load_and_resolve(&cli.input).map_err(|e| {
        match &e {
            DigestError::Load(err) => eprintln!("Error loading API spec: {}", err),
            DigestError::Reference(err) => eprintln!("Error resolving references: {}", err),
        }
        e.exit_code() as u8
    })?;

    info!(
        "Loaded doc: title={} version={} endpoints={}",
        document.title,
        document.version,
        document.endpoints.len()
    );

    let output = if cli.emit_json {
        to_json(&document)?
    } else {
        let options = RenderOptions::new()
            .truncate_threshold(cli.truncate_threshold)
            .truncate_length(cli.truncate_length);
        render_with(&document, &options)
    };

    if cli.stdout {
        print!("{}", output);
        return Ok(());
    }

    write_output(&cli.output, &output)?;
    println!("Successfully wrote API summary to {}", cli.output.display());
    Ok(())
}

fn to_json(document: &Document) -> Result<String, u8> {
    serde_json::to_string_pretty(document).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })
}

fn write_output(path: &Path, content: &str) -> Result<(), u8> {
    info!("Writing summary to {}...", path.display());
    std::fs::write(path, content).map_err(|e| {
        eprintln!("Error writing to {}: {}", path.display(), e);
        3u8
    })
}
