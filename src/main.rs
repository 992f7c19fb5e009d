use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lox_scan::render;
use lox_scan::scanner;

/// Exit status when the source had lexical errors.
const EXIT_SCAN_ERROR: u8 = 65;

#[derive(Parser, Debug)]
#[command(name = "lox-scan", about = "A Lox source tokenizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a Lox source file and print its tokens
    Tokenize {
        /// Lox source file to scan
        file: PathBuf,

        /// Token output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Render scan errors as annotated source diagnostics
        #[arg(long)]
        pretty: bool,
    },
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read source file '{}'", path.display()))
}

/// Log to stderr, only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn tokenize(file: &Path, format: &str, pretty: bool) -> Result<ExitCode> {
    let source = read_source(file)?;
    let scanned = scanner::scan(&source);

    eprint!("{}", render::errors(&scanned.errors, file, &source, pretty));

    let rendered = match format {
        "json" => render::to_json(&scanned.tokens).context("serialize tokens to JSON")?,
        _ => render::to_text(&scanned.tokens),
    };
    print!("{rendered}");

    if scanned.has_errors() {
        Ok(ExitCode::from(EXIT_SCAN_ERROR))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Tokenize {
            file,
            format,
            pretty,
        } => tokenize(&file, &format, pretty),
    }
}
