//! CFL command-line tool: converts a CFL document to YAML, JSON, TOML or CBOR.
//!
//! Usage: cfl [OPTIONS] <FILE>
//!
//! The merged document (constants first, then the parsed blocks) is written
//! to stdout, or to the file named by `--output`. Warnings about skipped
//! lines go to stderr unless `--quiet` is given.

use clap::{ArgAction, Parser, ValueEnum};
use libcfl::transcode;
use libcfl::{parse_file, Format, ParseError, ParseOptions, DEFAULT_MAX_DEPTH};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};

mod logging;

/// Output format for the converted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
    Toml,
    Cbor,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Json => Format::Json,
            OutputFormat::Toml => Format::Toml,
            OutputFormat::Cbor => Format::Cbor,
        }
    }
}

/// Convert a CFL configuration file to a standard data format.
#[derive(Parser, Debug)]
#[command(name = "cfl", version, about)]
struct Cli {
    /// Path to the .cfl source file
    file: PathBuf,

    /// Output format [default: from the --output extension, else yaml]
    #[arg(short, long = "to", value_enum)]
    to: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only check that the file parses
    #[arg(long)]
    check: bool,

    /// Fail on identifier values that name no declared constant
    #[arg(long)]
    strict: bool,

    /// Maximum block nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Suppress warnings
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let options = ParseOptions::new()
        .with_strict_references(cli.strict)
        .with_max_depth(cli.max_depth);

    info!(file = %cli.file.display(), "parsing");
    let doc = match parse_file(&cli.file, &options) {
        Ok(doc) => doc,
        Err(e) => {
            report(&e);
            return 1;
        }
    };

    if !cli.quiet {
        for warning in &doc.warnings {
            eprintln!("{}", warning);
        }
    }

    let value = match doc.to_value() {
        Ok(v) => v,
        Err(e) => {
            report(&e);
            return 1;
        }
    };

    if cli.check {
        println!("{}: ok", cli.file.display());
        return 0;
    }

    let format = output_format(cli);
    let output = match transcode::encode(&value, format) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!(
                "Error: Cannot convert to {}: {}",
                format.extension().to_uppercase(),
                e
            );
            return 1;
        }
    };
    debug!(?format, bytes = output.len(), "encoded");

    match write_output(&output, cli.output.as_ref(), format) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// An explicit `--to` wins, then the `--output` extension, then YAML.
fn output_format(cli: &Cli) -> Format {
    if let Some(to) = cli.to {
        return Format::from(to);
    }
    cli.output
        .as_ref()
        .and_then(|path| path.extension())
        .and_then(|ext| Format::from_name(&ext.to_string_lossy().to_ascii_lowercase()))
        .unwrap_or(Format::Yaml)
}

/// Errors tied to a source line already start with `PATH:LINE:`.
fn report(e: &ParseError) {
    if e.location().is_some() {
        eprintln!("{}", e);
    } else {
        eprintln!("Error: {}", e);
    }
}

fn write_output(output: &[u8], output_file: Option<&PathBuf>, format: Format) -> Result<(), String> {
    if let Some(path) = output_file {
        return fs::write(path, output)
            .map_err(|e| format!("Cannot write {}: {}", path.display(), e));
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(output)
        .and_then(|()| {
            // Ensure text output ends with newline
            if !format.is_binary() && !output.ends_with(b"\n") {
                handle.write_all(b"\n")?;
            }
            handle.flush()
        })
        .map_err(|e| format!("Cannot write to stdout: {}", e))
}
