use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use dephrase::core::{OutputFormat, OutputWriter, Overrides, Scope};

mod commands;

#[derive(Parser)]
#[command(name = "dephrase")]
#[command(author, version, long_about = None)]
#[command(
    about = "Remove a phrase from file names across a directory tree",
    long_about = "Scans a directory for files whose names contain a phrase and removes \
                  the phrase. Without the `w` flag nothing is renamed; a report of every \
                  pending change is written either way.",
    after_help = "Flags (case-insensitive, any order):\n  \
                  s  include subdirectories\n  \
                  w  rename files (otherwise dry run)\n  \
                  f  rename folders too\n\n\
                  Example:\n  dephrase sw \"mysite_\""
)]
struct Cli {
    /// Mode flags, e.g. "sw" or "-sw"
    #[arg(allow_hyphen_values = true)]
    flags: String,

    /// Literal text to remove from names
    #[arg(allow_hyphen_values = true)]
    phrase: String,

    /// Directory to scan (defaults to current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Report file (defaults to dephrase.log in the current directory)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which part of the path the phrase is removed from
    #[arg(long, value_enum)]
    scope: Option<Scope>,

    /// Maximum directory depth when recursing
    #[arg(long)]
    max_depth: Option<usize>,

    /// Extension to skip; repeat to build the list (replaces the default)
    #[arg(long = "exclude", value_name = "EXT")]
    exclude: Vec<String>,

    /// Output format (json, text, markdown)
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage:\n\tdephrase sw \"phrase to remove\"\n");
            eprintln!("\ts = sub directories, w = change filenames, f = change folders\n");
            return ExitCode::from(1);
        }
    };

    // Initialize logging
    let filter = if cli.verbose {
        "dephrase=debug"
    } else {
        "dephrase=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;
    let args = commands::strip::StripArgs {
        flags: cli.flags,
        phrase: cli.phrase,
        root: cli.root,
        config: cli.config,
        overrides: Overrides {
            report: cli.report,
            scope: cli.scope,
            max_depth: cli.max_depth,
            exclude: cli.exclude,
        },
    };

    match commands::strip::run(args, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = OutputWriter::new(format).write_error(&format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}
