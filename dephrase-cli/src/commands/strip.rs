use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use dephrase::core::{Config, OutputFormat, OutputWriter, Overrides, RunFlags, Settings};
use dephrase::rename::run_batch;

pub struct StripArgs {
    pub flags: String,
    pub phrase: String,
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
}

pub fn run(args: StripArgs, format: OutputFormat) -> Result<()> {
    let working_dir = std::env::current_dir().context("Failed to read the current directory")?;
    let root = args.root.unwrap_or_else(|| working_dir.clone());

    let settings = Settings::load(args.config.as_deref(), &root)?;
    let config = Config::resolve(
        RunFlags::parse(&args.flags),
        args.phrase,
        root,
        &working_dir,
        settings,
        args.overrides,
    )?;

    info!(
        "Removing {:?} from names under {} ({})",
        config.phrase,
        config.root.display(),
        if config.flags.write { "write" } else { "dry run" }
    );

    let summary = run_batch(&config)?;

    OutputWriter::new(format).write_summary(&summary)?;

    Ok(())
}
