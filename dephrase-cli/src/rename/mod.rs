mod applier;
mod report;
mod transform;
mod traversal;

pub use applier::{apply_renames, ApplyMode};
pub use report::{format_report, write_report};
pub use transform::{build_items, remove_phrase, transform_path};
pub use traversal::{is_excluded_extension, Traversal};

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::{Item, RenameOutcome};

/// Result of one traverse / transform / apply / report pass
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Whether renames were attempted
    pub mode: ApplyMode,

    /// Root the traversal started from
    pub root: PathBuf,

    /// Where the report was written
    pub report_path: PathBuf,

    /// Total items discovered
    pub items_scanned: usize,

    /// Items whose name contains the phrase
    pub changes: Vec<Item>,

    /// One entry per attempted rename (empty on a dry run)
    pub outcomes: Vec<RenameOutcome>,
}

impl BatchSummary {
    pub fn renamed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode == ApplyMode::DryRun
    }
}

/// Run the whole batch for a resolved configuration.
///
/// Only traversal and report errors are returned; rename failures end up in
/// `BatchSummary::outcomes`.
pub fn run_batch(config: &Config) -> Result<BatchSummary> {
    let traversal = Traversal::new(
        &config.root,
        config.flags.recurse,
        &config.exclude_extensions,
    )
    .with_max_depth(config.max_depth)
    .with_skipped(config.own_files());

    let files = traversal.files()?;
    let folders = if config.flags.folders {
        traversal.folders()?
    } else {
        Vec::new()
    };
    info!(
        "Discovered {} files and {} folders under {}",
        files.len(),
        folders.len(),
        config.root.display()
    );

    let items = build_items(files, folders, &config.phrase, config.scope);

    let mode = ApplyMode::from_write_flag(config.flags.write);
    let outcomes = apply_renames(&items, mode);

    let written = write_report(&config.report_path, &items)?;
    info!(
        "Wrote {} entries to {}",
        written,
        config.report_path.display()
    );

    let items_scanned = items.len();
    let changes = items.into_iter().filter(|item| item.changed()).collect();

    Ok(BatchSummary {
        mode,
        root: config.root.clone(),
        report_path: config.report_path.clone(),
        items_scanned,
        changes,
        outcomes,
    })
}
