use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::error::DephraseError;
use crate::core::types::{Item, OutcomeStatus, RenameOutcome};

/// Whether renames touch the filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMode {
    /// Actually rename files
    Execute,

    /// Dry-run - report only
    DryRun,
}

impl ApplyMode {
    pub fn from_write_flag(write: bool) -> Self {
        if write {
            ApplyMode::Execute
        } else {
            ApplyMode::DryRun
        }
    }
}

/// Rename every changed item, in order. Failures are recorded and the batch
/// carries on; nothing already renamed is rolled back.
///
/// A dry run makes no filesystem calls and returns no outcomes.
pub fn apply_renames(items: &[Item], mode: ApplyMode) -> Vec<RenameOutcome> {
    if mode == ApplyMode::DryRun {
        return Vec::new();
    }

    items
        .iter()
        .filter(|item| item.changed())
        .map(apply_one)
        .collect()
}

fn apply_one(item: &Item) -> RenameOutcome {
    let status = match rename(item.original(), item.renamed()) {
        Ok(()) => {
            debug!(
                "Renamed {} -> {}",
                item.original().display(),
                item.renamed().display()
            );
            OutcomeStatus::Renamed
        }
        Err(e) => {
            warn!("{}", e);
            match e {
                DephraseError::Rename { reason, .. } => OutcomeStatus::Failed(reason),
                other => OutcomeStatus::Failed(other.to_string()),
            }
        }
    };

    RenameOutcome {
        item_id: item.id,
        from: item.original.clone(),
        to: item.renamed.clone(),
        status,
    }
}

/// Refuses to replace an existing destination; `fs::rename` would silently
/// overwrite on Unix.
fn rename(from: &Path, to: &Path) -> Result<(), DephraseError> {
    let failure = |reason: String| DephraseError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason,
    };

    // Stripping a name down to nothing leaves the parent folder as the target
    if from.starts_with(to) {
        return Err(failure("resulting name is empty".to_string()));
    }

    if fs::symlink_metadata(to).is_ok() {
        return Err(failure("destination already exists".to_string()));
    }

    fs::rename(from, to).map_err(|e| failure(e.to_string()))
}
