use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    File,
    Folder,
}

/// One discovered entry and the path it would be renamed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// 1-based, in discovery order
    pub id: usize,
    pub kind: ItemKind,
    pub original: PathBuf,
    pub renamed: PathBuf,
}

impl Item {
    pub fn new(id: usize, kind: ItemKind, original: PathBuf, renamed: PathBuf) -> Self {
        Self {
            id,
            kind,
            original,
            renamed,
        }
    }

    pub fn changed(&self) -> bool {
        self.original != self.renamed
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    pub fn renamed(&self) -> &Path {
        &self.renamed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Renamed,
    Failed(String),
}

/// Result of attempting a single rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    pub item_id: usize,
    pub from: PathBuf,
    pub to: PathBuf,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl RenameOutcome {
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Renamed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_changed() {
        let same = Item::new(
            1,
            ItemKind::File,
            PathBuf::from("/tmp/notes.txt"),
            PathBuf::from("/tmp/notes.txt"),
        );
        assert!(!same.changed());

        let different = Item::new(
            2,
            ItemKind::File,
            PathBuf::from("/tmp/mysite_readme.txt"),
            PathBuf::from("/tmp/readme.txt"),
        );
        assert!(different.changed());
    }

    #[test]
    fn test_outcome_serializes_status() {
        let outcome = RenameOutcome {
            item_id: 3,
            from: PathBuf::from("a_x.txt"),
            to: PathBuf::from("ax.txt"),
            status: OutcomeStatus::Failed("destination already exists".to_string()),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "destination already exists");
        assert!(!outcome.is_success());
    }
}
