use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::core::types::OutcomeStatus;
use crate::rename::BatchSummary;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write_summary(&self, summary: &BatchSummary) -> Result<()> {
        print!("{}", self.render_summary(summary)?);
        Ok(())
    }

    pub fn render_summary(&self, summary: &BatchSummary) -> Result<String> {
        let output = match self.format {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(summary)?),
            OutputFormat::Text => render_text(summary),
            OutputFormat::Markdown => render_markdown(summary),
        };
        Ok(output)
    }

    pub fn write_error(&self, error: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct ErrorResponse {
                    error: String,
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&ErrorResponse {
                        error: error.to_string()
                    })?
                );
            }
            OutputFormat::Text | OutputFormat::Markdown => {
                eprintln!("Error: {}", error);
            }
        }
        Ok(())
    }
}

/// Show `path` relative to the root where possible
fn display_path(path: &Path, root: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .filter(|relative| !relative.as_os_str().is_empty() && !relative.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn render_text(summary: &BatchSummary) -> String {
    let mut output = String::new();
    let changed = summary.changes.len();

    if summary.is_dry_run() {
        output.push_str("✓ Dry run complete, nothing renamed\n");
    } else {
        output.push_str("✓ Rename complete!\n");
    }
    output.push_str(&format!("  Items scanned: {}\n", summary.items_scanned));
    output.push_str(&format!("  Items matched: {}\n", changed));
    if !summary.is_dry_run() {
        output.push_str(&format!("  Renamed: {}\n", summary.renamed()));
        output.push_str(&format!("  Failed: {}\n", summary.failed()));
    }
    output.push_str(&format!("  Report: {}\n", summary.report_path.display()));

    if changed > 0 {
        output.push_str(&format!(
            "\n{} change{}:\n",
            if summary.is_dry_run() { "Pending" } else { "Attempted" },
            plural(changed)
        ));
        for item in &summary.changes {
            output.push_str(&format!(
                "  • {} → {}\n",
                display_path(item.original(), &summary.root),
                display_path(item.renamed(), &summary.root)
            ));
        }
    }

    if summary.failed() > 0 {
        output.push_str("\nErrors:\n");
        for failure in summary.failures() {
            if let OutcomeStatus::Failed(reason) = &failure.status {
                output.push_str(&format!(
                    "  ⚠️  {}: {}\n",
                    display_path(&failure.from, &summary.root),
                    reason
                ));
            }
        }
    }

    output
}

fn render_markdown(summary: &BatchSummary) -> String {
    let mut output = String::new();

    output.push_str(if summary.is_dry_run() {
        "# Dry Run\n\n"
    } else {
        "# Rename Results\n\n"
    });
    output.push_str("| Metric | Value |\n");
    output.push_str("|--------|-------|\n");
    output.push_str(&format!("| Items scanned | {} |\n", summary.items_scanned));
    output.push_str(&format!("| Items matched | {} |\n", summary.changes.len()));
    if !summary.is_dry_run() {
        output.push_str(&format!("| Renamed | {} |\n", summary.renamed()));
        output.push_str(&format!("| Failed | {} |\n", summary.failed()));
    }

    if !summary.changes.is_empty() {
        output.push_str("\n## Changes\n\n");
        for item in &summary.changes {
            output.push_str(&format!(
                "- `{}` → `{}`\n",
                display_path(item.original(), &summary.root),
                display_path(item.renamed(), &summary.root)
            ));
        }
    }

    let failures: Vec<_> = summary.failures().collect();
    if !failures.is_empty() {
        output.push_str("\n## Errors\n\n");
        for failure in failures {
            if let OutcomeStatus::Failed(reason) = &failure.status {
                output.push_str(&format!(
                    "- `{}`: {}\n",
                    display_path(&failure.from, &summary.root),
                    reason
                ));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Item, ItemKind, RenameOutcome};
    use crate::rename::ApplyMode;
    use std::path::PathBuf;

    fn summary(mode: ApplyMode) -> BatchSummary {
        let root = PathBuf::from("/data");
        BatchSummary {
            mode,
            root: root.clone(),
            report_path: PathBuf::from("/work/dephrase.log"),
            items_scanned: 3,
            changes: vec![
                Item::new(
                    1,
                    ItemKind::File,
                    root.join("mysite_readme.txt"),
                    root.join("readme.txt"),
                ),
                Item::new(2, ItemKind::File, root.join("a_x.txt"), root.join("ax.txt")),
            ],
            outcomes: match mode {
                ApplyMode::DryRun => Vec::new(),
                ApplyMode::Execute => vec![
                    RenameOutcome {
                        item_id: 1,
                        from: root.join("mysite_readme.txt"),
                        to: root.join("readme.txt"),
                        status: OutcomeStatus::Renamed,
                    },
                    RenameOutcome {
                        item_id: 2,
                        from: root.join("a_x.txt"),
                        to: root.join("ax.txt"),
                        status: OutcomeStatus::Failed("destination already exists".to_string()),
                    },
                ],
            },
        }
    }

    #[test]
    fn test_display_path_relative_to_root() {
        assert_eq!(
            display_path(Path::new("/data/sub/a.txt"), Path::new("/data")),
            "sub/a.txt"
        );
        assert_eq!(
            display_path(Path::new("/elsewhere/a.txt"), Path::new("/data")),
            "/elsewhere/a.txt"
        );
    }

    #[test]
    fn test_text_dry_run() {
        let writer = OutputWriter::new(OutputFormat::Text);
        let text = writer.render_summary(&summary(ApplyMode::DryRun)).unwrap();

        assert!(text.contains("Dry run complete"));
        assert!(text.contains("Items matched: 2"));
        assert!(text.contains("mysite_readme.txt → readme.txt"));
        assert!(!text.contains("Errors:"));
    }

    #[test]
    fn test_text_lists_failures() {
        let writer = OutputWriter::new(OutputFormat::Text);
        let text = writer.render_summary(&summary(ApplyMode::Execute)).unwrap();

        assert!(text.contains("Renamed: 1"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("a_x.txt: destination already exists"));
    }

    #[test]
    fn test_markdown_has_tables() {
        let writer = OutputWriter::new(OutputFormat::Markdown);
        let md = writer.render_summary(&summary(ApplyMode::Execute)).unwrap();

        assert!(md.starts_with("# Rename Results"));
        assert!(md.contains("| Items scanned | 3 |"));
        assert!(md.contains("## Errors"));
    }

    #[test]
    fn test_json_is_parseable() {
        let writer = OutputWriter::new(OutputFormat::Json);
        let json = writer.render_summary(&summary(ApplyMode::Execute)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "execute");
        assert_eq!(value["outcomes"][1]["status"], "failed");
        assert_eq!(value["changes"].as_array().unwrap().len(), 2);
    }
}
