use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::error::{DephraseError, Result};
use crate::core::types::Item;

/// Render the report body: one `original` / `renamed` block per changed
/// item, blocks separated by a blank line.
pub fn format_report(items: &[Item]) -> String {
    let mut output = String::new();

    for item in items.iter().filter(|item| item.changed()) {
        output.push_str(&format!("{}\n", item.original().display()));
        output.push_str(&format!("{}\n", item.renamed().display()));
        output.push('\n');
    }

    output
}

/// Write the report, truncating any previous one. Returns the number of
/// blocks written.
pub fn write_report(path: &Path, items: &[Item]) -> Result<usize> {
    let to_error = |source: std::io::Error| DephraseError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(format_report(items).as_bytes())
        .map_err(to_error)?;
    writer.flush().map_err(to_error)?;

    Ok(items.iter().filter(|item| item.changed()).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ItemKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn items() -> Vec<Item> {
        vec![
            Item::new(
                1,
                ItemKind::File,
                PathBuf::from("/r/mysite_readme.txt"),
                PathBuf::from("/r/readme.txt"),
            ),
            Item::new(
                2,
                ItemKind::File,
                PathBuf::from("/r/notes.txt"),
                PathBuf::from("/r/notes.txt"),
            ),
            Item::new(
                3,
                ItemKind::File,
                PathBuf::from("/r/mysite_todo.md"),
                PathBuf::from("/r/todo.md"),
            ),
        ]
    }

    #[test]
    fn test_format_report_lists_changed_items() {
        assert_eq!(
            format_report(&items()),
            "/r/mysite_readme.txt\n/r/readme.txt\n\n/r/mysite_todo.md\n/r/todo.md\n\n"
        );
    }

    #[test]
    fn test_format_report_empty_when_nothing_changed() {
        let unchanged = vec![items().remove(1)];
        assert_eq!(format_report(&unchanged), "");
    }

    #[test]
    fn test_write_report_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dephrase.log");
        fs::write(&path, "stale contents from a previous run\n".repeat(20)).unwrap();

        let written = write_report(&path, &items()).unwrap();

        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), format_report(&items()));
    }

    #[test]
    fn test_write_report_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("dephrase.log");

        let err = write_report(&path, &items()).unwrap_err();
        assert!(matches!(err, DephraseError::ReportWrite { .. }));
    }
}
