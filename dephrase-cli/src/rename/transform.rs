use std::path::{Path, PathBuf};

use crate::core::config::Scope;
use crate::core::types::{Item, ItemKind};

/// Remove every occurrence of `phrase` from `text`. Literal, case-sensitive.
pub fn remove_phrase(text: &str, phrase: &str) -> String {
    if phrase.is_empty() {
        return text.to_string();
    }
    text.replace(phrase, "")
}

/// Compute the path `path` would be renamed to.
///
/// Paths that are not valid UTF-8 in the transformed portion are returned
/// unchanged.
pub fn transform_path(path: &Path, phrase: &str, scope: Scope) -> PathBuf {
    match scope {
        Scope::FileName => {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return path.to_path_buf();
            };
            let stripped = remove_phrase(name, phrase);
            if stripped == name {
                path.to_path_buf()
            } else {
                path.with_file_name(stripped)
            }
        }
        Scope::FullPath => match path.to_str() {
            Some(full) => PathBuf::from(remove_phrase(full, phrase)),
            None => path.to_path_buf(),
        },
    }
}

/// Turn traversal output into numbered items. Files are numbered first,
/// folders continue the sequence.
///
/// Folders only ever change their own name: their parents are renamed later,
/// so a target built from the full path would point into folders that do not
/// exist yet.
pub fn build_items(
    files: Vec<PathBuf>,
    folders: Vec<PathBuf>,
    phrase: &str,
    scope: Scope,
) -> Vec<Item> {
    let files = files
        .into_iter()
        .map(|path| (ItemKind::File, scope, path));
    let folders = folders
        .into_iter()
        .map(|path| (ItemKind::Folder, Scope::FileName, path));

    files
        .chain(folders)
        .enumerate()
        .map(|(index, (kind, scope, original))| {
            let renamed = transform_path(&original, phrase, scope);
            Item::new(index + 1, kind, original, renamed)
        })
        .collect()
}
