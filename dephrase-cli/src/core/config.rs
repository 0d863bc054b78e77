use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{DephraseError, Result};

/// File name of the per-directory settings file
pub const SETTINGS_FILE_NAME: &str = ".dephrase.toml";

/// Which part of a path the phrase is removed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Only the final path component
    #[default]
    FileName,
    /// The whole path string, directory components included
    FullPath,
}

/// Mode switches parsed from the flag argument (e.g. "sw", "-SWF")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunFlags {
    /// `s`: descend into subdirectories
    pub recurse: bool,
    /// `w`: rename on disk instead of a dry run
    pub write: bool,
    /// `f`: rename folders as well as files
    pub folders: bool,
}

impl RunFlags {
    /// Case-insensitive containment; unknown characters are ignored.
    pub fn parse(flags: &str) -> Self {
        let lower = flags.to_lowercase();
        Self {
            recurse: lower.contains('s'),
            write: lower.contains('w'),
            folders: lower.contains('f'),
        }
    }
}

/// Optional settings loaded from a TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Extensions never picked up by traversal, without the leading dot
    #[serde(default = "default_exclude_extensions")]
    pub exclude_extensions: Vec<String>,

    /// Maximum directory depth below the root
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub scope: Scope,

    /// Report file name, created in the working directory
    #[serde(default = "default_report_name")]
    pub report_name: String,

    /// File these settings were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn default_exclude_extensions() -> Vec<String> {
    vec!["exe".to_string(), "bak".to_string(), "log".to_string()]
}

fn default_max_depth() -> usize {
    64
}

fn default_report_name() -> String {
    "dephrase.log".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclude_extensions: default_exclude_extensions(),
            max_depth: default_max_depth(),
            scope: Scope::default(),
            report_name: default_report_name(),
            source: None,
        }
    }
}

impl Settings {
    /// Load settings from an explicit file. A missing file is an error here.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            DephraseError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut settings = Self::from_toml(&contents)
            .map_err(|e| DephraseError::Config(format!("{}: {}", path.display(), e)))?;
        settings.source = Some(path.to_path_buf());
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve settings: explicit file, then `<root>/.dephrase.toml`,
    /// then the user config directory, then defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let local = root.join(SETTINGS_FILE_NAME);
        if local.is_file() {
            debug!("Using settings from {}", local.display());
            return Self::from_file(&local);
        }

        if let Some(global) = user_settings_path() {
            if global.is_file() {
                debug!("Using settings from {}", global.display());
                return Self::from_file(&global);
            }
        }

        Ok(Self::default())
    }
}

fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dephrase").join("config.toml"))
}

/// Fully resolved, immutable run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub flags: RunFlags,
    pub phrase: String,
    pub root: PathBuf,
    pub report_path: PathBuf,
    /// Settings file in effect, if one was loaded
    pub settings_path: Option<PathBuf>,
    pub exclude_extensions: Vec<String>,
    pub max_depth: usize,
    pub scope: Scope,
}

/// Command-line values that override settings when present
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub report: Option<PathBuf>,
    pub scope: Option<Scope>,
    pub max_depth: Option<usize>,
    pub exclude: Vec<String>,
}

impl Config {
    /// Build and validate the configuration. The root must be a readable
    /// directory and the report's parent directory must exist.
    pub fn resolve(
        flags: RunFlags,
        phrase: String,
        root: PathBuf,
        working_dir: &Path,
        settings: Settings,
        overrides: Overrides,
    ) -> Result<Self> {
        let root = validate_root(&root)?;

        let report_path = overrides
            .report
            .unwrap_or_else(|| working_dir.join(&settings.report_name));
        validate_report_path(&report_path)?;

        let exclude_extensions = if overrides.exclude.is_empty() {
            settings.exclude_extensions
        } else {
            overrides.exclude
        };

        let max_depth = overrides.max_depth.unwrap_or(settings.max_depth);
        if max_depth == 0 {
            return Err(DephraseError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            flags,
            phrase,
            root,
            report_path,
            settings_path: settings.source,
            exclude_extensions: normalize_extensions(exclude_extensions),
            max_depth,
            scope: overrides.scope.unwrap_or(settings.scope),
        })
    }

    /// Files the tool itself reads or writes. Traversal never picks these up.
    pub fn own_files(&self) -> Vec<PathBuf> {
        std::iter::once(&self.report_path)
            .chain(self.settings_path.as_ref())
            .map(|path| resolve_path(path))
            .collect()
    }
}

/// Canonical form of `path`, which may not exist yet
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

fn validate_root(root: &Path) -> Result<PathBuf> {
    let canonical = root
        .canonicalize()
        .map_err(|source| DephraseError::DirectoryAccess {
            path: root.to_path_buf(),
            source,
        })?;

    fs::read_dir(&canonical).map_err(|source| DephraseError::DirectoryAccess {
        path: canonical.clone(),
        source,
    })?;

    Ok(canonical)
}

fn validate_report_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(DephraseError::Config(format!(
            "report path {} is a directory",
            path.display()
        )));
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(DephraseError::Config(format!(
                "report directory {} does not exist",
                parent.display()
            )))
        }
        _ => Ok(()),
    }
}

fn normalize_extensions(extensions: Vec<String>) -> Vec<String> {
    extensions
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}
