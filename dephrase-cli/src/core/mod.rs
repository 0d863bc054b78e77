pub mod config;
pub mod error;
pub mod output;
pub mod types;

pub use config::{Config, Overrides, RunFlags, Scope, Settings};
pub use error::DephraseError;
pub use output::{OutputFormat, OutputWriter};
pub use types::{Item, ItemKind, OutcomeStatus, RenameOutcome};
