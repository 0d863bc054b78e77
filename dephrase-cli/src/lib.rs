//! Strip a phrase from file names across a directory tree.
//!
//! A run is a single pass: traverse the root, compute the new name for every
//! file, optionally rename on disk, then write a report of every change.

pub mod core;
pub mod rename;

pub use crate::core::{Config, DephraseError, Item, RunFlags, Scope, Settings};
pub use crate::rename::{run_batch, BatchSummary};
