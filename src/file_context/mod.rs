//! File-resource diagnostics: descriptor pressure and held locks
//!
//! [`FileContextEvaluator`] reads raw counters through a [`ResourceReader`]
//! and surfaces a [`FileContext`] only when it is actionable:
//!
//! - the process holds at least one attributable file lock, or
//! - descriptor usage is strictly above the threshold (50% by default) of a
//!   known, non-zero soft limit.
//!
//! Locked files are reported as `device:inode` identifiers; mapping them back
//! to paths would need a full filesystem scan and is not attempted.

mod evaluator;
pub mod limits;
pub mod locks;
mod reader;

pub use evaluator::FileContextEvaluator;
pub use reader::{ProcfsReader, ResourceReader};

use serde::{Deserialize, Serialize};

/// Default usage percentage above which descriptor pressure is reported
pub const DEFAULT_USAGE_THRESHOLD_PERCENT: f64 = 50.0;

/// Snapshot of a process's file resources
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileContext {
    /// Open descriptor count
    pub open_files: u64,
    /// Soft limit on open descriptors (0 = unknown)
    pub file_limit: u64,
    /// `device:inode` of locks held by the process, first-seen order
    pub locked_files: Vec<String>,
    /// Watched directories (not yet collected; always empty)
    pub watched_dirs: Vec<String>,
}

impl FileContext {
    /// Descriptor usage as a percentage of the soft limit
    ///
    /// `None` unless both the limit and the open count are non-zero.
    pub fn usage_percent(&self) -> Option<f64> {
        if self.file_limit > 0 && self.open_files > 0 {
            Some(self.open_files as f64 / self.file_limit as f64 * 100.0)
        } else {
            None
        }
    }

    /// Whether this snapshot is worth surfacing
    ///
    /// The usage comparison is strict: usage exactly at `threshold_percent`
    /// is not reported.
    pub fn is_relevant(&self, threshold_percent: f64) -> bool {
        !self.locked_files.is_empty()
            || self
                .usage_percent()
                .is_some_and(|usage| usage > threshold_percent)
    }
}

/// File context evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileContextConfig {
    /// Report descriptor usage strictly above this percentage
    pub usage_threshold_percent: f64,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        Self {
            usage_threshold_percent: DEFAULT_USAGE_THRESHOLD_PERCENT,
        }
    }
}

impl FileContextConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.usage_threshold_percent) {
            return Err(format!(
                "usage_threshold_percent must be in [0, 100], got {}",
                self.usage_threshold_percent
            ));
        }
        Ok(())
    }
}
