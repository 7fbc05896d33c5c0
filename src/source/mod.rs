// Launch-source attribution from process ancestry
//
// A chain of independent detectors, each looking for its own signature in the
// ancestry (nearest parent first). Detectors are registered with a priority;
// the chain returns the first attribution in descending priority order.
//
// Confidence scores are coarse heuristic weights, not measured statistics.
// They live in the configuration weights table, keyed by detector id, and
// are injected at construction.

mod chain;
mod config;
mod confidence;
mod definition;
mod detector;

pub use chain::DetectorChain;
pub use config::{
    default_weights, CommandSetConfig, SignatureConfig, SourceConfig, DEFAULT_CRON_PRIORITY,
    DEFAULT_CRON_WEIGHT, DEFAULT_SHELL_PRIORITY, DEFAULT_SHELL_WEIGHT,
};
pub use confidence::{Confidence, ConfidenceError};
pub use definition::{Source, SourceType};
pub use detector::{CronDetector, ShellDetector, SignatureDetector, SourceDetector};

#[cfg(test)]
mod tests;
