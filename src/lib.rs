//! witr - why is this running?
//!
//! Diagnoses a running process in two independent halves:
//!
//! - [`source`]: attributes the process to whatever launched it (a shell,
//!   cron, a configured supervisor) by scanning its ancestry with a
//!   priority-ordered chain of detectors.
//! - [`file_context`]: reports descriptor pressure and held file locks, but
//!   only when they are significant enough to act on.
//!
//! [`report::Diagnoser`] pairs the two into a [`report::Diagnosis`].

pub mod ancestry;
pub mod cli;
pub mod config;
pub mod file_context;
pub mod output;
pub mod process;
pub mod report;
pub mod source;
