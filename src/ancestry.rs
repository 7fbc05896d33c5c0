//! Ancestry providers: build the parent chain for a target process
//!
//! The detectors only see an ordered `[Process]` slice (nearest parent
//! first, target excluded). Where it comes from is the provider's business;
//! [`ProcAncestry`] walks `/proc/<pid>/stat` parent links.

use crate::process::Process;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound on parent links followed before giving up
pub const MAX_ANCESTRY_DEPTH: usize = 64;

/// Errors raised while reading the target's own process entry
#[derive(Error, Debug)]
pub enum AncestryError {
    #[error("Process {0} not found")]
    NotFound(i32),

    #[error("Malformed stat line for process {pid}: {reason}")]
    MalformedStat { pid: i32, reason: String },
}

/// Supplies the ancestor chain of a process
pub trait AncestryProvider {
    /// Ancestors of `pid`, nearest parent first, `pid` itself excluded
    fn ancestry(&self, pid: i32) -> Result<Vec<Process>, AncestryError>;
}

/// Fields of `/proc/<pid>/stat` the walk needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    pub pid: i32,
    pub comm: String,
    pub ppid: i32,
}

/// Parse a `/proc/<pid>/stat` line
///
/// `comm` may itself contain spaces and parentheses, so it is taken as the
/// text between the first `(` and the LAST `)`.
pub fn parse_stat(pid: i32, line: &str) -> Result<StatEntry, AncestryError> {
    let malformed = |reason: &str| AncestryError::MalformedStat {
        pid,
        reason: reason.to_string(),
    };

    let open = line.find('(').ok_or_else(|| malformed("missing '('"))?;
    let close = line.rfind(')').ok_or_else(|| malformed("missing ')'"))?;
    if close < open {
        return Err(malformed("unbalanced command parentheses"));
    }

    let comm = line[open + 1..close].to_string();
    // After comm: state ppid pgrp ...
    let mut rest = line[close + 1..].split_whitespace();
    let _state = rest.next().ok_or_else(|| malformed("missing state"))?;
    let ppid = rest
        .next()
        .ok_or_else(|| malformed("missing ppid"))?
        .parse::<i32>()
        .map_err(|e| malformed(&format!("invalid ppid: {}", e)))?;

    Ok(StatEntry { pid, comm, ppid })
}

/// Ancestry provider backed by a procfs tree
#[derive(Debug, Clone)]
pub struct ProcAncestry {
    root: PathBuf,
}

impl Default for ProcAncestry {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcAncestry {
    /// Use `root` in place of `/proc` (fixture trees in tests)
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read_stat(&self, pid: i32) -> Option<Result<StatEntry, AncestryError>> {
        let path = self.root.join(pid.to_string()).join("stat");
        let line = fs::read_to_string(path).ok()?;
        Some(parse_stat(pid, line.trim_end()))
    }
}

impl AncestryProvider for ProcAncestry {
    fn ancestry(&self, pid: i32) -> Result<Vec<Process>, AncestryError> {
        let target = self.read_stat(pid).ok_or(AncestryError::NotFound(pid))??;

        let mut chain = Vec::new();
        let mut seen = HashSet::from([pid]);
        let mut next = target.ppid;

        while next > 0 && chain.len() < MAX_ANCESTRY_DEPTH && seen.insert(next) {
            let entry = match self.read_stat(next) {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    tracing::debug!("Stopping ancestry walk at {}: {}", next, e);
                    break;
                }
                None => {
                    // Ancestor exited mid-walk
                    tracing::debug!("Ancestor {} vanished during ancestry walk", next);
                    break;
                }
            };

            next = entry.ppid;
            chain.push(
                Process::new(entry.comm, entry.pid).with_attribute("ppid", entry.ppid.to_string()),
            );
        }

        Ok(chain)
    }
}
