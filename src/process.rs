//! Process descriptors supplied by an ancestry provider

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Whether a process with this pid currently exists
///
/// Probes with signal 0; `EPERM` means it exists but belongs to someone else.
pub fn process_exists(pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }
    match kill(Pid::from_raw(pid), None) {
        Ok(()) | Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

/// Whether `pid` exists in the process table rooted at `proc_root`
///
/// The live `/proc` is checked with [`process_exists`]. Any other root (a
/// container's procfs, a fixture tree) needs a `<root>/<pid>` entry.
pub fn process_exists_in(proc_root: &Path, pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }
    if proc_root == Path::new("/proc") {
        return process_exists(pid);
    }
    proc_root.join(pid.to_string()).is_dir()
}

/// A single process in an ancestry chain
///
/// Only `command` and `pid` are interpreted by the detectors. Providers may
/// attach extra facts in `attributes` (the procfs provider records `ppid`);
/// these are carried through to the report untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Command name (e.g., "bash", "crond")
    pub command: String,
    /// Process ID
    pub pid: i32,
    /// Provider-specific facts, opaque to detection
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Process {
    pub fn new(command: impl Into<String>, pid: i32) -> Self {
        Self {
            command: command.into(),
            pid,
            attributes: BTreeMap::new(),
        }
    }

    /// Attach a provider-specific attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
