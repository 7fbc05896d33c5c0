//! `/proc/locks` parsing
//!
//! Row layout: `<id>: <TYPE> <ADVISORY|MANDATORY> <ACCESS> <PID> <MAJ:MIN:INODE> <START> <END>`

use std::collections::HashSet;
use std::fmt;

/// Pid field of a lock shared by several processes (OFD locks)
pub const SHARED_LOCK_PID: &str = "-1";

/// Marker in the type column for a process blocked waiting on a lock
pub const BLOCKED_MARKER: &str = "->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockType {
    Flock,
    Posix,
    OfdLock,
    Lease,
    Other,
}

impl From<&str> for LockType {
    fn from(s: &str) -> Self {
        match s {
            "FLOCK" => Self::Flock,
            "POSIX" => Self::Posix,
            "OFDLCK" => Self::OfdLock,
            "LEASE" | "DELEG" => Self::Lease,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Flock => "FLOCK",
            Self::Posix => "POSIX",
            Self::OfdLock => "OFDLCK",
            Self::Lease => "LEASE",
            Self::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// One held lock from the lock table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRow<'a> {
    pub id: &'a str,
    pub lock_type: LockType,
    pub mode: &'a str,
    pub access: &'a str,
    /// Owning pid as written in the table; may be the shared sentinel
    pub pid: &'a str,
    pub device_inode: &'a str,
    pub start: &'a str,
    pub end: &'a str,
}

impl<'a> LockRow<'a> {
    /// Parse a held-lock row; `None` for short rows and blocked waiters
    pub fn parse(line: &'a str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 8 {
            return None;
        }
        // A waiter does not hold the lock it is queued on
        if fields[1] == BLOCKED_MARKER {
            return None;
        }

        Some(Self {
            id: fields[0],
            lock_type: LockType::from(fields[1]),
            mode: fields[2],
            access: fields[3],
            pid: fields[4],
            device_inode: fields[5],
            start: fields[6],
            end: fields[7],
        })
    }

    /// True if the lock is attributable to exactly `pid`
    pub fn is_owned_by(&self, pid: &str) -> bool {
        self.pid != SHARED_LOCK_PID && self.pid == pid
    }
}

/// Device:inode identifiers of locks held by `pid`
///
/// Deduplicated, in first-seen order. Locks owned by the shared sentinel
/// `-1` are never attributed.
pub fn locked_files(table: &str, pid: i32) -> Vec<String> {
    let pid = pid.to_string();
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for line in table.lines().filter(|l| !l.trim().is_empty()) {
        let Some(row) = LockRow::parse(line) else {
            tracing::trace!("Skipping lock table row: {}", line);
            continue;
        };

        if row.is_owned_by(&pid) && seen.insert(row.device_inode) {
            result.push(row.device_inode.to_string());
        }
    }

    result
}
