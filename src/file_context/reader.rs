//! Raw resource counters for a process
//!
//! Readers only fetch; interpreting and degrading failures is the
//! evaluator's job.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// OS-specific source of per-process file resource facts
pub trait ResourceReader {
    /// Number of open descriptor entries for `pid`
    fn open_descriptor_count(&self, pid: i32) -> io::Result<u64>;

    /// Raw resource limits table for `pid`
    fn limits_table(&self, pid: i32) -> io::Result<String>;

    /// Raw system-wide lock table
    fn lock_table(&self) -> io::Result<String>;
}

/// Reader over a procfs tree (`/proc` by default)
#[derive(Debug, Clone)]
pub struct ProcfsReader {
    root: PathBuf,
}

impl Default for ProcfsReader {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcfsReader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pid_dir(&self, pid: i32) -> PathBuf {
        self.root.join(pid.to_string())
    }
}

impl ResourceReader for ProcfsReader {
    fn open_descriptor_count(&self, pid: i32) -> io::Result<u64> {
        let mut count = 0;
        for entry in fs::read_dir(self.pid_dir(pid).join("fd"))? {
            // Descriptors closing mid-listing are simply not counted
            if entry.is_ok() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn limits_table(&self, pid: i32) -> io::Result<String> {
        fs::read_to_string(self.pid_dir(pid).join("limits"))
    }

    fn lock_table(&self) -> io::Result<String> {
        fs::read_to_string(self.root.join("locks"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_counts_fd_entries() {
        let tmp = TempDir::new().unwrap();
        let fd_dir = tmp.path().join("42").join("fd");
        fs::create_dir_all(&fd_dir).unwrap();
        for fd in 0..5 {
            fs::write(fd_dir.join(fd.to_string()), "").unwrap();
        }

        let reader = ProcfsReader::new(tmp.path());
        assert_eq!(reader.open_descriptor_count(42).unwrap(), 5);
    }

    #[test]
    fn test_missing_pid_is_error() {
        let tmp = TempDir::new().unwrap();
        let reader = ProcfsReader::new(tmp.path());
        assert!(reader.open_descriptor_count(42).is_err());
        assert!(reader.limits_table(42).is_err());
        assert!(reader.lock_table().is_err());
    }

    #[test]
    fn test_reads_tables() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("7")).unwrap();
        fs::write(tmp.path().join("7").join("limits"), "Max open files 8 8 files\n").unwrap();
        fs::write(tmp.path().join("locks"), "1: POSIX ADVISORY WRITE 7 08:01:1 0 EOF\n").unwrap();

        let reader = ProcfsReader::new(tmp.path());
        assert!(reader.limits_table(7).unwrap().contains("Max open files"));
        assert!(reader.lock_table().unwrap().contains("POSIX"));
        assert_eq!(reader.root(), tmp.path());
    }

    #[test]
    fn test_reads_own_process() {
        let reader = ProcfsReader::default();
        let pid = std::process::id() as i32;
        assert!(reader.open_descriptor_count(pid).unwrap() > 0);
        assert!(reader.limits_table(pid).unwrap().contains("Max open files"));
    }
}
