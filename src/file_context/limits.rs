//! `/proc/<pid>/limits` parsing

/// Row key carrying the open-descriptor limits
pub const MAX_OPEN_FILES_KEY: &str = "Max open files";

/// Soft limit for open files from a limits table
///
/// The row reads `Max open files   1024  524288  files`; split on whitespace
/// the soft limit is token 3. Returns `None` if the row is missing, short,
/// or its soft limit is not a number (e.g. `unlimited`). Only the first
/// matching row is considered.
pub fn parse_soft_file_limit(table: &str) -> Option<u64> {
    let row = table
        .lines()
        .find(|line| line.starts_with(MAX_OPEN_FILES_KEY))?;

    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }
    fields[3].parse::<u64>().ok()
}
