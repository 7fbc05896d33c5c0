use crate::file_context::{
    limits::parse_soft_file_limit, locks, FileContext, FileContextConfig, ProcfsReader,
    ResourceReader,
};

/// Reads a process's file resources and decides whether they are worth
/// reporting
///
/// Fail-open throughout: an unreadable descriptor directory, limits table or
/// lock table degrades that one metric to zero/empty. Nothing here returns
/// an error; `None` means "nothing noteworthy".
#[derive(Debug, Clone)]
pub struct FileContextEvaluator<R = ProcfsReader> {
    reader: R,
    config: FileContextConfig,
}

impl Default for FileContextEvaluator<ProcfsReader> {
    fn default() -> Self {
        Self::new(ProcfsReader::default(), FileContextConfig::default())
    }
}

impl<R: ResourceReader> FileContextEvaluator<R> {
    pub fn new(reader: R, config: FileContextConfig) -> Self {
        Self { reader, config }
    }

    pub fn config(&self) -> &FileContextConfig {
        &self.config
    }

    /// File context for `pid` if it is relevant, else `None`
    pub fn evaluate(&self, pid: i32) -> Option<FileContext> {
        let (open_files, file_limit) = self.open_file_usage(pid);
        let ctx = FileContext {
            open_files,
            file_limit,
            locked_files: self.locked_files(pid),
            watched_dirs: self.watched_dirs(pid),
        };

        if ctx.is_relevant(self.config.usage_threshold_percent) {
            Some(ctx)
        } else {
            tracing::debug!(
                "File context for {} below reporting threshold ({} open / {} limit, no locks)",
                pid,
                ctx.open_files,
                ctx.file_limit
            );
            None
        }
    }

    /// Open descriptor count and soft limit, each 0 when unreadable
    fn open_file_usage(&self, pid: i32) -> (u64, u64) {
        let open_files = self.reader.open_descriptor_count(pid).unwrap_or_else(|e| {
            tracing::debug!("Cannot count descriptors for {}: {}", pid, e);
            0
        });

        let file_limit = match self.reader.limits_table(pid) {
            Ok(table) => parse_soft_file_limit(&table).unwrap_or_else(|| {
                tracing::debug!("No numeric open-files soft limit for {}", pid);
                0
            }),
            Err(e) => {
                tracing::debug!("Cannot read limits for {}: {}", pid, e);
                0
            }
        };

        (open_files, file_limit)
    }

    fn locked_files(&self, pid: i32) -> Vec<String> {
        match self.reader.lock_table() {
            Ok(table) => locks::locked_files(&table, pid),
            Err(e) => {
                tracing::debug!("Cannot read lock table: {}", e);
                Vec::new()
            }
        }
    }

    /// Directories the process watches
    ///
    /// Not yet implemented; always empty and never part of the relevance
    /// decision.
    fn watched_dirs(&self, _pid: i32) -> Vec<String> {
        Vec::new()
    }
}
