use crate::process::Process;
use crate::source::{
    CronDetector, ShellDetector, SignatureDetector, Source, SourceConfig, SourceDetector,
};
use anyhow::{anyhow, bail, Result};

#[derive(Debug)]
struct RegisteredDetector {
    priority: u32,
    detector: Box<dyn SourceDetector>,
}

/// Priority-ordered set of source detectors
///
/// Detectors run from highest to lowest priority (ties in registration
/// order) and the first attribution wins. More specific evidence, such as an
/// exact scheduler name, should be registered above broad catch-alls like
/// the shell set.
///
/// # Example Usage
/// ```
/// use witr::process::Process;
/// use witr::source::{DetectorChain, SourceConfig, SourceType};
///
/// let chain = DetectorChain::from_config(&SourceConfig::default())?;
/// let ancestry = vec![Process::new("bash", 1000), Process::new("systemd", 1)];
/// let source = chain.detect(&ancestry).expect("bash is a shell");
/// assert_eq!(source.source_type, SourceType::Shell);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct DetectorChain {
    entries: Vec<RegisteredDetector>,
}

impl DetectorChain {
    /// Empty chain; detects nothing until detectors are registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the built-in detectors plus any configured signatures
    ///
    /// # Errors
    /// Returns error if the configuration fails validation.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid source configuration: {}", e))?;

        let weight = |id: &str| {
            config
                .weight(id)
                .ok_or_else(|| anyhow!("no weight configured for detector '{}'", id))
        };

        let mut chain = Self::new();
        chain.register(
            config.cron_priority(),
            CronDetector::new(&config.cron.commands, weight(CronDetector::ID)?),
        )?;
        chain.register(
            config.shell_priority(),
            ShellDetector::new(&config.shell.commands, weight(ShellDetector::ID)?),
        )?;

        for sig in &config.detectors {
            chain.register(
                sig.priority,
                SignatureDetector::new(
                    &sig.id,
                    sig.source_type.clone(),
                    &sig.name,
                    &sig.commands,
                    weight(sig.id.as_str())?,
                ),
            )?;
        }

        Ok(chain)
    }

    /// Register a detector at `priority`
    ///
    /// # Errors
    /// Returns error if a detector with the same id is already registered.
    pub fn register<D>(&mut self, priority: u32, detector: D) -> Result<()>
    where
        D: SourceDetector + 'static,
    {
        if self.entries.iter().any(|e| e.detector.id() == detector.id()) {
            bail!("Detector '{}' is already registered", detector.id());
        }

        let pos = self
            .entries
            .iter()
            .position(|e| e.priority < priority)
            .unwrap_or(self.entries.len());

        self.entries.insert(
            pos,
            RegisteredDetector {
                priority,
                detector: Box::new(detector),
            },
        );
        Ok(())
    }

    /// Attribute the ancestry to a source, or `None` if nothing matches
    pub fn detect(&self, ancestry: &[Process]) -> Option<Source> {
        self.entries.iter().find_map(|entry| {
            let source = entry.detector.detect(ancestry)?;
            tracing::debug!(
                "Detector '{}' attributed source {} ({}) with confidence {}",
                entry.detector.id(),
                source.source_type,
                source.name,
                source.confidence
            );
            Some(source)
        })
    }

    /// Detector ids in evaluation order
    pub fn detector_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.detector.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
