use crate::process::Process;
use crate::source::{Confidence, Source, SourceType};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A single ancestry signature
///
/// Implementations are pure: they look at the ancestry slice (nearest parent
/// first), stop at the first process matching their signature and report a
/// [`Source`] scored with the weight they were constructed with.
pub trait SourceDetector: fmt::Debug + Send + Sync {
    /// Stable identity, also the key into the weights table
    fn id(&self) -> &str;

    fn detect(&self, ancestry: &[Process]) -> Option<Source>;
}

impl<D: SourceDetector + ?Sized> SourceDetector for Box<D> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn detect(&self, ancestry: &[Process]) -> Option<Source> {
        (**self).detect(ancestry)
    }
}

impl<D: SourceDetector + ?Sized> SourceDetector for Arc<D> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn detect(&self, ancestry: &[Process]) -> Option<Source> {
        (**self).detect(ancestry)
    }
}

fn command_set<I, S>(commands: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    commands.into_iter().map(Into::into).collect()
}

/// Interactive shell launcher; reports the shell that matched
#[derive(Debug, Clone)]
pub struct ShellDetector {
    shells: BTreeSet<String>,
    confidence: Confidence,
}

impl ShellDetector {
    pub const ID: &'static str = "shell";

    pub fn new<I, S>(shells: I, confidence: Confidence) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            shells: command_set(shells),
            confidence,
        }
    }
}

impl SourceDetector for ShellDetector {
    fn id(&self) -> &str {
        Self::ID
    }

    fn detect(&self, ancestry: &[Process]) -> Option<Source> {
        let shell = ancestry.iter().find(|p| self.shells.contains(&p.command))?;
        Some(Source::new(SourceType::Shell, &shell.command, self.confidence))
    }
}

/// Cron daemon launcher; always reported as "cron" whichever daemon matched
#[derive(Debug, Clone)]
pub struct CronDetector {
    commands: BTreeSet<String>,
    confidence: Confidence,
}

impl CronDetector {
    pub const ID: &'static str = "cron";

    pub fn new<I, S>(commands: I, confidence: Confidence) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: command_set(commands),
            confidence,
        }
    }
}

impl SourceDetector for CronDetector {
    fn id(&self) -> &str {
        Self::ID
    }

    fn detect(&self, ancestry: &[Process]) -> Option<Source> {
        ancestry
            .iter()
            .find(|p| self.commands.contains(&p.command))
            .map(|_| Source::new(SourceType::Cron, "cron", self.confidence))
    }
}

/// Configuration-defined detector matching exact command names
///
/// Reports a fixed `(source_type, name)` pair, so new launchers (supervisors,
/// init systems) can be added from TOML without touching code.
#[derive(Debug, Clone)]
pub struct SignatureDetector {
    id: String,
    source_type: SourceType,
    name: String,
    commands: BTreeSet<String>,
    confidence: Confidence,
}

impl SignatureDetector {
    pub fn new<I, S>(
        id: impl Into<String>,
        source_type: SourceType,
        name: impl Into<String>,
        commands: I,
        confidence: Confidence,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            source_type,
            name: name.into(),
            commands: command_set(commands),
            confidence,
        }
    }
}

impl SourceDetector for SignatureDetector {
    fn id(&self) -> &str {
        &self.id
    }

    fn detect(&self, ancestry: &[Process]) -> Option<Source> {
        ancestry
            .iter()
            .find(|p| self.commands.contains(&p.command))
            .map(|_| Source::new(self.source_type.clone(), &self.name, self.confidence))
    }
}
