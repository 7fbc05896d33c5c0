use crate::source::Confidence;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Kind of launcher a process was attributed to
///
/// Serialized as a lowercase string. Kinds other than the built-in ones come
/// from configuration-defined detectors and are kept as [`SourceType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    Shell,
    Cron,
    Other(String),
}

impl From<String> for SourceType {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "shell" => Self::Shell,
            "cron" => Self::Cron,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for SourceType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<SourceType> for String {
    fn from(t: SourceType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell => f.write_str("shell"),
            Self::Cron => f.write_str("cron"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Attribution of a process to the thing that launched it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Launcher name (e.g., "bash", "cron")
    pub name: String,
    pub confidence: Confidence,
}

impl Source {
    pub fn new(source_type: SourceType, name: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            source_type,
            name: name.into(),
            confidence,
        }
    }
}
