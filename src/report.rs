//! Diagnostic record pairing source attribution with file context

use crate::file_context::{FileContext, FileContextEvaluator, ProcfsReader, ResourceReader};
use crate::process::Process;
use crate::source::{DetectorChain, Source};
use serde::{Deserialize, Serialize};

/// Everything known about why `pid` is running
///
/// Both fields are independently optional: `None` means nothing notable was
/// found for that half, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub pid: i32,
    pub ancestry: Vec<Process>,
    pub source: Option<Source>,
    pub file_context: Option<FileContext>,
}

/// Runs the detector chain and the file context evaluator for one pid
#[derive(Debug)]
pub struct Diagnoser<R = ProcfsReader> {
    chain: DetectorChain,
    evaluator: FileContextEvaluator<R>,
}

impl<R: ResourceReader> Diagnoser<R> {
    pub fn new(chain: DetectorChain, evaluator: FileContextEvaluator<R>) -> Self {
        Self { chain, evaluator }
    }

    pub fn diagnose(&self, pid: i32, ancestry: Vec<Process>) -> Diagnosis {
        let source = self.chain.detect(&ancestry);
        let file_context = self.evaluator.evaluate(pid);

        Diagnosis {
            pid,
            ancestry,
            source,
            file_context,
        }
    }
}
