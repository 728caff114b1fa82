//! Scripted replay of click / text-input / wait interactions against a live
//! document.
//!
//! A script is an ordered array of step records. [`Chain::from_records`]
//! turns it into a linked chain of typed steps — validating jump targets as
//! it links — and [`execute_chain`] walks that chain against an injected
//! [`Environment`], which is the only thing that ever touches the document.
//! The sole control-flow primitive is a backward `goto`, so a running script
//! can loop, and the only way a loop ends on its own is a `break` step
//! exhausting its pass budget.

use std::sync::Arc;
use tracing::instrument;

pub mod chain;
pub mod environment;
pub mod errors;
pub mod executor;
pub mod step;
pub mod storage;
pub mod target;
#[cfg(test)]
mod tests;

pub use chain::Chain;
pub use environment::{Element, ElementImpl, Environment};
pub use errors::ChainError;
pub use executor::{execute_chain, RunSummary};
pub use step::{parse_script, Step, StepRecord};
pub use storage::ScriptStore;
pub use target::TargetRef;

/// The main entry point for replaying scripts.
///
/// Owns the injected environment and offers the one-call path from a
/// serialized script to a finished run: parse, build the chain, execute,
/// report the outcome. There is no partial-progress reporting; a failed run
/// is simply an error, with earlier effects left applied.
#[derive(Clone)]
pub struct Player {
    env: Arc<dyn Environment>,
}

impl Player {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }

    /// Replay a raw JSON script. All construction-time validation happens
    /// before any step effect is performed.
    #[instrument(skip(self, json))]
    pub async fn run_script(&self, json: &str) -> Result<RunSummary, ChainError> {
        let records = parse_script(json)?;
        self.run_records(&records).await
    }

    /// Replay an already-parsed record sequence. A fresh chain is decoded
    /// per call, so break pass budgets always start full.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn run_records(&self, records: &[StepRecord]) -> Result<RunSummary, ChainError> {
        let chain = Chain::from_records(records)?;
        execute_chain(&chain, self.env.as_ref()).await
    }
}
