//! The chain executor: a sequential cursor walk over the link graph.

use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::chain::Chain;
use crate::environment::Environment;
use crate::errors::ChainError;
use crate::step::Step;

/// Outcome of one complete chain execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps performed, sentinel excluded. Looping counts every visit, so
    /// this can exceed the chain's length.
    pub steps_performed: u64,
    /// Wall-clock duration of the walk, wait suspensions included.
    pub elapsed: Duration,
}

/// Walk the chain from its sentinel, performing each step's effect against
/// `env` and following forward links until a step has no successor.
///
/// Steps execute strictly one at a time in link order. Only a wait step
/// suspends. The walk ends by falling off the natural end of the chain or by
/// a break step whose pass budget for this execution is spent; a backward
/// `goto` link makes the walk revisit earlier steps instead.
///
/// Break budgets are materialized here, keyed by arena slot, at the start of
/// every call — the chain itself is never mutated, so executing the same
/// decoded chain twice runs the full budget both times.
///
/// Effects are not transactional: on error the walk stops and whatever was
/// already performed stays applied.
#[instrument(skip(chain, env), fields(steps = chain.len()))]
pub async fn execute_chain(chain: &Chain, env: &dyn Environment) -> Result<RunSummary, ChainError> {
    let started = Instant::now();
    let mut remaining = chain.pass_limits();
    let mut performed: u64 = 0;
    let mut cursor = Some(Chain::SENTINEL);

    while let Some(slot) = cursor {
        let node = chain.node(slot);
        let mut next = node.next;
        match &node.step {
            Step::Noop => {}
            Step::Click { target } => {
                let element = env
                    .resolve_target(target)?
                    .ok_or_else(|| ChainError::TargetUnresolved(target.to_string()))?;
                element.click()?;
            }
            Step::Input { target, text } => {
                let element = env
                    .resolve_target(target)?
                    .ok_or_else(|| ChainError::TargetUnresolved(target.to_string()))?;
                element.set_value(text)?;
            }
            Step::Wait { time_ms } => {
                if *time_ms > 0 {
                    env.sleep(Duration::from_millis(*time_ms as u64)).await;
                }
            }
            Step::Goto { .. } => {
                // Jump semantics were encoded in the link graph at
                // construction time; nothing to perform.
            }
            Step::Break { .. } => match &mut remaining[slot] {
                // Budget spent: this step has no successor for the rest of
                // this pass and the walk ends here.
                Some(passes) if *passes == 0 => next = None,
                Some(passes) => *passes -= 1,
                // A break slot always carries a budget; treat a missing one
                // as spent rather than looping forever.
                None => next = None,
            },
        }
        if !matches!(node.step, Step::Noop) {
            performed += 1;
            debug!(slot, kind = node.step.kind(), "step performed");
        }
        cursor = next;
    }

    let summary = RunSummary {
        steps_performed: performed,
        elapsed: started.elapsed(),
    };
    debug!(steps = summary.steps_performed, elapsed = ?summary.elapsed, "chain walk finished");
    Ok(summary)
}
