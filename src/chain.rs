//! The chain: an ordered, linked sequence of steps built once from a
//! serialized script.
//!
//! Steps live in an arena (a `Vec` of nodes with stable indices) and link
//! forward through plain integer slots instead of object references. Slot 0
//! always holds the no-op sentinel that precedes the first authored step.
//! Construction is a simple path in input order; the one place the link graph
//! can point backward is the successor of a `goto` step, which makes the
//! *runtime* traversal loop while the construction-order sequence stays
//! acyclic.

use crate::errors::ChainError;
use crate::step::{Step, StepRecord};

/// One arena slot: a step plus its forward link.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) step: Step,
    pub(crate) next: Option<usize>,
}

/// The linked, ordered collection of steps executable as one script.
#[derive(Debug, Clone)]
pub struct Chain {
    nodes: Vec<Node>,
}

impl Chain {
    /// Arena slot of the sentinel head.
    pub(crate) const SENTINEL: usize = 0;

    /// Build a chain from an ordered sequence of step records.
    ///
    /// Records are decoded and linked in input order. A `goto` record is
    /// validated against its own input position — its target must name a
    /// strictly earlier step ([`ChainError::InvalidGotoTarget`] otherwise) —
    /// and is always the last step linked: its successor is resolved to the
    /// step at the target position and any remaining input records are
    /// intentionally discarded, since nothing past a backward jump is
    /// reachable. Construction never performs any step effect.
    pub fn from_records(records: &[StepRecord]) -> Result<Self, ChainError> {
        let mut nodes = vec![Node {
            step: Step::Noop,
            next: None,
        }];
        for (position, record) in records.iter().enumerate() {
            let step = Step::decode(record);
            let slot = nodes.len();
            if let Step::Goto { target_index } = step {
                if target_index < 0 || target_index >= position as i64 {
                    return Err(ChainError::InvalidGotoTarget {
                        target: target_index,
                        position,
                    });
                }
                nodes[slot - 1].next = Some(slot);
                nodes.push(Node {
                    step,
                    // Ordinal target to arena slot: the sentinel occupies
                    // slot 0, authored step i sits at slot i + 1.
                    next: Some(target_index as usize + 1),
                });
                break;
            }
            nodes[slot - 1].next = Some(slot);
            nodes.push(Node { step, next: None });
        }
        Ok(Self { nodes })
    }

    /// Number of steps retained at construction, sentinel excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True when the chain holds nothing but the sentinel.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The step physically at ordinal position `i`, 0-based from the first
    /// authored step and counted in construction order, independent of any
    /// run-time loop. `None` when `i` is out of range.
    pub fn step_at(&self, i: usize) -> Option<&Step> {
        self.nodes.get(i + 1).map(|node| &node.step)
    }

    /// Ordinal position of the successor of the step at ordinal `i`, if any.
    /// For the tail of a `goto` sub-chain this points backward.
    pub fn successor_of(&self, i: usize) -> Option<usize> {
        self.nodes.get(i + 1)?.next.map(|slot| slot - 1)
    }

    /// Round-trip serialization: the retained steps re-encoded in
    /// construction order. Records discarded at construction (anything after
    /// a `goto`) are not part of the chain and do not reappear. The walk is
    /// over arena order, never the link graph, which may cycle.
    pub fn to_records(&self) -> Vec<StepRecord> {
        self.nodes[1..]
            .iter()
            .filter_map(|node| node.step.encode())
            .collect()
    }

    pub(crate) fn node(&self, slot: usize) -> &Node {
        &self.nodes[slot]
    }

    /// Per-slot pass budgets for one execution, taken from each break step's
    /// encoded limit. Non-break slots carry `None`.
    pub(crate) fn pass_limits(&self) -> Vec<Option<u32>> {
        self.nodes
            .iter()
            .map(|node| match node.step {
                Step::Break { pass_limit } => Some(pass_limit),
                _ => None,
            })
            .collect()
    }
}
