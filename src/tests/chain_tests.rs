//! Chain construction and link-graph tests.

use crate::chain::Chain;
use crate::errors::ChainError;
use crate::step::{Step, StepRecord};
use crate::target::TargetRef;

fn click(id: &str) -> StepRecord {
    StepRecord::Click {
        target: TargetRef::by_id(id),
    }
}

#[test]
fn empty_script_builds_a_sentinel_only_chain() {
    let chain = Chain::from_records(&[]).expect("empty script is valid");
    assert!(chain.is_empty());
    assert_eq!(chain.len(), 0);
    assert_eq!(chain.step_at(0), None);
    assert!(chain.to_records().is_empty());
}

#[test]
fn linear_script_links_in_input_order() {
    let records = vec![click("a"), StepRecord::Wait { time: 100 }, click("b")];
    let chain = Chain::from_records(&records).unwrap();

    assert_eq!(chain.len(), 3);
    assert_eq!(
        chain.step_at(0),
        Some(&Step::Click {
            target: TargetRef::by_id("a")
        })
    );
    assert_eq!(chain.step_at(1), Some(&Step::Wait { time_ms: 100 }));
    assert_eq!(chain.successor_of(0), Some(1));
    assert_eq!(chain.successor_of(1), Some(2));
    assert_eq!(chain.successor_of(2), None);
    assert_eq!(chain.step_at(3), None);
}

#[test]
fn goto_must_point_strictly_backward() {
    // Negative target.
    let err =
        Chain::from_records(&[click("a"), StepRecord::Goto { goto_step: -1 }]).unwrap_err();
    assert!(
        matches!(err, ChainError::InvalidGotoTarget { target: -1, position: 1 }),
        "unexpected error: {err}"
    );

    // Self jump.
    let err =
        Chain::from_records(&[click("a"), StepRecord::Goto { goto_step: 1 }]).unwrap_err();
    assert!(matches!(
        err,
        ChainError::InvalidGotoTarget {
            target: 1,
            position: 1
        }
    ));

    // Forward jump.
    let err = Chain::from_records(&[
        click("a"),
        StepRecord::Goto { goto_step: 5 },
        click("b"),
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        ChainError::InvalidGotoTarget {
            target: 5,
            position: 1
        }
    ));

    // A goto at position 0 has no earlier step to jump to.
    let err = Chain::from_records(&[StepRecord::Goto { goto_step: 0 }]).unwrap_err();
    assert!(matches!(
        err,
        ChainError::InvalidGotoTarget {
            target: 0,
            position: 0
        }
    ));
}

#[test]
fn goto_links_back_to_the_target_step() {
    // The third linked step's successor is the first linked step (index 0).
    let records = vec![
        click("a"),
        StepRecord::Wait { time: 1000 },
        StepRecord::Goto { goto_step: 0 },
    ];
    let chain = Chain::from_records(&records).unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.successor_of(2), Some(0));
}

#[test]
fn records_after_a_goto_are_discarded() {
    let records = vec![
        click("a"),
        StepRecord::Goto { goto_step: 0 },
        click("never-linked"),
        StepRecord::Wait { time: 50 },
    ];
    let chain = Chain::from_records(&records).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.step_at(2), None);
    assert_eq!(chain.to_records(), records[..2].to_vec());
}

#[test]
fn to_records_round_trips_a_linear_script() {
    let records = vec![
        click("a"),
        StepRecord::Input {
            target: TargetRef::by_class("form-control"),
            text: "hi".to_string(),
        },
        StepRecord::Wait { time: 250 },
        StepRecord::Break { pass: 3 },
    ];
    let chain = Chain::from_records(&records).unwrap();
    assert_eq!(chain.to_records(), records);

    // Rebuilding from the round-tripped records yields an equivalent chain.
    let rebuilt = Chain::from_records(&chain.to_records()).unwrap();
    assert_eq!(rebuilt.len(), chain.len());
    for i in 0..chain.len() {
        assert_eq!(rebuilt.step_at(i), chain.step_at(i));
        assert_eq!(rebuilt.successor_of(i), chain.successor_of(i));
    }
}

#[test]
fn invalid_goto_rejects_the_whole_script() {
    // Construction fails atomically; there is no partially-built chain to
    // observe and no step effect was performed.
    let records = vec![click("a"), click("b"), StepRecord::Goto { goto_step: 2 }];
    assert!(Chain::from_records(&records).is_err());
}
