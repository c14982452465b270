//! Helpers shared by the model-checking test scenarios.

use crate::graph::StateSet;
use crate::kripke::{Kripke, LabellingFunction};

use std::collections::BTreeSet;

/// The three-state demo structure: `0 -> 0, 0 -> 1, 1 -> 2, 2 -> 2` with `p`
/// at state 1 and `q` at state 2.
pub fn demo_kripke() -> Kripke {
    let labels = LabellingFunction::from([
        (1, BTreeSet::from(["p".to_string()])),
        (2, BTreeSet::from(["q".to_string()])),
    ]);
    Kripke::new(
        [0, 1, 2],
        StateSet::from([0]),
        [(0, 0), (0, 1), (1, 2), (2, 2)],
        labels,
    )
    .unwrap()
}

/// A two-state cycle `0 <-> 1` with `p` at state 0, used by the fairness
/// scenarios.
pub fn cycle_kripke() -> Kripke {
    let labels = LabellingFunction::from([(0, BTreeSet::from(["p".to_string()]))]);
    Kripke::new([0, 1], StateSet::from([0]), [(0, 1), (1, 0)], labels).unwrap()
}
