//! Components regarding the model-checking computation itself: the operator
//! kernels and the memoised dispatch loop.

pub mod algorithm;
pub mod ctl_operators_eval;

use crate::graph::StateSet;

use std::collections::HashMap;

/// The labelling map built up during a check: canonical formula strings
/// mapped to the set of states satisfying that formula.
///
/// Once a key is inserted, its set is only ever added to, never overwritten.
/// The map doubles as the memoization cache, so sub-formulae shared between
/// formulae (or pre-seeded by the caller) are evaluated only once.
pub type Labelling = HashMap<String, StateSet>;
