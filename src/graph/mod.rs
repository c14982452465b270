//! Directed-graph primitives shared by the Kripke structure and the model checker.

pub mod digraph;
pub mod scc;

use std::collections::BTreeSet;

/// Identifier of a single state (graph node).
pub type State = u32;

/// A set of states. Ordered, so that iteration, printing, and the SCC
/// traversal order are deterministic.
pub type StateSet = BTreeSet<State>;
