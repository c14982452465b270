//! Error kinds shared by the graph primitives, the Kripke structure, and the checker.

use crate::graph::State;
use thiserror::Error;

/// Errors raised while building graphs or Kripke structures, or during a check.
///
/// The checker itself never fails on well-formed input; these errors surface
/// malformed structures (unknown states, duplicate edges) or formulae that
/// violate the shape the checking procedures rely on.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CheckError {
    /// A state was looked up that is not present in the graph or Kripke structure.
    #[error("state `{0}` not found")]
    NodeMissing(State),
    /// Attempt to insert a node that already exists.
    #[error("node `{0}` already exists in the digraph")]
    DuplicateNode(State),
    /// Attempt to insert an edge that already exists.
    #[error("edge `({0}, {1})` already exists in the digraph")]
    DuplicateEdge(State, State),
    /// A labelling or formula-shape invariant was violated at check time.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
