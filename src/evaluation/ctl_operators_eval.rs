//! Contains the evaluation kernels for the restricted CTL operators on
//! explicit Kripke structures. Each kernel takes the already-computed
//! satisfying sets of its operands and returns the satisfying set of the
//! composed formula.

use crate::errors::CheckError;
use crate::graph::scc::{compute_sccs, is_nontrivial_scc};
use crate::graph::{State, StateSet};
use crate::kripke::Kripke;

/// Evaluate an atomic proposition: the states whose label set contains `name`.
pub fn eval_ap(kripke: &Kripke, name: &str) -> Result<StateSet, CheckError> {
    let mut satisfying = StateSet::new();
    for s in kripke.states() {
        if kripke.labels(s)?.contains(name) {
            satisfying.insert(s);
        }
    }
    Ok(satisfying)
}

/// Evaluate a negation: the complement with respect to the state space.
pub fn eval_not(kripke: &Kripke, child_set: &StateSet) -> StateSet {
    kripke.states().filter(|s| !child_set.contains(s)).collect()
}

/// Evaluate a disjunction: the union of both operand sets.
pub fn eval_or(left_set: &StateSet, right_set: &StateSet) -> StateSet {
    left_set.union(right_set).copied().collect()
}

/// Evaluate `E X φ`: states with at least one successor satisfying `φ`.
pub fn eval_ex(kripke: &Kripke, target_set: &StateSet) -> StateSet {
    let mut satisfying = StateSet::new();
    for (src, dst) in kripke.transitions() {
        if target_set.contains(&dst) {
            satisfying.insert(src);
        }
    }
    satisfying
}

/// Evaluate `E (φ U ψ)` as a least fixed point: start from the ψ-states and
/// keep adding φ-predecessors until nothing changes.
pub fn eval_eu(
    kripke: &Kripke,
    path_set: &StateSet,
    target_set: &StateSet,
) -> Result<StateSet, CheckError> {
    let mut satisfying = target_set.clone();
    let mut worklist: Vec<State> = target_set.iter().copied().collect();
    let reversed = kripke.graph().reversed();

    while let Some(v) = worklist.pop() {
        for &t in reversed.next(v)? {
            if path_set.contains(&t) && !satisfying.contains(&t) {
                satisfying.insert(t);
                worklist.push(t);
            }
        }
    }
    Ok(satisfying)
}

/// Evaluate `E G φ`: within the subgraph induced by the φ-states, seed with
/// all nontrivial SCCs (only those can carry an infinite φ-path) and close
/// backwards under φ-predecessors.
pub fn eval_eg(kripke: &Kripke, invariant_set: &StateSet) -> Result<StateSet, CheckError> {
    let restricted = kripke.graph().subgraph(invariant_set);
    let reversed = restricted.reversed();

    let mut satisfying = StateSet::new();
    let mut worklist: Vec<State> = Vec::new();
    for component in compute_sccs(&restricted) {
        if is_nontrivial_scc(&restricted, &component) {
            for &v in &component {
                satisfying.insert(v);
                worklist.push(v);
            }
        }
    }

    // predecessors inside the restricted graph satisfy φ by construction
    while let Some(v) = worklist.pop() {
        for &t in reversed.next(v)? {
            if !satisfying.contains(&t) {
                satisfying.insert(t);
                worklist.push(t);
            }
        }
    }
    Ok(satisfying)
}
