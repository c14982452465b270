//! Contains the memoised state-formula dispatcher and the top-level
//! model-checking entry point.

use crate::errors::CheckError;
use crate::evaluation::ctl_operators_eval::*;
use crate::evaluation::Labelling;
use crate::graph::StateSet;
use crate::kripke::Kripke;
use crate::preprocessing::ctl_tree::{CtlTreeNode, NodeType};
use crate::preprocessing::operator_enums::*;

/// Model-check `formula` on `kripke`, accumulating results in `labelling`.
///
/// If `fairness` is non-empty, the fair states are labelled with a fresh
/// atomic proposition and the formula is translated into its plain-CTL
/// equivalent over the augmented structure. The formula that was actually
/// checked is returned; its canonical string keys the top-level result in
/// `labelling`.
pub fn model_check(
    kripke: &mut Kripke,
    formula: &CtlTreeNode,
    labelling: &mut Labelling,
    fairness: &[StateSet],
) -> Result<CtlTreeNode, CheckError> {
    if !formula.is_state_formula() {
        return Err(CheckError::InvariantViolation(format!(
            "`{formula}` is not a state formula"
        )));
    }

    let formula = if fairness.is_empty() {
        formula.clone()
    } else {
        let fair_label = kripke.label_fair_states(fairness);
        formula.get_equivalent_non_fair_formula(&CtlTreeNode::mk_proposition(&fair_label))
    };

    check_state_formula(kripke, &formula, labelling)?;
    Ok(formula)
}

/// Recursively compute the set of states satisfying `formula` and record it
/// in `labelling` under the formula's canonical string.
///
/// Every call is memoised through `labelling`: a key that is already present
/// is never recomputed, and an empty entry is inserted before descending, so
/// shared sub-formulae are evaluated at most once.
///
/// Operators outside the restricted fragment are checked through their
/// restricted equivalent, and the resulting set is recorded under both keys.
pub fn check_state_formula(
    kripke: &Kripke,
    formula: &CtlTreeNode,
    labelling: &mut Labelling,
) -> Result<(), CheckError> {
    if labelling.contains_key(formula.as_str()) {
        return Ok(());
    }
    labelling.insert(formula.as_str().to_string(), StateSet::new());

    let satisfying = match &formula.node_type {
        NodeType::Terminal(Atomic::True) => kripke.state_set(),
        NodeType::Terminal(Atomic::False) => StateSet::new(),
        NodeType::Terminal(Atomic::Prop(name)) => eval_ap(kripke, name)?,
        NodeType::Unary(UnaryOp::Not, child) => {
            check_state_formula(kripke, child, labelling)?;
            eval_not(kripke, satisfying_states(labelling, child)?)
        }
        NodeType::Binary(BinaryOp::Or, left, right) => {
            check_state_formula(kripke, left, labelling)?;
            check_state_formula(kripke, right, labelling)?;
            eval_or(
                satisfying_states(labelling, left)?,
                satisfying_states(labelling, right)?,
            )
        }
        NodeType::Unary(UnaryOp::E, path) => {
            let satisfying = match &path.node_type {
                NodeType::Unary(UnaryOp::X, target) => {
                    check_state_formula(kripke, target, labelling)?;
                    eval_ex(kripke, satisfying_states(labelling, target)?)
                }
                NodeType::Unary(UnaryOp::G, invariant) => {
                    check_state_formula(kripke, invariant, labelling)?;
                    eval_eg(kripke, satisfying_states(labelling, invariant)?)?
                }
                NodeType::Binary(BinaryOp::U, path_sub, target) => {
                    check_state_formula(kripke, path_sub, labelling)?;
                    check_state_formula(kripke, target, labelling)?;
                    let path_set = satisfying_states(labelling, path_sub)?.clone();
                    eval_eu(kripke, &path_set, satisfying_states(labelling, target)?)?
                }
                NodeType::Unary(UnaryOp::F, _) | NodeType::Binary(BinaryOp::R, _, _) => {
                    check_via_restricted(kripke, formula, labelling)?
                }
                _ => {
                    return Err(CheckError::InvariantViolation(format!(
                        "`E` must quantify a temporal path formula, got `{path}`"
                    )));
                }
            };
            // the quantified path formula keys the same satisfying set
            record(labelling, path.as_str(), &satisfying);
            satisfying
        }
        NodeType::Unary(UnaryOp::A, path) => {
            if !matches!(
                &path.node_type,
                NodeType::Unary(UnaryOp::X | UnaryOp::F | UnaryOp::G, _)
                    | NodeType::Binary(BinaryOp::U | BinaryOp::R, _, _)
            ) {
                return Err(CheckError::InvariantViolation(format!(
                    "`A` must quantify a temporal path formula, got `{path}`"
                )));
            }
            check_via_restricted(kripke, formula, labelling)?
        }
        NodeType::Binary(BinaryOp::And | BinaryOp::Imply, _, _) => {
            check_via_restricted(kripke, formula, labelling)?
        }
        // a bare temporal operator has no truth value at a state
        NodeType::Unary(UnaryOp::X | UnaryOp::F | UnaryOp::G, _)
        | NodeType::Binary(BinaryOp::U | BinaryOp::R, _, _) => {
            return Err(CheckError::InvariantViolation(format!(
                "`{formula}` is a path formula and cannot be checked at a state"
            )));
        }
    };

    record(labelling, formula.as_str(), &satisfying);
    Ok(())
}

/// Check `formula` through its restricted-fragment equivalent and return the
/// computed satisfying set (recorded under the equivalent's key by the
/// recursive call).
fn check_via_restricted(
    kripke: &Kripke,
    formula: &CtlTreeNode,
    labelling: &mut Labelling,
) -> Result<StateSet, CheckError> {
    let restricted = formula.get_equivalent_restricted_formula();
    check_state_formula(kripke, &restricted, labelling)?;
    Ok(satisfying_states(labelling, &restricted)?.clone())
}

/// Add `satisfying` to the entry of `key`, creating the entry if necessary.
/// Entries only ever grow, which keeps already-handed-out results valid.
fn record(labelling: &mut Labelling, key: &str, satisfying: &StateSet) {
    labelling
        .entry(key.to_string())
        .or_default()
        .extend(satisfying.iter().copied());
}

/// Look up the satisfying set computed for `formula`.
fn satisfying_states<'a>(
    labelling: &'a Labelling,
    formula: &CtlTreeNode,
) -> Result<&'a StateSet, CheckError> {
    labelling
        .get(formula.as_str())
        .ok_or_else(|| CheckError::InvariantViolation(format!("no labelling entry for `{formula}`")))
}

#[cfg(test)]
mod tests {
    use super::{check_state_formula, model_check};
    use crate::errors::CheckError;
    use crate::evaluation::Labelling;
    use crate::graph::StateSet;
    use crate::kripke::{Kripke, LabellingFunction};
    use crate::preprocessing::parser::parse_ctl_formula;

    use std::collections::BTreeSet;

    fn demo_kripke() -> Kripke {
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

    #[test]
    fn constants_and_atoms() {
        let kripke = demo_kripke();
        let mut labelling = Labelling::new();

        let formula = parse_ctl_formula("true").unwrap();
        check_state_formula(&kripke, &formula, &mut labelling).unwrap();
        assert_eq!(labelling["true"], StateSet::from([0, 1, 2]));

        let formula = parse_ctl_formula("false").unwrap();
        check_state_formula(&kripke, &formula, &mut labelling).unwrap();
        assert_eq!(labelling["false"], StateSet::new());

        let formula = parse_ctl_formula("p").unwrap();
        check_state_formula(&kripke, &formula, &mut labelling).unwrap();
        assert_eq!(labelling["p"], StateSet::from([1]));
    }

    #[test]
    fn path_formulae_are_rejected() {
        let mut kripke = demo_kripke();
        let mut labelling = Labelling::new();
        let formula = parse_ctl_formula("X p").unwrap();
        let result = model_check(&mut kripke, &formula, &mut labelling, &[]);
        assert!(matches!(result, Err(CheckError::InvariantViolation(_))));
    }

    #[test]
    fn ill_formed_quantification_is_rejected() {
        let kripke = demo_kripke();
        let mut labelling = Labelling::new();
        // E over a plain state formula is not well-formed CTL
        let formula = parse_ctl_formula("E p").unwrap();
        let result = check_state_formula(&kripke, &formula, &mut labelling);
        assert!(matches!(result, Err(CheckError::InvariantViolation(_))));
    }

    #[test]
    /// A pre-seeded labelling entry acts as a cache: the checker must reuse
    /// it instead of recomputing the sub-formula.
    fn preseeded_entries_are_reused() {
        let kripke = demo_kripke();
        let mut labelling = Labelling::new();
        // deliberately wrong entry for `p`, to make reuse observable
        labelling.insert("p".to_string(), StateSet::from([0]));

        let formula = parse_ctl_formula("E X p").unwrap();
        check_state_formula(&kripke, &formula, &mut labelling).unwrap();
        // predecessors of 0 (instead of predecessors of the true p-state 1)
        assert_eq!(labelling["E(X(p))"], StateSet::from([0]));
    }
}
