//! High-level functionality regarding the whole model-checking process.

use crate::errors::CheckError;
use crate::evaluation::algorithm::{check_state_formula, model_check};
use crate::evaluation::Labelling;
use crate::graph::StateSet;
use crate::kripke::Kripke;
use crate::preprocessing::ctl_tree::CtlTreeNode;
use crate::preprocessing::parser::parse_ctl_formula;

/// Perform the model checking for a list of CTL syntax trees on the given
/// Kripke structure. Return the list of resulting satisfying-state sets (in
/// the same order as the input formulae).
///
/// All formulae share one labelling map, so sub-formulae common to several
/// formulae are evaluated only once; with fairness constraints, the fair
/// states are likewise labelled only once for the whole batch.
pub fn model_check_multiple_trees(
    kripke: &mut Kripke,
    formula_trees: Vec<CtlTreeNode>,
    fairness: &[StateSet],
) -> Result<Vec<StateSet>, CheckError> {
    let fair_atom = if fairness.is_empty() {
        None
    } else {
        Some(CtlTreeNode::mk_proposition(
            &kripke.label_fair_states(fairness),
        ))
    };

    let mut labelling = Labelling::new();
    let mut results = Vec::new();
    for tree in formula_trees {
        if !tree.is_state_formula() {
            return Err(CheckError::InvariantViolation(format!(
                "`{tree}` is not a state formula"
            )));
        }
        let checked = match &fair_atom {
            Some(atom) => tree.get_equivalent_non_fair_formula(atom),
            None => tree,
        };
        check_state_formula(kripke, &checked, &mut labelling)?;
        results.push(
            labelling
                .get(checked.as_str())
                .cloned()
                .unwrap_or_default(),
        );
    }
    Ok(results)
}

/// Perform the model checking for a given CTL syntax tree on the given Kripke
/// structure. Return the resulting set of satisfying states.
pub fn model_check_tree(
    kripke: &mut Kripke,
    formula_tree: CtlTreeNode,
    fairness: &[StateSet],
) -> Result<StateSet, CheckError> {
    let mut result = model_check_multiple_trees(kripke, vec![formula_tree], fairness)?;
    Ok(result.remove(0))
}

/// Perform the model checking for a given CTL syntax tree, exposing the whole
/// labelling map built during the computation.
///
/// Returns the formula that was actually checked (after the potential
/// fairness rewrite); its canonical string keys the top-level result in
/// `labelling`, and every sub-formula encountered keys its own set.
pub fn model_check_tree_with_labelling(
    kripke: &mut Kripke,
    formula_tree: &CtlTreeNode,
    labelling: &mut Labelling,
    fairness: &[StateSet],
) -> Result<CtlTreeNode, CheckError> {
    model_check(kripke, formula_tree, labelling, fairness)
}

/// Perform the model checking for a list of formula strings on the given
/// Kripke structure and return the list of resulting satisfying-state sets
/// (in the same order as the input formulae).
/// Return an error if some formula is badly formed.
pub fn model_check_multiple_formulae(
    kripke: &mut Kripke,
    formulae: Vec<String>,
    fairness: &[StateSet],
) -> Result<Vec<StateSet>, String> {
    let mut parsed_trees = Vec::new();
    for formula in formulae {
        parsed_trees.push(parse_ctl_formula(formula.as_str())?);
    }
    model_check_multiple_trees(kripke, parsed_trees, fairness).map_err(|e| e.to_string())
}

/// Perform the model checking for a given formula string on the given Kripke
/// structure and return the resulting set of satisfying states.
/// Return an error if the formula is badly formed.
pub fn model_check_formula(
    kripke: &mut Kripke,
    formula: &str,
    fairness: &[StateSet],
) -> Result<StateSet, String> {
    let mut result =
        model_check_multiple_formulae(kripke, vec![formula.to_string()], fairness)?;
    Ok(result.remove(0))
}

#[cfg(test)]
mod tests {
    use crate::graph::StateSet;
    use crate::kripke::{Kripke, LabellingFunction};
    use crate::model_checking::{
        model_check_formula, model_check_multiple_formulae, model_check_multiple_trees,
    };
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
    fn formula_strings_are_parsed_and_checked() {
        let mut kripke = demo_kripke();
        let result = model_check_formula(&mut kripke, "E(p U q)", &[]).unwrap();
        assert_eq!(result, StateSet::from([1, 2]));

        assert!(model_check_formula(&mut kripke, "E(p U", &[]).is_err());
    }

    #[test]
    fn path_formula_roots_are_rejected() {
        let mut kripke = demo_kripke();
        let result = model_check_formula(&mut kripke, "X p", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn multiple_formulae_are_checked_in_order() {
        let mut kripke = demo_kripke();
        let results = model_check_multiple_formulae(
            &mut kripke,
            vec!["p".to_string(), "q".to_string(), "true".to_string()],
            &[],
        )
        .unwrap();
        assert_eq!(
            results,
            vec![
                StateSet::from([1]),
                StateSet::from([2]),
                StateSet::from([0, 1, 2]),
            ]
        );
    }

    #[test]
    /// With fairness constraints, the batch labels fair states exactly once.
    fn batched_fairness_labels_only_once() {
        let mut kripke = demo_kripke();
        let trees = vec![
            parse_ctl_formula("E G true").unwrap(),
            parse_ctl_formula("E G true").unwrap(),
        ];
        let results =
            model_check_multiple_trees(&mut kripke, trees, &[StateSet::from([2])]).unwrap();
        assert_eq!(results[0], StateSet::from([0, 1, 2]));
        assert_eq!(results[0], results[1]);
        // only the first fair label was ever created
        assert!(kripke.alphabet().contains("fair"));
        assert!(!kripke.alphabet().contains("fair0"));
    }
}
