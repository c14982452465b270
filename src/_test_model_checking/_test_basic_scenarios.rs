//! Evaluation of the individual restricted operators on the demo structure,
//! including the exact labelling-map keys produced along the way.

use crate::_test_model_checking::_test_util::demo_kripke;
use crate::evaluation::Labelling;
use crate::graph::StateSet;
use crate::model_checking::{model_check_formula, model_check_tree_with_labelling};
use crate::preprocessing::parser::parse_ctl_formula;

/// Check `formula` on the demo structure and return the populated labelling
/// map together with the key of the checked formula.
fn check_on_demo(formula: &str) -> (Labelling, String) {
    let mut kripke = demo_kripke();
    let tree = parse_ctl_formula(formula).unwrap();
    let mut labelling = Labelling::new();
    let checked =
        model_check_tree_with_labelling(&mut kripke, &tree, &mut labelling, &[]).unwrap();
    (labelling, checked.to_string())
}

#[test]
/// Constants hold everywhere respectively nowhere.
fn booleans() {
    let (labelling, key) = check_on_demo("true");
    assert_eq!(key, "true");
    assert_eq!(labelling["true"], StateSet::from([0, 1, 2]));

    let (labelling, key) = check_on_demo("false");
    assert_eq!(key, "false");
    assert_eq!(labelling["false"], StateSet::new());
}

#[test]
/// Atomic propositions hold exactly where the labelling says so.
fn atomic_propositions() {
    let (labelling, _) = check_on_demo("p");
    assert_eq!(labelling["p"], StateSet::from([1]));

    let (labelling, _) = check_on_demo("q");
    assert_eq!(labelling["q"], StateSet::from([2]));
}

#[test]
/// `E X q`: states 1 and 2 have a q-successor.
fn exists_next() {
    let (labelling, key) = check_on_demo("EX q");
    assert_eq!(key, "E(X(q))");
    assert_eq!(labelling["E(X(q))"], StateSet::from([1, 2]));
    // the quantified path formula keys the same satisfying set
    assert_eq!(labelling["X(q)"], StateSet::from([1, 2]));
    assert_eq!(labelling["q"], StateSet::from([2]));
}

#[test]
/// `E (p U q)`: the q-core {2} grows backwards through the p-state 1; state 0
/// satisfies neither p nor q and stays out.
fn exists_until() {
    let (labelling, key) = check_on_demo("E(p U q)");
    assert_eq!(key, "E((p U q))");
    assert_eq!(labelling["E((p U q))"], StateSet::from([1, 2]));
    assert_eq!(labelling["(p U q)"], StateSet::from([1, 2]));
}

#[test]
/// `E G q`: only the self-loop state 2 can stay inside the q-states forever.
fn exists_globally() {
    let (labelling, key) = check_on_demo("EG q");
    assert_eq!(key, "E(G(q))");
    assert_eq!(labelling["E(G(q))"], StateSet::from([2]));
    assert_eq!(labelling["G(q)"], StateSet::from([2]));
}

#[test]
/// Operators outside the restricted fragment are checked through their
/// equivalents; the original formula keys the result as well.
fn derived_operators() {
    let mut kripke = demo_kripke();
    // every state eventually reaches the q-loop
    assert_eq!(
        model_check_formula(&mut kripke, "EF q", &[]).unwrap(),
        StateSet::from([0, 1, 2])
    );
    assert_eq!(
        model_check_formula(&mut kripke, "AF q", &[]).unwrap(),
        StateSet::from([1, 2])
    );
    assert_eq!(
        model_check_formula(&mut kripke, "AG EF q", &[]).unwrap(),
        StateSet::from([0, 1, 2])
    );
    assert_eq!(
        model_check_formula(&mut kripke, "A(p U q)", &[]).unwrap(),
        StateSet::from([1, 2])
    );
    assert_eq!(
        model_check_formula(&mut kripke, "AX q", &[]).unwrap(),
        StateSet::from([1, 2])
    );
    assert_eq!(
        model_check_formula(&mut kripke, "p and q", &[]).unwrap(),
        StateSet::new()
    );
    assert_eq!(
        model_check_formula(&mut kripke, "p -> q", &[]).unwrap(),
        StateSet::from([0, 2])
    );
    // no state can hold p up to a (q and p) release point, nor forever
    assert_eq!(
        model_check_formula(&mut kripke, "E(q R p)", &[]).unwrap(),
        StateSet::new()
    );
    // but p can hold until q: release with swapped operands
    assert_eq!(
        model_check_formula(&mut kripke, "E(p R q)", &[]).unwrap(),
        StateSet::from([2])
    );
}
