//! Evaluation of pairs of equivalent formulae and of the quantified
//! invariants relating a formula to its rewrites and to its negation.

use crate::_test_model_checking::_test_util::demo_kripke;
use crate::graph::StateSet;
use crate::model_checking::{model_check_formula, model_check_tree};
use crate::preprocessing::ctl_tree::CtlTreeNode;
use crate::preprocessing::operator_enums::UnaryOp;
use crate::preprocessing::parser::parse_ctl_formula;

#[test]
/// A state satisfies `not φ` iff it does not satisfy `φ`.
fn complement_invariant() {
    let formulae = vec![
        "true",
        "false",
        "p",
        "p or q",
        "p and q",
        "p -> q",
        "EX q",
        "E(p U q)",
        "EG q",
        "AX q",
        "AF q",
        "AG EF q",
    ];

    for formula in formulae {
        let tree = parse_ctl_formula(formula).unwrap();
        let negated = CtlTreeNode::mk_unary(tree.clone(), UnaryOp::Not);

        let mut kripke = demo_kripke();
        let all_states = kripke.state_set();
        let positive = model_check_tree(&mut kripke, tree, &[]).unwrap();
        let negative = model_check_tree(&mut kripke, negated, &[]).unwrap();

        let union: StateSet = positive.union(&negative).copied().collect();
        assert_eq!(union, all_states, "complement broken for `{formula}`");
        assert!(
            positive.is_disjoint(&negative),
            "overlap for `{formula}`"
        );
    }
}

#[test]
/// The complement invariant also holds over generated Boolean formulae.
fn complement_invariant_random_boolean() {
    let props = vec!["p".to_string(), "q".to_string()];
    for seed in 0..10 {
        let tree = CtlTreeNode::new_random_boolean(3, &props, seed);
        let negated = CtlTreeNode::mk_unary(tree.clone(), UnaryOp::Not);

        let mut kripke = demo_kripke();
        let all_states = kripke.state_set();
        let positive = model_check_tree(&mut kripke, tree.clone(), &[]).unwrap();
        let negative = model_check_tree(&mut kripke, negated, &[]).unwrap();

        let union: StateSet = positive.union(&negative).copied().collect();
        assert_eq!(union, all_states, "complement broken for `{tree}`");
        assert!(positive.is_disjoint(&negative), "overlap for `{tree}`");
    }
}

#[test]
/// Checking a formula and checking its restricted-fragment equivalent must
/// produce the same satisfying set (the labelling keys may differ).
fn restricted_equivalence() {
    let formulae = vec![
        "p and q",
        "p -> q",
        "not (p or not q)",
        "EF q",
        "AX q",
        "AF q",
        "AG p",
        "A(p U q)",
        "A(p R q)",
        "E(p R q)",
        "AG EF q",
        "E(p U EG q)",
    ];

    for formula in formulae {
        let tree = parse_ctl_formula(formula).unwrap();
        let restricted = tree.get_equivalent_restricted_formula();

        let mut kripke = demo_kripke();
        let direct = model_check_tree(&mut kripke, tree, &[]).unwrap();
        let via_restricted = model_check_tree(&mut kripke, restricted, &[]).unwrap();
        assert_eq!(direct, via_restricted, "rewrite changed `{formula}`");
    }
}

#[test]
/// `A X ψ` is the complement of `E X not ψ`.
fn next_duality() {
    let mut kripke = demo_kripke();
    let all_states = kripke.state_set();
    let universal = model_check_formula(&mut kripke, "AX q", &[]).unwrap();
    let existential = model_check_formula(&mut kripke, "EX not q", &[]).unwrap();

    let complement: StateSet = all_states
        .difference(&existential)
        .copied()
        .collect();
    assert_eq!(universal, complement);
}

#[test]
/// `E F φ` collapses to `E(true U φ)`.
fn finally_collapses_to_until() {
    let mut kripke = demo_kripke();
    let finally = model_check_formula(&mut kripke, "EF q", &[]).unwrap();
    let until = model_check_formula(&mut kripke, "E(true U q)", &[]).unwrap();
    assert_eq!(finally, until);
    assert_eq!(finally, StateSet::from([0, 1, 2]));
}

#[test]
/// Several other pairs of formulae that must agree on every state.
fn equivalent_formula_pairs() {
    let equivalent_pairs = vec![
        ("true", "not false"),
        ("p", "not not p"),
        ("p and q", "not (not p or not q)"),
        ("AG p", "not EF not p"),
        ("AF q", "not EG not q"),
        ("A(false R q)", "AG q"),
        ("E(false R q)", "EG q"),
        ("EX q", "not AX not q"),
    ];

    for (left, right) in equivalent_pairs {
        let mut kripke = demo_kripke();
        let left_result = model_check_formula(&mut kripke, left, &[]).unwrap();
        let right_result = model_check_formula(&mut kripke, right, &[]).unwrap();
        assert_eq!(left_result, right_result, "`{left}` != `{right}`");
    }
}
