//! Model checking under fairness constraints: fair states are labelled with
//! a fresh proposition and the formula is translated into plain CTL.

use crate::_test_model_checking::_test_util::{cycle_kripke, demo_kripke};
use crate::graph::StateSet;
use crate::model_checking::model_check_formula;

#[test]
/// On the two-state cycle, every state reaches the fair SCC, so `EG true`
/// under fairness holds everywhere.
fn fair_globally_true_on_cycle() {
    let mut kripke = cycle_kripke();
    let result =
        model_check_formula(&mut kripke, "EG true", &[StateSet::from([0])]).unwrap();
    assert_eq!(result, StateSet::from([0, 1]));
}

#[test]
/// A constraint set mentioning only an absent state rules out every SCC, so
/// nothing is fair and `EG true` holds nowhere.
fn unsatisfiable_constraint_empties_the_result() {
    let mut kripke = cycle_kripke();
    let fairness = [StateSet::from([0]), StateSet::from([2])];
    let result = model_check_formula(&mut kripke, "EG true", &fairness).unwrap();
    assert_eq!(result, StateSet::new());
}

#[test]
/// Without any constraint the fairness machinery stays off: `EG true` holds
/// wherever an infinite path exists.
fn no_constraints_means_plain_ctl() {
    let mut kripke = cycle_kripke();
    let result = model_check_formula(&mut kripke, "EG true", &[]).unwrap();
    assert_eq!(result, StateSet::from([0, 1]));
    // no fair proposition was introduced
    assert!(!kripke.alphabet().contains("fair"));
}

#[test]
/// On the demo structure, only the q-loop is fair under the constraint {2};
/// `EF p` restricted to fair paths must still find the p-state on the way.
fn fair_reachability_on_demo() {
    let mut kripke = demo_kripke();
    let fairness = [StateSet::from([2])];
    // every state has a fair path (all reach the q-loop)
    let result = model_check_formula(&mut kripke, "EG true", &fairness).unwrap();
    assert_eq!(result, StateSet::from([0, 1, 2]));

    // `EF p` on fair paths: p lies on a fair path from 0 and from 1
    let mut kripke = demo_kripke();
    let result = model_check_formula(&mut kripke, "EF p", &fairness).unwrap();
    assert_eq!(result, StateSet::from([0, 1]));
}

#[test]
/// Under the constraint {0} on the demo structure, only the self-loop on 0 is
/// fair, so fair paths never see q.
fn fairness_can_exclude_states() {
    let mut kripke = demo_kripke();
    let fairness = [StateSet::from([0])];
    let result = model_check_formula(&mut kripke, "EG true", &fairness).unwrap();
    assert_eq!(result, StateSet::from([0]));

    let mut kripke = demo_kripke();
    let result = model_check_formula(&mut kripke, "EF q", &fairness).unwrap();
    assert_eq!(result, StateSet::new());
}

#[test]
/// The fair proposition is internal: checking twice on the same structure
/// picks a fresh name and still produces the same result.
fn repeated_checks_stay_consistent() {
    let mut kripke = demo_kripke();
    let fairness = [StateSet::from([2])];
    let first = model_check_formula(&mut kripke, "EG true", &fairness).unwrap();
    let second = model_check_formula(&mut kripke, "EG true", &fairness).unwrap();
    assert_eq!(first, second);
    assert!(kripke.alphabet().contains("fair"));
    assert!(kripke.alphabet().contains("fair0"));
}
