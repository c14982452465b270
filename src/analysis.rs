//! Model-checking analysis from start to finish, with progress output and
//! result prints.

use crate::evaluation::algorithm::check_state_formula;
use crate::evaluation::Labelling;
use crate::graph::StateSet;
use crate::kripke::Kripke;
use crate::preprocessing::ctl_tree::CtlTreeNode;
use crate::preprocessing::parser::parse_ctl_formula;
use crate::result_print::*;

use std::time::SystemTime;

/// Perform the whole model-checking analysis for several (individual)
/// formulae. This comprises the complete process from parsing to summarizing
/// the results.
///
/// Print the selected amount of result info (no prints / summary / detailed
/// summary / exhaustive) for each formula.
pub fn analyse_formulae(
    kripke: &mut Kripke,
    formulae: Vec<String>,
    fairness: &[StateSet],
    print_opt: PrintOptions,
) -> Result<(), String> {
    let start = SystemTime::now();
    print_if_allowed(
        "============ INITIAL PHASE ============".to_string(),
        print_opt,
    );
    print_if_allowed(format!("Read {} CTL formulae.", formulae.len()), print_opt);
    print_if_allowed(
        format!(
            "Loaded Kripke structure with {} states and {} transitions.",
            kripke.state_set().len(),
            kripke.transitions().len()
        ),
        print_opt,
    );
    print_if_allowed("-----".to_string(), print_opt);

    // first parse all the formulae
    let mut parsed_trees = Vec::new();
    for (i, formula) in formulae.iter().enumerate() {
        let tree = parse_ctl_formula(formula.as_str())?;
        print_if_allowed(format!("Original formula n.{}: {formula}", i + 1), print_opt);
        print_if_allowed(format!("Parsed version:       {tree}"), print_opt);
        if !tree.is_state_formula() {
            return Err(format!("Formula `{formula}` is not a state formula."));
        }
        parsed_trees.push(tree);
    }
    print_if_allowed("-----".to_string(), print_opt);

    // with fairness constraints, label the fair states once for all formulae
    let fair_atom = if fairness.is_empty() {
        None
    } else {
        let fair_label = kripke.label_fair_states(fairness);
        print_if_allowed(
            format!("Labelled fair states with fresh proposition `{fair_label}`."),
            print_opt,
        );
        Some(CtlTreeNode::mk_proposition(&fair_label))
    };

    print_if_allowed(
        "============ EVALUATION PHASE ============".to_string(),
        print_opt,
    );

    // evaluate the formulae one by one, sharing the labelling map so that
    // common sub-formulae are only computed once
    let mut labelling = Labelling::new();
    for (tree, formula) in parsed_trees.into_iter().zip(formulae) {
        let eval_start = SystemTime::now();
        let checked = match &fair_atom {
            Some(atom) => {
                let rewritten = tree.get_equivalent_non_fair_formula(atom);
                print_if_allowed(format!("Fair-encoded version: {rewritten}"), print_opt);
                rewritten
            }
            None => tree,
        };
        check_state_formula(kripke, &checked, &mut labelling).map_err(|e| e.to_string())?;
        let results = labelling.get(checked.as_str()).cloned().unwrap_or_default();

        if print_opt != PrintOptions::NoPrint {
            println!("Formula: {formula}");
            if print_opt == PrintOptions::FullPrint {
                print_results_full(kripke, &results, eval_start, true);
            } else {
                summarize_results(kripke, &results, eval_start);
            }
        }
    }

    print_if_allowed(
        format!(
            "Total computation time: {}ms.",
            start.elapsed().unwrap().as_millis()
        ),
        print_opt,
    );
    Ok(())
}
