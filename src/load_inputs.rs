//! Contains wrappers for loading the inputs (Kripke model, formulae, and
//! fairness constraints) from files.
//!
//! The model format is plain text, one `key: value` section per line:
//!
//! ```text
//! # three states, two of them labelled
//! states: 0 1 2
//! init: 0
//! transitions: 0 -> 0, 0 -> 1, 1 -> 2, 2 -> 2
//! labels: 1: p, 2: q
//! ```
//!
//! Sections may repeat and accumulate; lines starting with `#` are comments.

use crate::graph::{State, StateSet};
use crate::kripke::{Kripke, LabellingFunction};

use std::fs::read_to_string;

/// Load and parse the Kripke model from the specified file.
/// Return error if the model is invalid.
pub fn load_and_parse_model(model_path: &str) -> Result<Kripke, String> {
    let model_string = read_to_string(model_path).map_err(|e| e.to_string())?;
    parse_model(model_string.as_str())
}

/// Parse a Kripke model from its textual representation.
pub fn parse_model(model_string: &str) -> Result<Kripke, String> {
    let mut states = StateSet::new();
    let mut initial_states = StateSet::new();
    let mut transitions: Vec<(State, State)> = Vec::new();
    let mut labels = LabellingFunction::new();

    for line in model_string.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, rest) = line
            .split_once(':')
            .ok_or(format!("Missing `:` in line `{line}`."))?;
        match key.trim() {
            "states" => {
                for token in rest.split_whitespace() {
                    states.insert(parse_state(token)?);
                }
            }
            "init" => {
                for token in rest.split_whitespace() {
                    initial_states.insert(parse_state(token)?);
                }
            }
            "transitions" => {
                for entry in rest.split(',') {
                    let entry = entry.trim();
                    if entry.is_empty() {
                        continue;
                    }
                    let (src, dst) = entry
                        .split_once("->")
                        .ok_or(format!("Missing `->` in transition `{entry}`."))?;
                    transitions.push((parse_state(src.trim())?, parse_state(dst.trim())?));
                }
            }
            "labels" => {
                for entry in rest.split(',') {
                    let entry = entry.trim();
                    if entry.is_empty() {
                        continue;
                    }
                    let (state, props) = entry
                        .split_once(':')
                        .ok_or(format!("Missing `:` in labelling entry `{entry}`."))?;
                    let state = parse_state(state.trim())?;
                    let entry_labels = labels.entry(state).or_default();
                    for prop in props.split_whitespace() {
                        entry_labels.insert(prop.to_string());
                    }
                }
            }
            other => return Err(format!("Unexpected section `{other}`.")),
        }
    }

    Kripke::new(states, initial_states, transitions, labels).map_err(|e| e.to_string())
}

/// Read the formulae from the specified file, one formula per line.
/// Ignore lines starting with `#` (comments). The syntax of these formulae is
/// checked later during parsing.
pub fn load_formulae(formulae_path: &str) -> Result<Vec<String>, String> {
    let formulae_string = read_to_string(formulae_path).map_err(|e| e.to_string())?;
    let mut formulae: Vec<String> = Vec::new();
    for line in formulae_string.lines() {
        let trimmed_line = line.trim();
        if !trimmed_line.is_empty() && !trimmed_line.starts_with('#') {
            formulae.push(trimmed_line.to_string());
        }
    }
    Ok(formulae)
}

/// Load fairness constraints from the specified file: one constraint set per
/// line, whitespace-separated state ids, `#` comments ignored.
pub fn load_fairness_constraints(fairness_path: &str) -> Result<Vec<StateSet>, String> {
    let fairness_string = read_to_string(fairness_path).map_err(|e| e.to_string())?;
    parse_fairness_constraints(fairness_string.as_str())
}

/// Parse fairness constraints from their textual representation.
pub fn parse_fairness_constraints(fairness_string: &str) -> Result<Vec<StateSet>, String> {
    let mut constraints = Vec::new();
    for line in fairness_string.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut constraint = StateSet::new();
        for token in line.split_whitespace() {
            constraint.insert(parse_state(token)?);
        }
        constraints.push(constraint);
    }
    Ok(constraints)
}

fn parse_state(token: &str) -> Result<State, String> {
    token
        .parse::<State>()
        .map_err(|_| format!("Invalid state id `{token}`."))
}

#[cfg(test)]
mod tests {
    use crate::graph::StateSet;
    use crate::load_inputs::{parse_fairness_constraints, parse_model};

    use std::collections::BTreeSet;

    #[test]
    fn parse_valid_model() {
        let model = r"
            # three states, two of them labelled
            states: 0 1 2
            init: 0
            transitions: 0 -> 0, 0 -> 1, 1 -> 2, 2 -> 2
            labels: 1: p, 2: q
        ";
        let kripke = parse_model(model).unwrap();
        assert_eq!(kripke.states().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(kripke.initial_states(), &StateSet::from([0]));
        assert_eq!(
            kripke.transitions(),
            vec![(0, 0), (0, 1), (1, 2), (2, 2)]
        );
        assert_eq!(kripke.labels(1).unwrap(), &BTreeSet::from(["p".to_string()]));
        assert_eq!(kripke.labels(0).unwrap(), &BTreeSet::new());
    }

    #[test]
    fn sections_accumulate_and_repeat() {
        let model = r"
            states: 0 1
            transitions: 0 -> 1
            transitions: 1 -> 0
            labels: 0: p q
            labels: 0: r
        ";
        let kripke = parse_model(model).unwrap();
        assert_eq!(kripke.transitions(), vec![(0, 1), (1, 0)]);
        assert_eq!(
            kripke.labels(0).unwrap(),
            &BTreeSet::from(["p".to_string(), "q".to_string(), "r".to_string()])
        );
    }

    #[test]
    fn parse_invalid_models() {
        let invalid_models = vec![
            "states 0 1",              // missing colon
            "states: zero",            // not a state id
            "transitions: 0 - 1",      // malformed arrow
            "labels: 0 p",             // missing inner colon
            "unknown: 1 2",            // unexpected section
            "states: 0\ninit: 5",      // initial state outside the state space
        ];
        for model in invalid_models {
            assert!(parse_model(model).is_err(), "accepted: {model}");
        }
    }

    #[test]
    fn parse_fairness_sets() {
        let fairness = r"
            # one set per line
            0 1
            2
        ";
        let constraints = parse_fairness_constraints(fairness).unwrap();
        assert_eq!(
            constraints,
            vec![StateSet::from([0, 1]), StateSet::from([2])]
        );
        assert!(parse_fairness_constraints("0 x").is_err());
    }
}
