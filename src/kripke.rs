//! Kripke structures: a directed transition graph together with a set of
//! initial states and a labelling of states with atomic propositions.
//! Also hosts the fair-state computation used by model checking under
//! fairness constraints.

use crate::errors::CheckError;
use crate::graph::digraph::DiGraph;
use crate::graph::scc::{compute_sccs, is_nontrivial_scc};
use crate::graph::{State, StateSet};

use std::collections::{BTreeMap, BTreeSet};

/// Mapping from each state to the set of atomic propositions holding there.
pub type LabellingFunction = BTreeMap<State, BTreeSet<String>>;

/// A finite Kripke structure.
///
/// Invariants maintained by construction:
///  - the initial states are a subset of the state space;
///  - every state has a labelling entry (possibly empty).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Kripke {
    graph: DiGraph,
    initial_states: StateSet,
    labels: LabellingFunction,
}

impl Kripke {
    /// Build a Kripke structure from its four components. States mentioned
    /// only by a transition are added to the state space; labelling entries
    /// for missing states default to the empty set.
    pub fn new<S, T>(
        states: S,
        initial_states: StateSet,
        transitions: T,
        labels: LabellingFunction,
    ) -> Result<Kripke, CheckError>
    where
        S: IntoIterator<Item = State>,
        T: IntoIterator<Item = (State, State)>,
    {
        let graph = DiGraph::new(states, transitions);
        for &s in &initial_states {
            if !graph.contains_node(s) {
                return Err(CheckError::InvariantViolation(format!(
                    "initial state `{s}` is not part of the state space"
                )));
            }
        }
        let mut kripke = Kripke {
            graph,
            initial_states,
            labels,
        };
        kripke.complete_labelling();
        Ok(kripke)
    }

    /// Restrict the labelling to known states and fill missing entries with
    /// the empty set, so that its domain equals the state space.
    fn complete_labelling(&mut self) {
        let mut labels = LabellingFunction::new();
        for s in self.graph.nodes() {
            labels.insert(s, self.labels.remove(&s).unwrap_or_default());
        }
        self.labels = labels;
    }

    /// Iterate over all states in ascending order.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.graph.nodes()
    }

    /// All states collected into a set.
    pub fn state_set(&self) -> StateSet {
        self.graph.nodes().collect()
    }

    pub fn initial_states(&self) -> &StateSet {
        &self.initial_states
    }

    /// All transitions as `(source, destination)` pairs.
    pub fn transitions(&self) -> Vec<(State, State)> {
        self.graph.edges()
    }

    /// Direct successors of `state`.
    pub fn next(&self, state: State) -> Result<&StateSet, CheckError> {
        self.graph.next(state)
    }

    /// The underlying transition graph.
    pub fn graph(&self) -> &DiGraph {
        &self.graph
    }

    /// Atomic propositions holding at `state`.
    pub fn labels(&self, state: State) -> Result<&BTreeSet<String>, CheckError> {
        // every known state has an entry, see `complete_labelling`
        self.labels.get(&state).ok_or(CheckError::NodeMissing(state))
    }

    /// The union of all state labels, i.e. the alphabet of atomic
    /// propositions currently in use.
    pub fn alphabet(&self) -> BTreeSet<String> {
        let mut alphabet = BTreeSet::new();
        for aps in self.labels.values() {
            alphabet.extend(aps.iter().cloned());
        }
        alphabet
    }

    /// Install a new labelling function, filling missing states with the
    /// empty set and dropping entries for unknown states. Returns the
    /// labelling that was replaced.
    pub fn replace_labelling_function(&mut self, labels: LabellingFunction) -> LabellingFunction {
        let old = std::mem::replace(&mut self.labels, labels);
        self.complete_labelling();
        old
    }

    /// The Kripke structure induced by `keep`: initial states and labelling
    /// are restricted accordingly.
    pub fn substructure(&self, keep: &StateSet) -> Kripke {
        let graph = self.graph.subgraph(keep);
        let initial_states = self
            .initial_states
            .iter()
            .copied()
            .filter(|s| graph.contains_node(*s))
            .collect();
        let labels = self
            .labels
            .iter()
            .filter(|(s, _)| graph.contains_node(**s))
            .map(|(s, aps)| (*s, aps.clone()))
            .collect();
        Kripke {
            graph,
            initial_states,
            labels,
        }
    }

    /// States from which some fair path starts: states that can reach a
    /// nontrivial SCC intersecting every constraint set of `fairness`.
    pub fn get_fair_states(&self, fairness: &[StateSet]) -> StateSet {
        let mut fair_seed = StateSet::new();
        for component in compute_sccs(&self.graph) {
            if self.is_a_fair_scc(&component, fairness) {
                fair_seed.extend(component.iter().copied());
            }
        }
        self.graph.reversed().reachable_from(&fair_seed)
    }

    /// A fair SCC can host an infinite run that visits every constraint set
    /// over and over: it must be nontrivial and intersect each set.
    fn is_a_fair_scc(&self, component: &StateSet, fairness: &[StateSet]) -> bool {
        if !is_nontrivial_scc(&self.graph, component) {
            return false;
        }
        fairness
            .iter()
            .all(|constraint| component.iter().any(|s| constraint.contains(s)))
    }

    /// Label every fair state with a fresh atomic proposition and return its
    /// name. Tries `"fair"` first, then `"fair0"`, `"fair1"`, ... until the
    /// name does not clash with the current alphabet.
    pub fn label_fair_states(&mut self, fairness: &[StateSet]) -> String {
        let alphabet = self.alphabet();
        let mut fair_label = "fair".to_string();
        let mut i = 0;
        while alphabet.contains(&fair_label) {
            fair_label = format!("fair{i}");
            i += 1;
        }

        for s in self.get_fair_states(fairness) {
            self.labels.entry(s).or_default().insert(fair_label.clone());
        }
        fair_label
    }
}

#[cfg(test)]
mod tests {
    use super::{Kripke, LabellingFunction};
    use crate::errors::CheckError;
    use crate::graph::StateSet;

    use std::collections::BTreeSet;

    /// The three-state demo structure: `0 -> 0, 0 -> 1, 1 -> 2, 2 -> 2` with
    /// `p` at state 1 and `q` at state 2.
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
    fn construction_completes_the_labelling() {
        let kripke = demo_kripke();
        assert_eq!(kripke.states().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(kripke.labels(0).unwrap(), &BTreeSet::new());
        assert_eq!(kripke.labels(1).unwrap(), &BTreeSet::from(["p".to_string()]));
        assert_eq!(kripke.labels(5), Err(CheckError::NodeMissing(5)));
        assert_eq!(
            kripke.alphabet(),
            BTreeSet::from(["p".to_string(), "q".to_string()])
        );
    }

    #[test]
    fn initial_states_must_exist() {
        let result = Kripke::new(
            [0, 1],
            StateSet::from([7]),
            [(0, 1)],
            LabellingFunction::new(),
        );
        assert!(matches!(result, Err(CheckError::InvariantViolation(_))));
    }

    #[test]
    fn next_delegates_to_the_graph() {
        let kripke = demo_kripke();
        assert_eq!(kripke.next(0).unwrap(), &StateSet::from([0, 1]));
        assert_eq!(kripke.next(9), Err(CheckError::NodeMissing(9)));
    }

    #[test]
    fn replace_labelling_returns_the_old_one() {
        let mut kripke = demo_kripke();
        let fresh = LabellingFunction::from([(0, BTreeSet::from(["r".to_string()]))]);
        let old = kripke.replace_labelling_function(fresh);
        assert_eq!(old[&1], BTreeSet::from(["p".to_string()]));
        assert_eq!(kripke.labels(0).unwrap(), &BTreeSet::from(["r".to_string()]));
        // missing entries are filled with the empty set again
        assert_eq!(kripke.labels(2).unwrap(), &BTreeSet::new());
    }

    #[test]
    fn substructure_restricts_everything() {
        let kripke = demo_kripke();
        let sub = kripke.substructure(&StateSet::from([0, 1]));
        assert_eq!(sub.states().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(sub.transitions(), vec![(0, 0), (0, 1)]);
        assert_eq!(sub.initial_states(), &StateSet::from([0]));
        assert_eq!(sub.labels(1).unwrap(), &BTreeSet::from(["p".to_string()]));
    }

    #[test]
    fn fair_states_reach_a_fair_scc() {
        let kripke = demo_kripke();
        // the self-loop SCC {2} contains q-state 2, and everything reaches it
        let fair = kripke.get_fair_states(&[StateSet::from([2])]);
        assert_eq!(fair, StateSet::from([0, 1, 2]));

        // {0} only intersects the self-loop SCC {0}, so only 0 is fair
        let fair = kripke.get_fair_states(&[StateSet::from([0])]);
        assert_eq!(fair, StateSet::from([0]));

        // state 1 lies in a trivial SCC, so no fair SCC intersects {1}
        let fair = kripke.get_fair_states(&[StateSet::from([1])]);
        assert_eq!(fair, StateSet::new());
    }

    #[test]
    fn adding_constraints_only_shrinks_the_fair_set() {
        let kripke = demo_kripke();
        let one = kripke.get_fair_states(&[StateSet::from([2])]);
        let two = kripke.get_fair_states(&[StateSet::from([2]), StateSet::from([0])]);
        assert!(two.is_subset(&one));
        assert_eq!(two, StateSet::new());
    }

    #[test]
    fn fair_label_is_fresh() {
        let mut kripke = demo_kripke();
        assert_eq!(kripke.label_fair_states(&[StateSet::from([2])]), "fair");
        assert!(kripke.labels(0).unwrap().contains("fair"));

        // "fair" is now taken, the next call must pick a fresh name
        assert_eq!(kripke.label_fair_states(&[StateSet::from([2])]), "fair0");
        assert_eq!(kripke.label_fair_states(&[StateSet::from([2])]), "fair1");
    }
}
