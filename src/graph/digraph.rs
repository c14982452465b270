//! A minimal directed graph with the operations the model checker builds on:
//! successor lookup, induced subgraphs, edge reversal, and reachability.

use crate::errors::CheckError;
use crate::graph::{State, StateSet};

use std::collections::BTreeMap;

/// Directed graph over integer nodes, stored as a successor map.
///
/// Every node mentioned as an endpoint of an edge is present as a key of the
/// map. Successor collections are sets, so parallel edges cannot be
/// represented; self-loops can.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiGraph {
    successors: BTreeMap<State, StateSet>,
}

impl DiGraph {
    /// Create a graph from a node collection and an edge list.
    ///
    /// Nodes missing from `nodes` but mentioned by an edge are created on the
    /// fly; repeated edges collapse into one.
    pub fn new<N, E>(nodes: N, edges: E) -> DiGraph
    where
        N: IntoIterator<Item = State>,
        E: IntoIterator<Item = (State, State)>,
    {
        let mut graph = DiGraph::default();
        for v in nodes {
            graph.successors.entry(v).or_default();
        }
        for (src, dst) in edges {
            graph.successors.entry(src).or_default().insert(dst);
            graph.successors.entry(dst).or_default();
        }
        graph
    }

    /// Insert a fresh node with no edges.
    pub fn add_node(&mut self, v: State) -> Result<(), CheckError> {
        if self.successors.contains_key(&v) {
            return Err(CheckError::DuplicateNode(v));
        }
        self.successors.insert(v, StateSet::new());
        Ok(())
    }

    /// Insert an edge, creating missing endpoints on the fly.
    pub fn add_edge(&mut self, src: State, dst: State) -> Result<(), CheckError> {
        if let Some(succ) = self.successors.get(&src) {
            if succ.contains(&dst) {
                return Err(CheckError::DuplicateEdge(src, dst));
            }
        }
        self.successors.entry(src).or_default().insert(dst);
        self.successors.entry(dst).or_default();
        Ok(())
    }

    pub fn contains_node(&self, v: State) -> bool {
        self.successors.contains_key(&v)
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    /// Iterate over all nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = State> + '_ {
        self.successors.keys().copied()
    }

    /// Collect all edges as `(source, destination)` pairs.
    pub fn edges(&self) -> Vec<(State, State)> {
        self.successors
            .iter()
            .flat_map(|(&src, succ)| succ.iter().map(move |&dst| (src, dst)))
            .collect()
    }

    /// Direct successors of `src`.
    pub fn next(&self, src: State) -> Result<&StateSet, CheckError> {
        self.successors.get(&src).ok_or(CheckError::NodeMissing(src))
    }

    /// The subgraph induced by `keep`: nodes in the intersection of `keep`
    /// with the current node set, and exactly the edges between them.
    pub fn subgraph(&self, keep: &StateSet) -> DiGraph {
        let mut restricted = DiGraph::default();
        for (&src, succ) in &self.successors {
            if !keep.contains(&src) {
                continue;
            }
            let entry = restricted.successors.entry(src).or_default();
            entry.extend(succ.iter().copied().filter(|dst| keep.contains(dst)));
        }
        restricted
    }

    /// A new graph with every edge direction flipped; the node set is preserved.
    pub fn reversed(&self) -> DiGraph {
        let mut reversed = DiGraph::default();
        for (&src, succ) in &self.successors {
            reversed.successors.entry(src).or_default();
            for &dst in succ {
                reversed.successors.entry(dst).or_default().insert(src);
            }
        }
        reversed
    }

    /// Forward reachability from `seeds`. The result always contains the
    /// seeds themselves, including seeds that are not nodes of the graph
    /// (those contribute no successors).
    pub fn reachable_from(&self, seeds: &StateSet) -> StateSet {
        let mut reached = seeds.clone();
        let mut queue: Vec<State> = seeds.iter().copied().collect();
        while let Some(v) = queue.pop() {
            let Some(succ) = self.successors.get(&v) else {
                continue;
            };
            for &dst in succ {
                if reached.insert(dst) {
                    queue.push(dst);
                }
            }
        }
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::DiGraph;
    use crate::errors::CheckError;
    use crate::graph::StateSet;

    fn diamond() -> DiGraph {
        // 0 -> {1, 2} -> 3, plus a self-loop on 3
        DiGraph::new([0, 1, 2, 3], [(0, 1), (0, 2), (1, 3), (2, 3), (3, 3)])
    }

    #[test]
    fn build_and_query() {
        let graph = diamond();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(graph.next(0).unwrap(), &StateSet::from([1, 2]));
        assert_eq!(graph.next(3).unwrap(), &StateSet::from([3]));
        assert_eq!(graph.next(7), Err(CheckError::NodeMissing(7)));
        assert_eq!(graph.edges(), vec![(0, 1), (0, 2), (1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn endpoints_are_created_on_the_fly() {
        let graph = DiGraph::new([], [(4, 5)]);
        assert!(graph.contains_node(4));
        assert!(graph.contains_node(5));
        assert!(graph.next(5).unwrap().is_empty());
    }

    #[test]
    fn duplicate_node_and_edge_are_rejected() {
        let mut graph = diamond();
        assert_eq!(graph.add_node(0), Err(CheckError::DuplicateNode(0)));
        assert_eq!(graph.add_edge(0, 1), Err(CheckError::DuplicateEdge(0, 1)));
        // a fresh edge between existing nodes is fine
        assert_eq!(graph.add_edge(1, 2), Ok(()));
        assert_eq!(graph.add_node(9), Ok(()));
    }

    #[test]
    fn subgraph_keeps_only_internal_edges() {
        let graph = diamond();
        let restricted = graph.subgraph(&StateSet::from([0, 1, 3, 9]));
        assert_eq!(restricted.nodes().collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(restricted.edges(), vec![(0, 1), (1, 3), (3, 3)]);
    }

    #[test]
    fn reversed_flips_every_edge() {
        let reversed = diamond().reversed();
        assert_eq!(reversed.nodes().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(reversed.edges(), vec![(1, 0), (2, 0), (3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn reachability_contains_the_seeds() {
        let graph = diamond();
        assert_eq!(
            graph.reachable_from(&StateSet::from([0])),
            StateSet::from([0, 1, 2, 3])
        );
        assert_eq!(
            graph.reachable_from(&StateSet::from([1])),
            StateSet::from([1, 3])
        );
        // seeds outside the graph stay in the result
        assert_eq!(
            graph.reachable_from(&StateSet::from([42])),
            StateSet::from([42])
        );
    }
}
