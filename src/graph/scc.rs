//! Strongly connected components via an iterative Tarjan traversal.

use crate::graph::digraph::DiGraph;
use crate::graph::{State, StateSet};

use std::collections::BTreeMap;

/// One frame of the explicit DFS stack: a node together with its successor
/// list and a cursor into it. A frame whose cursor reached the end is in its
/// post-order finalisation step.
struct Frame {
    node: State,
    successors: Vec<State>,
    next_child: usize,
}

impl Frame {
    fn new(node: State, graph: &DiGraph) -> Frame {
        let successors = graph
            .next(node)
            .map(|succ| succ.iter().copied().collect())
            .unwrap_or_default();
        Frame {
            node,
            successors,
            next_child: 0,
        }
    }
}

/// Partition the nodes of `graph` into strongly connected components.
///
/// Components are emitted in reverse topological order of the condensation: a
/// component appears before every component that can reach it. The traversal
/// keeps an explicit work stack instead of recursing, so deep graphs cannot
/// overflow the call stack.
pub fn compute_sccs(graph: &DiGraph) -> Vec<StateSet> {
    let mut discovery: BTreeMap<State, usize> = BTreeMap::new();
    let mut lowlink: BTreeMap<State, usize> = BTreeMap::new();
    let mut on_stack = StateSet::new();
    let mut scc_stack: Vec<State> = Vec::new();
    let mut components: Vec<StateSet> = Vec::new();
    let mut time = 0;

    for root in graph.nodes() {
        if discovery.contains_key(&root) {
            continue;
        }

        let mut work = vec![Frame::new(root, graph)];
        discovery.insert(root, time);
        lowlink.insert(root, time);
        time += 1;
        scc_stack.push(root);
        on_stack.insert(root);

        while let Some(frame) = work.last_mut() {
            let v = frame.node;
            if let Some(&w) = frame.successors.get(frame.next_child) {
                frame.next_child += 1;
                if !discovery.contains_key(&w) {
                    // descend into an undiscovered child
                    discovery.insert(w, time);
                    lowlink.insert(w, time);
                    time += 1;
                    scc_stack.push(w);
                    on_stack.insert(w);
                    work.push(Frame::new(w, graph));
                } else if on_stack.contains(&w) {
                    let low = lowlink[&v].min(discovery[&w]);
                    lowlink.insert(v, low);
                }
            } else {
                // post-order finalisation of `v`
                work.pop();
                if let Some(parent) = work.last() {
                    let low = lowlink[&parent.node].min(lowlink[&v]);
                    lowlink.insert(parent.node, low);
                }
                if lowlink[&v] == discovery[&v] {
                    let mut component = StateSet::new();
                    while let Some(w) = scc_stack.pop() {
                        on_stack.remove(&w);
                        component.insert(w);
                        if w == v {
                            break;
                        }
                    }
                    components.push(component);
                }
            }
        }
    }

    components
}

/// An SCC is nontrivial iff it has at least two states, or its single state
/// carries a self-loop in `graph`. Only nontrivial components can host an
/// infinite path that stays inside the component.
pub fn is_nontrivial_scc(graph: &DiGraph, component: &StateSet) -> bool {
    if component.len() >= 2 {
        return true;
    }
    match component.iter().next() {
        Some(&v) => graph.next(v).map(|succ| succ.contains(&v)).unwrap_or(false),
        None => false,
    }
}
