//!
//! Dijkstra algorithm with node potentials
//!
//! For a potential `h` such that every usable edge `(v, w)` has
//! non-negative reduced weight `c(v,w) + h(v) - h(w) >= 0`,
//! dijkstra on the reduced weights finds the shortest paths
//! even if the original weights are negative.
//!
use super::bellman_ford::ShortestPaths;
use super::IntWeight;
use crate::common::Cost;
use crate::error::{AssignmentError, Result};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::BinaryHeap;

//
// Internal node with distance, for min-heap
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeWithDist(Cost, NodeIndex);

// reverse order
impl Ord for NodeWithDist {
    fn cmp(&self, other: &NodeWithDist) -> std::cmp::Ordering {
        other.0.cmp(&self.0).then_with(|| other.1.cmp(&self.1))
    }
}

impl PartialOrd for NodeWithDist {
    fn partial_cmp(&self, other: &NodeWithDist) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

///
/// Node potential `h(v)`
///
#[derive(Clone, Debug, PartialEq)]
pub struct Potential(pub Vec<Cost>);

impl Potential {
    ///
    /// All-zero potential, valid when all edge weights are non-negative.
    ///
    pub fn zero(n_nodes: usize) -> Self {
        Potential(vec![0; n_nodes])
    }
    pub fn get(&self, node: NodeIndex) -> Cost {
        self.0[node.index()]
    }
    ///
    /// Reduced weight `c(v,w) + h(v) - h(w)` of a edge
    ///
    pub fn reduced_weight(&self, weight: Cost, v: NodeIndex, w: NodeIndex) -> Cost {
        weight + self.get(v) - self.get(w)
    }
    ///
    /// Update the potential by the shortest paths found with it,
    /// so that it stays valid after augmenting along a shortest path.
    ///
    /// Reachable nodes get their distance, and unreachable nodes are shifted
    /// by the maximum reduced distance.
    ///
    /// Fails with `NumericOverflow` if a shifted potential overflows.
    ///
    pub fn update(&mut self, sp: &ShortestPaths) -> Result<()> {
        let max_reduced = self
            .0
            .iter()
            .zip(sp.dists.iter())
            .filter_map(|(&h, d)| d.map(|d| d - h))
            .max()
            .unwrap_or(0);
        for (h, d) in self.0.iter_mut().zip(sp.dists.iter()) {
            *h = match d {
                Some(d) => *d,
                None => h.checked_add(max_reduced).ok_or_else(|| {
                    AssignmentError::NumericOverflow(format!(
                        "potential {} + {} overflows",
                        h, max_reduced
                    ))
                })?,
            };
        }
        Ok(())
    }
}

///
/// Shortest paths from `source` by dijkstra on the reduced weights.
///
/// The returned distances are in the original weights.
/// The potential of `source` is assumed to be zero.
///
pub fn dijkstra_with_potential<N, E: IntWeight>(
    graph: &DiGraph<N, E>,
    source: NodeIndex,
    potential: &Potential,
) -> ShortestPaths {
    let n = graph.node_count();
    // distances in reduced weights
    let mut reduced: Vec<Option<Cost>> = vec![None; n];
    let mut preds: Vec<Option<EdgeIndex>> = vec![None; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();

    reduced[source.index()] = Some(0);
    heap.push(NodeWithDist(0, source));

    while let Some(NodeWithDist(d, v)) = heap.pop() {
        if done[v.index()] {
            continue;
        }
        done[v.index()] = true;

        for edge in graph.edges_directed(v, Direction::Outgoing) {
            let ew = edge.weight();
            if !ew.is_usable() {
                continue;
            }
            let w = edge.target();
            let c = potential.reduced_weight(ew.int_weight(), v, w);
            assert!(c >= 0, "negative reduced weight {} on {:?}", c, edge.id());
            let dw = d + c;
            if !done[w.index()] && reduced[w.index()].map_or(true, |x| dw < x) {
                reduced[w.index()] = Some(dw);
                preds[w.index()] = Some(edge.id());
                heap.push(NodeWithDist(dw, w));
            }
        }
    }

    let dists = reduced
        .iter()
        .enumerate()
        .map(|(i, d)| d.map(|d| d + potential.0[i] - potential.get(source)))
        .collect();
    ShortestPaths { dists, preds }
}
