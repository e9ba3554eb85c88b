//!
//! Bellman-Ford algorithm on integer weighted graph
//!
//! Edge weights can be negative.
//!
use super::IntWeight;
use crate::common::Cost;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

///
/// Single source shortest paths and backtracking information
///
#[derive(Clone, Debug)]
pub struct ShortestPaths {
    ///
    /// `dists[v]` is the weight of the shortest path from source to `v`
    /// (`None` if `v` is unreachable)
    ///
    pub dists: Vec<Option<Cost>>,
    ///
    /// `preds[v]` is the last edge of the shortest path to `v`
    ///
    pub preds: Vec<Option<EdgeIndex>>,
}

impl ShortestPaths {
    pub fn dist(&self, node: NodeIndex) -> Option<Cost> {
        self.dists[node.index()]
    }
    pub fn is_reachable(&self, node: NodeIndex) -> bool {
        self.dists[node.index()].is_some()
    }
    ///
    /// Backtrack the shortest path from source to `target` as a list of edges.
    ///
    pub fn path_to<N, E>(&self, graph: &DiGraph<N, E>, target: NodeIndex) -> Option<Vec<EdgeIndex>> {
        self.dist(target)?;
        let mut edges = Vec::new();
        let mut v = target;
        while let Some(e) = self.preds[v.index()] {
            edges.push(e);
            v = graph.edge_endpoints(e)?.0;
            // the predecessor chain of a shortest path tree is acyclic
            assert!(edges.len() <= graph.node_count(), "predecessor cycle");
        }
        edges.reverse();
        Some(edges)
    }
}

/// A cycle of negative total weight, as a list of edges.
#[derive(Clone, Debug, PartialEq)]
pub struct NegativeCycle(pub Vec<EdgeIndex>);

///
/// Relax all usable edges once. Returns the last relaxed node.
///
fn relax_all<N, E: IntWeight>(
    graph: &DiGraph<N, E>,
    dists: &mut [Option<Cost>],
    preds: &mut [Option<EdgeIndex>],
) -> Option<NodeIndex> {
    let mut relaxed = None;
    for edge in graph.edge_references() {
        if !edge.weight().is_usable() {
            continue;
        }
        let (v, w) = (edge.source().index(), edge.target().index());
        if let Some(dv) = dists[v] {
            let d = dv + edge.weight().int_weight();
            if dists[w].map_or(true, |dw| d < dw) {
                dists[w] = Some(d);
                preds[w] = Some(edge.id());
                relaxed = Some(edge.target());
            }
        }
    }
    relaxed
}

///
/// Backtrack `preds` from a node on (or leading to) a cycle
/// and return the cycle as a list of edges in the forward order.
///
fn backtrack_cycle<N, E>(
    graph: &DiGraph<N, E>,
    preds: &[Option<EdgeIndex>],
    node: NodeIndex,
) -> Option<Vec<EdgeIndex>> {
    // go back |V| times to be surely on the cycle
    let mut v = node;
    for _ in 0..graph.node_count() {
        let e = preds[v.index()]?;
        v = graph.edge_endpoints(e)?.0;
    }

    let start = v;
    let mut edges = Vec::new();
    loop {
        let e = preds[v.index()]?;
        edges.push(e);
        v = graph.edge_endpoints(e)?.0;
        if v == start {
            break;
        }
    }
    edges.reverse();
    Some(edges)
}

///
/// Shortest paths from `source` to all nodes.
///
/// If a negative cycle reachable from `source` exists, it is returned as an error.
///
pub fn bellman_ford<N, E: IntWeight>(
    graph: &DiGraph<N, E>,
    source: NodeIndex,
) -> Result<ShortestPaths, NegativeCycle> {
    let n = graph.node_count();
    let mut dists = vec![None; n];
    let mut preds = vec![None; n];
    dists[source.index()] = Some(0);

    // a shortest path has at most |V|-1 edges
    for _ in 1..n {
        if relax_all(graph, &mut dists, &mut preds).is_none() {
            return Ok(ShortestPaths { dists, preds });
        }
    }

    match relax_all(graph, &mut dists, &mut preds) {
        None => Ok(ShortestPaths { dists, preds }),
        Some(node) => {
            let cycle = backtrack_cycle(graph, &preds, node)
                .unwrap_or_else(|| panic!("cannot backtrack negative cycle from {:?}", node));
            Err(NegativeCycle(cycle))
        }
    }
}

///
/// Find a negative cycle anywhere in the graph.
///
/// It is equivalent to bellman-ford from a virtual node
/// connected to every node with zero-weight edges.
///
pub fn find_negative_cycle<N, E: IntWeight>(graph: &DiGraph<N, E>) -> Option<NegativeCycle> {
    let n = graph.node_count();
    let mut dists = vec![Some(0); n];
    let mut preds = vec![None; n];

    let mut last = None;
    for _ in 0..n {
        last = relax_all(graph, &mut dists, &mut preds);
        if last.is_none() {
            return None;
        }
    }

    last.and_then(|node| backtrack_cycle(graph, &preds, node))
        .map(NegativeCycle)
}

#[cfg(test)]
mod tests {
    use super::super::{is_path_between, total_weight};
    use super::*;
    use crate::common::{ei, ni};

    #[test]
    fn bellman_ford_negative_edges() {
        let mut g: DiGraph<(), Cost> = DiGraph::new();
        g.extend_with_edges(&[(0, 1, 4), (0, 2, 5), (2, 1, -3), (1, 3, 2), (2, 3, 10)]);
        let sp = bellman_ford(&g, ni(0)).unwrap();
        assert_eq!(sp.dist(ni(1)), Some(2));
        assert_eq!(sp.dist(ni(3)), Some(4));
        let p = sp.path_to(&g, ni(3)).unwrap();
        assert_eq!(p, vec![ei(1), ei(2), ei(3)]);
        assert!(is_path_between(&g, &p, ni(0), ni(3)));
        assert_eq!(total_weight(&g, &p), 4);
        assert_eq!(sp.path_to(&g, ni(0)), Some(vec![]));
    }

    #[test]
    fn bellman_ford_unreachable() {
        let mut g: DiGraph<(), Cost> = DiGraph::new();
        g.extend_with_edges(&[(0, 1, 1), (2, 1, 1)]);
        let sp = bellman_ford(&g, ni(0)).unwrap();
        assert!(sp.is_reachable(ni(1)));
        assert!(!sp.is_reachable(ni(2)));
        assert_eq!(sp.path_to(&g, ni(2)), None);
    }

    #[test]
    fn bellman_ford_detects_negative_cycle() {
        let mut g: DiGraph<(), Cost> = DiGraph::new();
        g.extend_with_edges(&[(0, 1, 1), (1, 2, -10), (2, 1, 9), (2, 3, 1)]);
        let cycle = bellman_ford(&g, ni(0)).unwrap_err();
        assert_eq!(cycle.0.len(), 2);
        assert!(total_weight(&g, &cycle.0) < 0);
        assert!(cycle.0.contains(&ei(1)));
        assert!(cycle.0.contains(&ei(2)));
    }

    #[test]
    fn negative_cycle_in_whole_graph() {
        let mut g: DiGraph<(), Cost> = DiGraph::new();
        g.extend_with_edges(&[(0, 1, 10), (1, 0, -1), (2, 2, -1)]);
        let cycle = find_negative_cycle(&g).unwrap();
        assert_eq!(cycle, NegativeCycle(vec![ei(2)]));

        let mut g: DiGraph<(), Cost> = DiGraph::new();
        g.extend_with_edges(&[(0, 1, 10), (1, 0, -1), (1, 2, -5)]);
        assert_eq!(find_negative_cycle(&g), None);
    }

    #[test]
    fn negative_cycle_unreachable_from_zero() {
        // cycle 2 -> 3 -> 4 -> 2 is not reachable from node 0
        let mut g: DiGraph<(), Cost> = DiGraph::new();
        g.extend_with_edges(&[(0, 1, 1), (2, 3, 2), (3, 4, -1), (4, 2, -2)]);
        assert!(bellman_ford(&g, ni(0)).is_ok());
        let cycle = find_negative_cycle(&g).unwrap();
        assert_eq!(cycle.0.len(), 3);
        assert_eq!(total_weight(&g, &cycle.0), -1);
        let start = g.edge_endpoints(cycle.0[0]).unwrap().0;
        assert!(is_path_between(&g, &cycle.0, start, start));
    }
}
