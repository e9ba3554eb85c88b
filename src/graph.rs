//!
//! Graph algorithms on petgraph `DiGraph` with integer edge weights
//!
//! * `bellman_ford`: shortest paths with negative edges, negative cycle detection
//! * `dijkstra`: shortest paths with node potentials (Johnson's reweighting)
//! * `bfs_path`: shortest path in the number of edges
//!
pub mod bellman_ford;
pub mod dijkstra;

use crate::common::Cost;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::VecDeque;

///
/// Edge with an integer weight.
///
/// Edges with `is_usable() == false` are regarded as absent,
/// so that an edge can be disabled without changing edge indices.
///
pub trait IntWeight {
    fn int_weight(&self) -> Cost;
    fn is_usable(&self) -> bool {
        true
    }
}

impl IntWeight for Cost {
    fn int_weight(&self) -> Cost {
        *self
    }
}

///
/// Calculate total weight of path (a list of edges)
///
pub fn total_weight<N, E: IntWeight>(graph: &DiGraph<N, E>, edges: &[EdgeIndex]) -> Cost {
    edges
        .iter()
        .map(|&e| graph[e].int_weight())
        .sum()
}

///
/// Convert a list of edges into a list of nodes visited.
///
/// `[e(a->b), e(b->c)]` into `[a, b, c]`
///
pub fn edge_list_to_node_list<N, E>(graph: &DiGraph<N, E>, edges: &[EdgeIndex]) -> Vec<NodeIndex> {
    let mut nodes = Vec::with_capacity(edges.len() + 1);
    for (i, &e) in edges.iter().enumerate() {
        let (v, w) = graph
            .edge_endpoints(e)
            .unwrap_or_else(|| panic!("edge {:?} is not in the graph", e));
        if i == 0 {
            nodes.push(v);
        }
        nodes.push(w);
    }
    nodes
}

///
/// Determine if the edges are connected one by one from `source` to `target`.
///
pub fn is_path_between<N, E>(
    graph: &DiGraph<N, E>,
    edges: &[EdgeIndex],
    source: NodeIndex,
    target: NodeIndex,
) -> bool {
    let mut v = source;
    for &e in edges {
        match graph.edge_endpoints(e) {
            Some((a, b)) if a == v => v = b,
            _ => return false,
        }
    }
    v == target
}

///
/// Find a path with the minimum number of usable edges by breadth first search.
///
pub fn bfs_path<N, E: IntWeight>(
    graph: &DiGraph<N, E>,
    source: NodeIndex,
    target: NodeIndex,
) -> Option<Vec<EdgeIndex>> {
    let mut preds: Vec<Option<EdgeIndex>> = vec![None; graph.node_count()];
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    visited[source.index()] = true;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        if v == target {
            break;
        }
        for edge in graph.edges_directed(v, Direction::Outgoing) {
            let w = edge.target();
            if edge.weight().is_usable() && !visited[w.index()] {
                visited[w.index()] = true;
                preds[w.index()] = Some(edge.id());
                queue.push_back(w);
            }
        }
    }

    if !visited[target.index()] {
        return None;
    }
    let mut edges = Vec::new();
    let mut v = target;
    while v != source {
        let e = preds[v.index()]?;
        edges.push(e);
        v = graph.edge_endpoints(e)?.0;
    }
    edges.reverse();
    Some(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ei, ni};

    #[test]
    fn bfs_path_simple() {
        let mut g: DiGraph<(), Cost> = DiGraph::new();
        g.extend_with_edges(&[(0, 1, 5), (1, 2, 5), (0, 2, 100), (2, 3, 1)]);
        let p = bfs_path(&g, ni(0), ni(3)).unwrap();
        assert_eq!(p, vec![ei(2), ei(3)]);
        assert_eq!(total_weight(&g, &p), 101);
        assert!(is_path_between(&g, &p, ni(0), ni(3)));
        assert_eq!(edge_list_to_node_list(&g, &p), vec![ni(0), ni(2), ni(3)]);

        assert_eq!(bfs_path(&g, ni(3), ni(0)), None);
        assert_eq!(bfs_path(&g, ni(1), ni(1)), Some(vec![]));
    }
}
