//! Residue graph related definitions
//! - ResidueEdge
//! - ResidueGraph
//!
//! The residue graph is built once per solve and updated in place.
//! Each edge `e` of the flow graph owns a pair of residue edges
//! at fixed indices, `2e` (Up, increases the flow of `e`) and
//! `2e+1` (Down, decreases the flow of `e`).
//! An edge with zero `count` is regarded as removed,
//! so edge indices never move while augmenting.
//!
use super::flow::{ConstCost, Flow, FlowEdge};
use crate::common::{ei, Cost, FlowRate};
use crate::graph::IntWeight;
use petgraph::graph::{DiGraph, EdgeIndex};

// basic definitions

/// Edge attributes used in ResidueGraph
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ResidueEdge {
    /// The movable amount of the flow
    pub count: FlowRate,
    /// Cost of the unit change of this flow
    pub weight: Cost,
}

impl ResidueEdge {
    pub fn new(count: FlowRate, weight: Cost) -> ResidueEdge {
        ResidueEdge { count, weight }
    }
}

impl IntWeight for ResidueEdge {
    fn int_weight(&self) -> Cost {
        self.weight
    }
    fn is_usable(&self) -> bool {
        self.count > 0
    }
}

/// ResidueGraph definition
pub type ResidueGraph = DiGraph<(), ResidueEdge>;

//
// conversion functions
//

/// Convert FlowGraph with Flow into ResidueGraph.
///
/// FlowGraph and Flow
/// v -> w
///  e = ([l,u],c), f
///
/// into
///
/// ResidueGraph
/// v -> w
///  e1 = (u-f, +c)
/// w -> v
///  e2 = (f-l, -c)
///
/// Both are created even if the count is zero.
pub fn flow_to_residue<N, E: FlowEdge + ConstCost>(
    graph: &DiGraph<N, E>,
    flow: &Flow,
) -> ResidueGraph {
    let mut rg: ResidueGraph =
        ResidueGraph::with_capacity(graph.node_count(), 2 * graph.edge_count());
    for _ in graph.node_indices() {
        rg.add_node(());
    }

    for e in graph.edge_indices() {
        let f = flow[e];
        let ew = &graph[e];
        assert!(ew.demand() <= f && f <= ew.capacity());
        let (v, w) = graph
            .edge_endpoints(e)
            .unwrap_or_else(|| panic!("edge {:?} is not in the graph", e));
        rg.add_edge(
            v,
            w,
            ResidueEdge::new(ew.capacity() - f, ew.cost()),
        );
        rg.add_edge(
            w,
            v,
            ResidueEdge::new(f - ew.demand(), -ew.cost()),
        );
    }
    rg
}

/// Convert back the ResidueGraph into the flow on the original FlowGraph.
///
/// `f(e) = l(e) + (count of the Down edge of e)`
pub fn residue_to_flow<N, E: FlowEdge>(graph: &DiGraph<N, E>, rg: &ResidueGraph) -> Flow {
    let values = graph
        .edge_indices()
        .map(|e| graph[e].demand() + rg[down_edge(e)].count)
        .collect();
    Flow::from_vec(values)
}

/// Up residue edge of an original edge
pub fn up_edge(e: EdgeIndex) -> EdgeIndex {
    ei(2 * e.index())
}

/// Down residue edge of an original edge
pub fn down_edge(e: EdgeIndex) -> EdgeIndex {
    ei(2 * e.index() + 1)
}

/// The residue edge in the opposite direction, Up <-> Down
pub fn paired_edge(re: EdgeIndex) -> EdgeIndex {
    ei(re.index() ^ 1)
}

///
/// The maximum amount of flow which can be moved along the edges
/// (the minimum of ResidueEdge.count)
///
pub fn bottleneck(rg: &ResidueGraph, edges: &[EdgeIndex]) -> FlowRate {
    edges.iter().map(|&e| rg[e].count).min().unwrap_or(0)
}

///
/// Move `amount` of flow along the residue edges, in place.
///
/// For each edge on the path, the count decreases by `amount`
/// (so the edge disappears if it becomes zero) and the count of the
/// paired edge in the opposite direction increases by `amount`.
///
pub fn augment(rg: &mut ResidueGraph, edges: &[EdgeIndex], amount: FlowRate) {
    for &e in edges {
        let ew = &mut rg[e];
        assert!(
            ew.count >= amount,
            "cannot move {} on residue edge {:?} of count {}",
            amount,
            e,
            ew.count
        );
        ew.count -= amount;
        rg[paired_edge(e)].count += amount;
    }
}
