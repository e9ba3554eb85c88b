//! Flow graph definitions
//! - FlowEdge, ConstCost, FlowEdgeBase
//! - Supply
//! - FlowGraph
//! - Flow
use crate::common::{Cost, FlowRate};
use derive_new::new;
use petgraph::graph::{DiGraph, EdgeIndex};
use petgraph::visit::EdgeRef; // for EdgeReference.id()
use petgraph::Direction;
use std::ops::{Index, IndexMut};

/// Edge of FlowGraph
///
/// * `demand()`: demand `l(e)`
/// * `capacity()`: capacity `u(e)`
///
/// `[l, u], c`
pub trait FlowEdge {
    /// Demand of the edge, Lower limit of the flow
    fn demand(&self) -> FlowRate;
    /// Capacity of the edge, Upper limit of the flow
    fn capacity(&self) -> FlowRate;
}

/// Edge of FlowGraph with constant cost
///
/// * `cost()`: cost per unit flow `c(e)`
pub trait ConstCost {
    /// constant Cost-per-unit-flow of the edge
    fn cost(&self) -> Cost;
}

/// Node of FlowGraph
///
/// `supply() > 0` for sources, `supply() < 0` for sinks (i.e. demand),
/// and zero for pass-through nodes.
pub trait Supply {
    fn supply(&self) -> i64;
}

impl Supply for () {
    fn supply(&self) -> i64 {
        0
    }
}

/// Edge attributes used in FlowGraph
/// It has
/// - demand l
/// - capacity u
/// - cost per flow c
/// [l, u], c
#[derive(Debug, Copy, Clone, PartialEq, new)]
pub struct FlowEdgeBase {
    /// demand (lower limit of flow) of the edge l(e)
    pub demand: FlowRate,
    /// capacity (upper limit of flow) of the edge u(e)
    pub capacity: FlowRate,
    /// cost per unit flow
    pub cost: Cost,
}

impl std::fmt::Display for FlowEdgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}] {}", self.demand, self.capacity, self.cost)
    }
}

impl FlowEdge for FlowEdgeBase {
    fn demand(&self) -> FlowRate {
        self.demand
    }
    fn capacity(&self) -> FlowRate {
        self.capacity
    }
}

impl ConstCost for FlowEdgeBase {
    fn cost(&self) -> Cost {
        self.cost
    }
}

/// FlowGraph definition
pub type FlowGraph<N> = DiGraph<N, FlowEdgeBase>;

/// Flow definitions
///
/// Flow f is a mapping of FlowRate f(e) to each edge e
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow(Vec<FlowRate>);

impl Flow {
    /// Flow of `n_edges` edges filled with `value`
    pub fn new(n_edges: usize, value: FlowRate) -> Flow {
        Flow(vec![value; n_edges])
    }
    pub fn from_vec(values: Vec<FlowRate>) -> Flow {
        Flow(values)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// iterator on `(e, f(e))`
    pub fn iter(&self) -> impl Iterator<Item = (EdgeIndex, FlowRate)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &f)| (EdgeIndex::new(i), f))
    }
}

impl Index<EdgeIndex> for Flow {
    type Output = FlowRate;
    fn index(&self, e: EdgeIndex) -> &FlowRate {
        &self.0[e.index()]
    }
}

impl IndexMut<EdgeIndex> for Flow {
    fn index_mut(&mut self, e: EdgeIndex) -> &mut FlowRate {
        &mut self.0[e.index()]
    }
}

///
/// Check if the flow is valid, i.e. it satisfies
/// - flows of all edges are defined
/// - demand and capacity constraint
/// - flow constraint
///
pub fn is_valid_flow<N: Supply, E: FlowEdge>(flow: &Flow, graph: &DiGraph<N, E>) -> bool {
    is_defined_for_all_edges(flow, graph)
        && is_in_demand_and_capacity(flow, graph)
        && is_satisfying_flow_constraint(flow, graph)
}

///
/// Check if the flow contains all edges
///
pub fn is_defined_for_all_edges<N, E: FlowEdge>(flow: &Flow, graph: &DiGraph<N, E>) -> bool {
    flow.len() == graph.edge_count()
}

///
/// For each edge, the flow must satisfy `demand <= flow <= capacity`.
/// This function checks it
///
pub fn is_in_demand_and_capacity<N, E: FlowEdge>(flow: &Flow, graph: &DiGraph<N, E>) -> bool {
    graph.edge_indices().all(|e| {
        let ew = &graph[e];
        let f = flow[e];
        (ew.demand() <= f) && (f <= ew.capacity())
    })
}

///
/// For each node,
/// (the sum of out-going flows) - (the sum of in-coming flows) should be equal to the supply.
///
pub fn is_satisfying_flow_constraint<N: Supply, E: FlowEdge>(
    flow: &Flow,
    graph: &DiGraph<N, E>,
) -> bool {
    graph.node_indices().all(|v| {
        let in_flow: FlowRate = graph
            .edges_directed(v, Direction::Incoming)
            .map(|er| flow[er.id()])
            .sum();
        let out_flow: FlowRate = graph
            .edges_directed(v, Direction::Outgoing)
            .map(|er| flow[er.id()])
            .sum();
        out_flow as i64 - in_flow as i64 == graph[v].supply()
    })
}

///
/// Calculate the total cost of the flow in the graph.
///
pub fn total_cost<N, E: ConstCost>(graph: &DiGraph<N, E>, flow: &Flow) -> Cost {
    graph
        .edge_indices()
        .map(|e| graph[e].cost() * flow[e] as Cost)
        .sum()
}
