//!
//! Successive shortest paths
//!
//! Starting from the zero flow, repeat `m` times
//!
//! 1. find the least-cost path from source to sink in the residue graph
//! 2. send one unit of flow along the path
//!
//! Every augmentation keeps the residue graph free of negative cycles,
//! so the flow after `k` augmentations is a min-cost flow of value `k`.
//!
//! After the first augmentation the residue graph has negative edges,
//! so the shortest path is computed either by bellman-ford or by dijkstra
//! on potential-reduced costs, never by plain dijkstra.
//!
use super::flow::Flow;
use super::network::FlowNetwork;
use super::residue::{augment, flow_to_residue, residue_to_flow, ResidueGraph};
use crate::common::{Cost, NodeIndex};
use crate::error::{AssignmentError, Result};
use crate::graph::bellman_ford::{bellman_ford, ShortestPaths};
use crate::graph::dijkstra::{dijkstra_with_potential, Potential};
use crate::graph::{edge_list_to_node_list, total_weight};
use log::debug;

/// Algorithm to find a shortest path in a residue graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortestPathMethod {
    /// bellman-ford on the raw costs, `O(VE)` per path
    BellmanFord,
    /// dijkstra on the costs reduced by node potentials, `O(E log V)` per path
    Dijkstra,
}

impl Default for ShortestPathMethod {
    fn default() -> Self {
        ShortestPathMethod::BellmanFord
    }
}

///
/// An augmenting path found in the residue graph
///
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentingPath {
    /// visited nodes, from source to sink
    pub nodes: Vec<NodeIndex>,
    /// total cost of the residue edges on the path
    pub cost: Cost,
}

///
/// Result of successive shortest paths
///
#[derive(Debug, Clone)]
pub struct SuccessivePaths {
    /// augmenting paths in the order of discovery
    pub paths: Vec<AugmentingPath>,
    /// the final flow on the flow network
    pub flow: Flow,
}

impl SuccessivePaths {
    /// sum of the path costs, equal to the cost of the final flow
    pub fn total_cost(&self) -> Cost {
        self.paths.iter().map(|p| p.cost).sum()
    }
}

///
/// Shortest path finder keeping its state (the potential) between iterations
///
struct PathFinder {
    method: ShortestPathMethod,
    potential: Potential,
}

impl PathFinder {
    fn new(method: ShortestPathMethod, n_nodes: usize) -> Self {
        PathFinder {
            method,
            // initial costs are all non-negative
            potential: Potential::zero(n_nodes),
        }
    }
    fn shortest_paths(&mut self, rg: &ResidueGraph, source: NodeIndex) -> Result<ShortestPaths> {
        match self.method {
            ShortestPathMethod::BellmanFord => {
                // augmenting along a shortest path never creates a negative cycle
                let sp = bellman_ford(rg, source).unwrap_or_else(|cycle| {
                    unreachable!("negative cycle {:?} in the residue graph", cycle.0)
                });
                Ok(sp)
            }
            ShortestPathMethod::Dijkstra => {
                let sp = dijkstra_with_potential(rg, source, &self.potential);
                self.potential.update(&sp)?;
                Ok(sp)
            }
        }
    }
}

///
/// Send `m` units of flow from source to sink of the flow network
/// along successive shortest paths.
///
/// Fails with `InfeasibleAssignment` if the sink becomes unreachable
/// before `m` units are routed.
///
pub fn successive_shortest_paths(
    network: &FlowNetwork,
    method: ShortestPathMethod,
) -> Result<SuccessivePaths> {
    let graph = &network.graph;
    let (source, sink) = (network.source(), network.sink());
    let m = network.required_flow();

    let mut rg = flow_to_residue(graph, &Flow::new(graph.edge_count(), 0));
    let mut finder = PathFinder::new(method, rg.node_count());
    let mut paths = Vec::with_capacity(m);

    for k in 0..m {
        let sp = finder.shortest_paths(&rg, source)?;
        let edges = sp
            .path_to(&rg, sink)
            .ok_or(AssignmentError::InfeasibleAssignment {
                routed: k,
                required: m,
            })?;
        let cost = total_weight(&rg, &edges);
        debug!("augmentation #{} len={} cost={}", k, edges.len(), cost);

        let nodes = edge_list_to_node_list(&rg, &edges);
        augment(&mut rg, &edges, 1);
        paths.push(AugmentingPath { nodes, cost });
    }

    let flow = residue_to_flow(graph, &rg);
    Ok(SuccessivePaths { paths, flow })
}
