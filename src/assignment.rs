//!
//! # Assignment of VNFs to backup servers
//!
//! Extracted from the result of min-cost flow, either
//!
//! * from the successive augmenting paths (`from_paths`), or
//! * from the flow on each edge (`from_flow`).
//!
use crate::common::{Cost, NodeIndex};
use crate::cost::CostModel;
use crate::error::Result;
use crate::min_flow::flow::{Flow, FlowGraph};
use crate::min_flow::network::Layout;
use crate::min_flow::ssp::AugmentingPath;
use crate::model::BackupGraph;
use fnv::FnvHashSet as HashSet;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

///
/// List of `(vnf_index, server_index)` pairs, sorted by VNF index.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment(Vec<(usize, usize)>);

impl Assignment {
    pub fn from_pairs(mut pairs: Vec<(usize, usize)>) -> Self {
        pairs.sort_unstable();
        Assignment(pairs)
    }
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize)> + '_ {
        self.0.iter()
    }
    ///
    /// Backup server of the VNF
    ///
    pub fn server_of(&self, vnf: usize) -> Option<usize> {
        self.0.iter().find(|(i, _)| *i == vnf).map(|(_, j)| *j)
    }
    ///
    /// The number of VNFs assigned to each server
    ///
    pub fn server_loads(&self, n_servers: usize) -> Vec<usize> {
        let mut loads = vec![0; n_servers];
        for &(_, j) in self.0.iter() {
            loads[j] += 1;
        }
        loads
    }
    ///
    /// Check the postcondition of the assignment on the graph
    ///
    /// * every VNF appears exactly once
    /// * no server is assigned more VNFs than its capacity
    ///
    pub fn is_complete_for(&self, graph: &BackupGraph) -> bool {
        let m = graph.n_vnfs();
        let n = graph.n_servers();
        let vnfs_ok = self.len() == m
            && self.0.iter().enumerate().all(|(k, &(i, _))| k == i)
            && self.0.iter().all(|&(_, j)| j < n);
        vnfs_ok
            && self
                .server_loads(n)
                .iter()
                .zip(graph.servers())
                .all(|(&load, server)| load <= server.capacity)
    }
    ///
    /// Total integer cost of the assignment under the cost model
    ///
    pub fn total_cost(&self, graph: &BackupGraph, cost_model: &CostModel) -> Result<Cost> {
        self.0.iter().try_fold(0, |sum, &(i, j)| {
            let c = cost_model.edge_cost(graph.vnf(i).failure_prob, graph.server(j).failure_prob)?;
            Ok(sum + c)
        })
    }
    ///
    /// Extract the assignment from successive augmenting paths.
    ///
    /// A VNF-server edge traversed forward adds the pair, and the same edge
    /// traversed backward by a later path cancels the pair.
    /// So the assignment is the symmetric difference of the forward edges.
    ///
    pub fn from_paths(paths: &[AugmentingPath], layout: &Layout) -> Self {
        let mut edges: HashSet<(NodeIndex, NodeIndex)> = HashSet::default();
        for path in paths {
            // drop source and sink
            let n = path.nodes.len();
            assert!(n >= 2, "augmenting path should contain source and sink");
            for w in path.nodes[1..n - 1].windows(2) {
                let (a, b) = (w[0], w[1]);
                if !edges.remove(&(b, a)) {
                    edges.insert((a, b));
                }
            }
        }

        let pairs = edges
            .into_iter()
            .map(|(a, b)| match (layout.to_vnf(a), layout.to_server(b)) {
                (Some(i), Some(j)) => (i, j),
                _ => panic!("edge {:?}->{:?} is not a vnf-server edge", a, b),
            })
            .collect();
        Assignment::from_pairs(pairs)
    }
    ///
    /// Extract the assignment from the flow on each edge.
    ///
    /// For each VNF node, any out-going edge with positive flow
    /// identifies the backup server.
    ///
    pub fn from_flow<N>(graph: &FlowGraph<N>, flow: &Flow, layout: &Layout) -> Self {
        let mut pairs = Vec::with_capacity(layout.n_vnfs());
        for i in 0..layout.n_vnfs() {
            for edge in graph.edges_directed(layout.vnf(i), Direction::Outgoing) {
                if flow[edge.id()] > 0 {
                    let j = layout
                        .to_server(edge.target())
                        .unwrap_or_else(|| panic!("vnf#{} is connected to non-server", i));
                    pairs.push((i, j));
                }
            }
        }
        Assignment::from_pairs(pairs)
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, j) in self.0.iter() {
            writeln!(f, "vnf#{}\tserver#{}", i, j)?;
        }
        Ok(())
    }
}
