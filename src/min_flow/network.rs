//!
//! # Flow network of the backup assignment problem
//!
//! ```text
//!          [0,1] 0     [0,1] c(i,j)     [0,r_j] 0
//! source ----------> vnf_i ----------> server_j ----------> sink
//! (supply m)                                           (demand m)
//! ```
//!
//! Nodes are numbered in a fixed order
//!
//! * source: `0`
//! * vnfs: `1..=m`
//! * servers: `m+1..=m+n`
//! * sink: `m+n+1`
//!
//! and `Layout` is the only place converting node indices from/into
//! VNF and server indices.
//!
use super::flow::{FlowEdgeBase, FlowGraph, Supply};
use crate::common::{ei, ni, Cost, EdgeIndex, NodeIndex};
use crate::cost::CostModel;
use crate::error::{AssignmentError, Result};
use crate::model::BackupGraph;
use itertools::iproduct;

/// Which layer a node of the flow network belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Source,
    /// with VNF index in the bipartite graph
    Vnf(usize),
    /// with server index in the bipartite graph
    Server(usize),
    Sink,
}

/// Node attributes of the flow network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowNode {
    pub layer: Layer,
    /// flow amount emitted from this node (`m` for source, `-m` for sink)
    pub supply: i64,
}

impl Supply for FlowNode {
    fn supply(&self) -> i64 {
        self.supply
    }
}

///
/// Node and edge numbering of the flow network with `m` VNFs and `n` servers
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    m: usize,
    n: usize,
}

impl Layout {
    pub fn new(m: usize, n: usize) -> Self {
        Layout { m, n }
    }
    pub fn n_vnfs(&self) -> usize {
        self.m
    }
    pub fn n_servers(&self) -> usize {
        self.n
    }
    pub fn n_nodes(&self) -> usize {
        self.m + self.n + 2
    }
    pub fn n_edges(&self) -> usize {
        self.m + self.m * self.n + self.n
    }
    pub fn source(&self) -> NodeIndex {
        ni(0)
    }
    pub fn sink(&self) -> NodeIndex {
        ni(self.m + self.n + 1)
    }
    pub fn vnf(&self, i: usize) -> NodeIndex {
        assert!(i < self.m);
        ni(1 + i)
    }
    pub fn server(&self, j: usize) -> NodeIndex {
        assert!(j < self.n);
        ni(1 + self.m + j)
    }
    ///
    /// Layer of the node, with VNF/server index restored.
    ///
    pub fn layer(&self, node: NodeIndex) -> Layer {
        let x = node.index();
        if x == 0 {
            Layer::Source
        } else if x <= self.m {
            Layer::Vnf(x - 1)
        } else if x <= self.m + self.n {
            Layer::Server(x - (self.m + 1))
        } else {
            assert_eq!(x, self.m + self.n + 1, "node {:?} is out of layout", node);
            Layer::Sink
        }
    }
    pub fn to_vnf(&self, node: NodeIndex) -> Option<usize> {
        match self.layer(node) {
            Layer::Vnf(i) => Some(i),
            _ => None,
        }
    }
    pub fn to_server(&self, node: NodeIndex) -> Option<usize> {
        match self.layer(node) {
            Layer::Server(j) => Some(j),
            _ => None,
        }
    }
    /// edge `source -> vnf_i`
    pub fn source_edge(&self, i: usize) -> EdgeIndex {
        assert!(i < self.m);
        ei(i)
    }
    /// edge `vnf_i -> server_j`
    pub fn assign_edge(&self, i: usize, j: usize) -> EdgeIndex {
        assert!(i < self.m && j < self.n);
        ei(self.m + i * self.n + j)
    }
    /// edge `server_j -> sink`
    pub fn sink_edge(&self, j: usize) -> EdgeIndex {
        assert!(j < self.n);
        ei(self.m + self.m * self.n + j)
    }
}

///
/// Flow network built from a `BackupGraph`
///
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    pub graph: FlowGraph<FlowNode>,
    pub layout: Layout,
}

impl FlowNetwork {
    ///
    /// Build the flow network of `m+n+2` nodes.
    ///
    /// Edges are added in the order of source edges, VNF-server edges (row-major),
    /// and sink edges, so `Layout::{source_edge, assign_edge, sink_edge}` hold.
    ///
    /// Fails with `NumericOverflow` if a path cost could overflow `Cost`.
    ///
    pub fn build(bg: &BackupGraph, cost_model: &CostModel) -> Result<FlowNetwork> {
        let m = bg.n_vnfs();
        let n = bg.n_servers();
        let layout = Layout::new(m, n);
        let mut graph: FlowGraph<FlowNode> =
            FlowGraph::with_capacity(layout.n_nodes(), layout.n_edges());

        // nodes
        graph.add_node(FlowNode {
            layer: Layer::Source,
            supply: m as i64,
        });
        for i in 0..m {
            graph.add_node(FlowNode {
                layer: Layer::Vnf(i),
                supply: 0,
            });
        }
        for j in 0..n {
            graph.add_node(FlowNode {
                layer: Layer::Server(j),
                supply: 0,
            });
        }
        graph.add_node(FlowNode {
            layer: Layer::Sink,
            supply: -(m as i64),
        });

        // edges
        for i in 0..m {
            graph.add_edge(layout.source(), layout.vnf(i), FlowEdgeBase::new(0, 1, 0));
        }
        let mut max_cost: Cost = 0;
        for (i, j) in iproduct!(0..m, 0..n) {
            let cost = cost_model.edge_cost(bg.vnf(i).failure_prob, bg.server(j).failure_prob)?;
            max_cost = max_cost.max(cost);
            graph.add_edge(layout.vnf(i), layout.server(j), FlowEdgeBase::new(0, 1, cost));
        }
        for j in 0..n {
            let r = bg.server(j).capacity;
            graph.add_edge(layout.server(j), layout.sink(), FlowEdgeBase::new(0, r, 0));
        }

        // any simple path in the residual network has less than |V| edges
        if max_cost.checked_mul(layout.n_nodes() as Cost).is_none() {
            return Err(AssignmentError::NumericOverflow(format!(
                "max edge cost {} times {} nodes overflows",
                max_cost,
                layout.n_nodes()
            )));
        }

        Ok(FlowNetwork { graph, layout })
    }
    pub fn source(&self) -> NodeIndex {
        self.layout.source()
    }
    pub fn sink(&self) -> NodeIndex {
        self.layout.sink()
    }
    /// total flow `m` to be sent from source to sink
    pub fn required_flow(&self) -> usize {
        self.layout.n_vnfs()
    }
}

#[cfg(test)]
mod tests {
    use super::super::flow::{is_valid_flow, total_cost, Flow};
    use super::*;

    #[test]
    fn layout_numbering() {
        let l = Layout::new(3, 2);
        assert_eq!(l.n_nodes(), 7);
        assert_eq!(l.source(), ni(0));
        assert_eq!(l.vnf(0), ni(1));
        assert_eq!(l.vnf(2), ni(3));
        assert_eq!(l.server(0), ni(4));
        assert_eq!(l.server(1), ni(5));
        assert_eq!(l.sink(), ni(6));
        assert_eq!(l.layer(ni(0)), Layer::Source);
        assert_eq!(l.layer(ni(2)), Layer::Vnf(1));
        assert_eq!(l.layer(ni(5)), Layer::Server(1));
        assert_eq!(l.layer(ni(6)), Layer::Sink);
        assert_eq!(l.to_vnf(ni(4)), None);
        assert_eq!(l.to_server(ni(4)), Some(0));
        for k in 0..l.n_nodes() {
            let back = match l.layer(ni(k)) {
                Layer::Source => l.source(),
                Layer::Vnf(i) => l.vnf(i),
                Layer::Server(j) => l.server(j),
                Layer::Sink => l.sink(),
            };
            assert_eq!(back, ni(k));
        }
    }

    #[test]
    fn build_flow_network() {
        let bg = BackupGraph::from_probs(&[0.1, 0.2, 0.3], &[0.3, 0.1], 2).unwrap();
        let cm = CostModel::default();
        let net = FlowNetwork::build(&bg, &cm).unwrap();
        let g = &net.graph;
        let l = net.layout;
        assert_eq!(g.node_count(), 7);
        assert_eq!(g.edge_count(), 3 + 6 + 2);
        assert_eq!(g[net.source()].supply, 3);
        assert_eq!(g[net.sink()].supply, -3);
        assert_eq!(g[l.vnf(1)].layer, Layer::Vnf(1));

        for i in 0..3 {
            let e = l.source_edge(i);
            assert_eq!(g.edge_endpoints(e), Some((l.source(), l.vnf(i))));
            assert_eq!(g[e], FlowEdgeBase::new(0, 1, 0));
            for j in 0..2 {
                let e = l.assign_edge(i, j);
                assert_eq!(g.edge_endpoints(e), Some((l.vnf(i), l.server(j))));
                assert_eq!(g[e].capacity, 1);
                let c = cm
                    .edge_cost(bg.vnf(i).failure_prob, bg.server(j).failure_prob)
                    .unwrap();
                assert_eq!(g[e].cost, c);
            }
        }
        for j in 0..2 {
            let e = l.sink_edge(j);
            assert_eq!(g.edge_endpoints(e), Some((l.server(j), l.sink())));
            assert_eq!(g[e], FlowEdgeBase::new(0, 2, 0));
        }

        // vnf_i -> server_(i%2) is a valid flow
        let mut f = Flow::new(g.edge_count(), 0);
        for i in 0..3 {
            f[l.source_edge(i)] = 1;
            f[l.assign_edge(i, i % 2)] = 1;
            f[l.sink_edge(i % 2)] += 1;
        }
        assert!(is_valid_flow(&f, g));
        assert_eq!(
            total_cost(g, &f),
            g[l.assign_edge(0, 0)].cost + g[l.assign_edge(1, 1)].cost + g[l.assign_edge(2, 0)].cost
        );
    }

    #[test]
    fn build_flow_network_overflow() {
        let bg = BackupGraph::from_probs(&[0.9], &[0.9], 1).unwrap();
        // cost is about 4.98e18, times 4 nodes overflows i64
        let cm = CostModel::new(3e18).unwrap();
        assert!(matches!(
            FlowNetwork::build(&bg, &cm),
            Err(AssignmentError::NumericOverflow(_))
        ));
    }

    #[test]
    fn build_empty() {
        let bg = BackupGraph::from_probs(&[], &[0.1], 1).unwrap();
        let net = FlowNetwork::build(&bg, &CostModel::default()).unwrap();
        assert_eq!(net.graph.node_count(), 3);
        assert_eq!(net.graph.edge_count(), 1);
        assert_eq!(net.required_flow(), 0);
    }
}
