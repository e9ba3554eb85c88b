//!
//! Common type definitions and short-hands
//!
pub use petgraph::graph::{EdgeIndex, NodeIndex};

/// type of a flow (on edges) in min-flow.
pub type FlowRate = usize;

/// type of an integer cost (of edges per unit flow) in min-flow.
pub type Cost = i64;

/// failure probability of a node, in `[0, 1)`
pub type FailureProb = f64;

///
/// short-hand of `NodeIndex::new`
///
pub fn ni(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

///
/// short-hand of `EdgeIndex::new`
///
pub fn ei(index: usize) -> EdgeIndex {
    EdgeIndex::new(index)
}
