//!
//! # vnfbackup
//!
//! Exact assignment of VNFs (virtual network functions) to backup servers
//! maximizing the availability `prod (1 - p_vnf p_server)`,
//! by min-cost flow on the network `source -> VNFs -> servers -> sink`.
//!
//! ```text
//! use vnfbackup::{model::BackupGraph, solver::solve};
//! let graph = BackupGraph::from_probs(&[0.1, 0.2], &[0.3, 0.1], 1)?;
//! let solution = solve(&graph)?;
//! ```
//!
pub mod assignment;
pub mod availability;
pub mod common;
pub mod cost;
pub mod error;
pub mod graph;
pub mod min_flow;
pub mod model;
pub mod random_graph;
pub mod solver;
pub mod sweep;

pub use error::{AssignmentError, Result};
pub use model::BackupGraph;
pub use solver::{solve, AssignmentSolver, Solution, SolverConfig};

#[cfg(test)]
#[macro_use]
extern crate approx;
