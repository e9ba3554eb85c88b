//!
//! Min-cost flow on the backup assignment flow network
//!
//! * `flow`: flow graph definitions and flow validity checks
//! * `network`: the source -> VNF -> server -> sink network
//! * `residue`: residue graph updated in place
//! * `ssp`: successive shortest paths solver
//! * `cycle_cancel`: negative cycle canceling solver, used as an oracle
//!
pub mod cycle_cancel;
pub mod flow;
pub mod network;
pub mod residue;
pub mod ssp;

pub use cycle_cancel::min_cost_flow_by_cycle_canceling;
pub use flow::{is_valid_flow, total_cost, Flow};
pub use network::{FlowNetwork, Layer, Layout};
pub use ssp::{successive_shortest_paths, AugmentingPath, ShortestPathMethod, SuccessivePaths};
