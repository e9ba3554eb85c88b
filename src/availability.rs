//!
//! Availability of an assignment
//!
//! A pair (VNF, backup server) fails only when both fail,
//! so the service is available with probability
//!
//! ```text
//! A = prod_{(v,s)} (1 - p_v p_s)
//! ```
//!
use crate::assignment::Assignment;
use crate::cost::log_cost;
use crate::model::BackupGraph;

///
/// Availability `prod (1 - p_v p_s)` over the assigned pairs.
///
/// Empty assignment has availability `1`.
///
pub fn availability(graph: &BackupGraph, assignment: &Assignment) -> f64 {
    assignment
        .iter()
        .map(|&(i, j)| 1.0 - graph.vnf(i).failure_prob * graph.server(j).failure_prob)
        .product()
}

///
/// `-ln(A)`, the sum of un-scaled log-costs over the assigned pairs.
///
/// More precise than `availability` when `A` is close to 1.
///
pub fn log_unavailability(graph: &BackupGraph, assignment: &Assignment) -> f64 {
    assignment
        .iter()
        .map(|&(i, j)| log_cost(graph.vnf(i).failure_prob, graph.server(j).failure_prob))
        .sum()
}
