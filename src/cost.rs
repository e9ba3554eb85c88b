//!
//! Cost model
//!
//! The joint failure probability of a pair (VNF, server) is `p1 * p2`.
//! The availability of an assignment `prod (1 - p1 p2)` is maximized
//! exactly when
//!
//! ```text
//! sum ln(1 / (1 - p1 p2))
//! ```
//!
//! is minimized, so the non-negative log-cost is used as the edge cost.
//! It is scaled by a large constant `K` and rounded into an integer,
//! because the min-cost-flow solver works with integer costs.
//!
use crate::common::{Cost, FailureProb};
use crate::error::{AssignmentError, Result};
use crate::model::BackupGraph;
use ndarray::Array2;

/// Default scale factor `K` of log-costs.
pub const DEFAULT_COST_SCALE: f64 = 1e11;

///
/// Un-scaled log cost `ln(1 / (1 - p1 p2))`
///
pub fn log_cost(p1: FailureProb, p2: FailureProb) -> f64 {
    // -ln(1 - x) with better precision for small x
    -(-p1 * p2).ln_1p()
}

///
/// Converter from pairs of failure probabilities into integer edge costs
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    scale: f64,
}

impl CostModel {
    ///
    /// Create a cost model with scale `K`.
    /// `K` should be a positive finite number.
    ///
    pub fn new(scale: f64) -> Result<Self> {
        if scale.is_finite() && scale > 0.0 {
            Ok(CostModel { scale })
        } else {
            Err(AssignmentError::InvalidConfig(format!(
                "cost scale should be positive and finite but {}",
                scale
            )))
        }
    }
    pub fn scale(&self) -> f64 {
        self.scale
    }
    ///
    /// `cost(p1, p2) = round(K * ln(1 / (1 - p1 p2)))`
    ///
    /// Fails with `NumericOverflow` if the scaled cost is not representable as `Cost`.
    ///
    pub fn edge_cost(&self, p1: FailureProb, p2: FailureProb) -> Result<Cost> {
        if !(0.0..1.0).contains(&p1) || !(0.0..1.0).contains(&p2) {
            return Err(AssignmentError::InvalidGraph(format!(
                "failure probabilities ({}, {}) should be in [0,1)",
                p1, p2
            )));
        }
        let cost = (self.scale * log_cost(p1, p2)).round();
        // i64::MAX as f64 is rounded up to 2^63, so the boundary is excluded
        if cost.is_finite() && cost < Cost::MAX as f64 {
            Ok(cost as Cost)
        } else {
            Err(AssignmentError::NumericOverflow(format!(
                "cost of ({}, {}) with scale {} is {}",
                p1, p2, self.scale, cost
            )))
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            scale: DEFAULT_COST_SCALE,
        }
    }
}

///
/// `m x n` matrix of the un-scaled log-costs between VNFs (rows) and servers (columns).
///
pub fn cost_matrix(graph: &BackupGraph) -> Array2<f64> {
    Array2::from_shape_fn((graph.n_vnfs(), graph.n_servers()), |(i, j)| {
        log_cost(graph.vnf(i).failure_prob, graph.server(j).failure_prob)
    })
}
