//!
//! Entry point of the backup assignment solver
//!
//! ```text
//! BackupGraph -> FlowNetwork -> min-cost flow -> Assignment -> availability
//! ```
//!
use crate::assignment::Assignment;
use crate::availability::{availability, log_unavailability};
use crate::common::Cost;
use crate::cost::{CostModel, DEFAULT_COST_SCALE};
use crate::error::{AssignmentError, Result};
use crate::min_flow::{
    min_cost_flow_by_cycle_canceling, successive_shortest_paths, FlowNetwork, ShortestPathMethod,
};
use crate::model::BackupGraph;
use derive_new::new;
use log::info;
use serde::{Deserialize, Serialize};

///
/// Parameters of a solve call
///
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct SolverConfig {
    /// scale factor `K` of the log-costs
    pub cost_scale: f64,
    /// shortest path algorithm used in successive shortest paths
    pub method: ShortestPathMethod,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            cost_scale: DEFAULT_COST_SCALE,
            method: ShortestPathMethod::default(),
        }
    }
}

///
/// Output of a solve call
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// `(vnf_index, server_index)` sorted by vnf_index
    pub mapping: Assignment,
    /// `prod (1 - p_v p_s)` of the mapping
    ///
    /// A plain `f64` product, so it underflows to `0.0` on large instances
    /// with high failure probabilities. Use `log_unavailability` there.
    pub availability: f64,
    /// `-ln(availability)`, computed as a sum without underflow
    pub log_unavailability: f64,
    /// sum of the scaled integer costs of the mapping
    pub total_cost: Cost,
}

///
/// Anything that maps every VNF of a graph to a backup server.
///
/// Implementors never mutate the graph, so a graph can be shared
/// between solvers and between threads.
///
pub trait AssignmentSolver {
    fn solve(&self, graph: &BackupGraph) -> Result<Solution>;
    fn name(&self) -> &'static str;
}

/// Min-cost flow by successive shortest paths
#[derive(Debug, Clone, Copy, Default, new)]
pub struct SuccessiveShortestPaths {
    pub config: SolverConfig,
}

/// Min-cost flow by cycle canceling, an independent oracle
#[derive(Debug, Clone, Copy, Default, new)]
pub struct CycleCanceling {
    pub config: SolverConfig,
}

///
/// Checks shared by all flow-based solvers, before building the network.
///
fn check_capacity(graph: &BackupGraph) -> Result<()> {
    if graph.has_enough_capacity() {
        Ok(())
    } else {
        Err(AssignmentError::InfeasibleAssignment {
            routed: 0,
            required: graph.n_vnfs(),
        })
    }
}

fn into_solution(
    graph: &BackupGraph,
    mapping: Assignment,
    cost_model: &CostModel,
) -> Result<Solution> {
    assert!(
        mapping.is_complete_for(graph),
        "extracted assignment does not cover every vnf within capacity"
    );
    let total_cost = mapping.total_cost(graph, cost_model)?;
    Ok(Solution {
        availability: availability(graph, &mapping),
        log_unavailability: log_unavailability(graph, &mapping),
        total_cost,
        mapping,
    })
}

impl AssignmentSolver for SuccessiveShortestPaths {
    fn solve(&self, graph: &BackupGraph) -> Result<Solution> {
        let cost_model = CostModel::new(self.config.cost_scale)?;
        check_capacity(graph)?;
        let network = FlowNetwork::build(graph, &cost_model)?;
        let result = successive_shortest_paths(&network, self.config.method)?;
        let mapping = Assignment::from_paths(&result.paths, &network.layout);
        let solution = into_solution(graph, mapping, &cost_model)?;
        assert_eq!(solution.total_cost, result.total_cost());
        info!(
            "ssp({:?}) m={} n={} cost={} availability={}",
            self.config.method,
            graph.n_vnfs(),
            graph.n_servers(),
            solution.total_cost,
            solution.availability
        );
        Ok(solution)
    }
    fn name(&self) -> &'static str {
        "ssp"
    }
}

impl AssignmentSolver for CycleCanceling {
    fn solve(&self, graph: &BackupGraph) -> Result<Solution> {
        let cost_model = CostModel::new(self.config.cost_scale)?;
        check_capacity(graph)?;
        let network = FlowNetwork::build(graph, &cost_model)?;
        let flow = min_cost_flow_by_cycle_canceling(&network)?;
        let mapping = Assignment::from_flow(&network.graph, &flow, &network.layout);
        let solution = into_solution(graph, mapping, &cost_model)?;
        info!(
            "cycle canceling m={} n={} cost={} availability={}",
            graph.n_vnfs(),
            graph.n_servers(),
            solution.total_cost,
            solution.availability
        );
        Ok(solution)
    }
    fn name(&self) -> &'static str {
        "cycle_canceling"
    }
}

///
/// Solve with the default configuration
/// (successive shortest paths by bellman-ford, `K = 1e11`).
///
pub fn solve(graph: &BackupGraph) -> Result<Solution> {
    SuccessiveShortestPaths::default().solve(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn solvers() -> Vec<Box<dyn AssignmentSolver>> {
        let dijkstra = SolverConfig::new(DEFAULT_COST_SCALE, ShortestPathMethod::Dijkstra);
        vec![
            Box::new(SuccessiveShortestPaths::default()),
            Box::new(SuccessiveShortestPaths::new(dijkstra)),
            Box::new(CycleCanceling::default()),
        ]
    }

    #[test]
    fn solve_two_by_two() {
        let g = BackupGraph::from_probs(&[0.1, 0.2], &[0.3, 0.1], 1).unwrap();
        for solver in solvers() {
            let s = solver.solve(&g).unwrap();
            assert_eq!(s.mapping.pairs(), &[(0, 0), (1, 1)], "{}", solver.name());
            assert_abs_diff_eq!(s.availability, 0.97 * 0.98, epsilon = 1e-12);
            assert_abs_diff_eq!(
                s.log_unavailability,
                -(0.97_f64 * 0.98).ln(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn solve_empty() {
        let g = BackupGraph::from_probs(&[], &[0.2, 0.3], 1).unwrap();
        for solver in solvers() {
            let s = solver.solve(&g).unwrap();
            assert!(s.mapping.is_empty());
            assert_eq!(s.availability, 1.0);
            assert_eq!(s.log_unavailability, 0.0);
            assert_eq!(s.total_cost, 0);
        }
    }

    #[test]
    fn solve_without_servers() {
        let g = BackupGraph::from_probs(&[0.1], &[], 1).unwrap();
        assert_eq!(
            solve(&g).unwrap_err(),
            AssignmentError::InfeasibleAssignment {
                routed: 0,
                required: 1
            }
        );
    }

    #[test_case(3, 1, 1 ; "one server")]
    #[test_case(5, 2, 2 ; "two servers")]
    fn solve_infeasible_by_capacity(m: usize, n: usize, r: usize) {
        let g = BackupGraph::from_probs(&vec![0.1; m], &vec![0.2; n], r).unwrap();
        for solver in solvers() {
            assert_eq!(
                solver.solve(&g).unwrap_err(),
                AssignmentError::InfeasibleAssignment {
                    routed: 0,
                    required: m
                }
            );
        }
    }

    #[test]
    fn solve_invalid_scale() {
        let g = BackupGraph::from_probs(&[0.1], &[0.2], 1).unwrap();
        let solver = SuccessiveShortestPaths::new(SolverConfig::new(
            -1.0,
            ShortestPathMethod::BellmanFord,
        ));
        assert!(matches!(
            solver.solve(&g),
            Err(AssignmentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn solve_overflow() {
        let g = BackupGraph::from_probs(&[0.9], &[0.9], 1).unwrap();
        let solver = SuccessiveShortestPaths::new(SolverConfig::new(
            1e300,
            ShortestPathMethod::BellmanFord,
        ));
        assert!(matches!(
            solver.solve(&g),
            Err(AssignmentError::NumericOverflow(_))
        ));
    }

    #[test]
    fn log_unavailability_survives_underflow() {
        // 0.0199^1000 is far below the smallest positive f64
        let g = BackupGraph::from_probs(&vec![0.99; 1000], &[0.99], 1000).unwrap();
        let s = solve(&g).unwrap();
        assert_eq!(s.mapping.len(), 1000);
        assert_eq!(s.availability, 0.0);
        assert!(s.log_unavailability.is_finite());
        assert_abs_diff_eq!(
            s.log_unavailability,
            1000.0 * -(1.0_f64 - 0.99 * 0.99).ln(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn solution_json() {
        let g = BackupGraph::from_probs(&[0.0], &[0.5], 1).unwrap();
        let s = solve(&g).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"mapping":[[0,0]],"availability":1.0,"log_unavailability":0.0,"total_cost":0}"#
        );
    }
}
