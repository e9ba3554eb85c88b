//!
//! Min-cost flow by negative cycle canceling
//!
//! An independent solver used to cross-check successive shortest paths.
//!
//! 1. find a feasible flow of value `m`, ignoring costs,
//!    by augmenting along the paths with the fewest edges
//! 2. while the residue graph has a negative cycle,
//!    move as much flow as possible along the cycle
//!
//! A flow is a min-cost flow iff its residue graph has no negative cycle.
//!
use super::flow::{total_cost, Flow};
use super::network::FlowNetwork;
use super::residue::{augment, bottleneck, flow_to_residue, residue_to_flow, ResidueGraph};
use crate::error::{AssignmentError, Result};
use crate::graph::bellman_ford::find_negative_cycle;
use crate::graph::{bfs_path, total_weight};
use log::debug;

///
/// Find any flow of value `m` from source to sink on the residue graph.
///
fn find_initial_flow(network: &FlowNetwork, rg: &mut ResidueGraph) -> Result<()> {
    let m = network.required_flow();
    for k in 0..m {
        let path = bfs_path(rg, network.source(), network.sink()).ok_or(
            AssignmentError::InfeasibleAssignment {
                routed: k,
                required: m,
            },
        )?;
        augment(rg, &path, 1);
    }
    Ok(())
}

///
/// Cancel negative cycles until none exists. Returns the number of canceled cycles.
///
fn cancel_negative_cycles(rg: &mut ResidueGraph) -> usize {
    let mut n_canceled = 0;
    while let Some(cycle) = find_negative_cycle(rg) {
        let amount = bottleneck(rg, &cycle.0);
        let weight = total_weight(rg, &cycle.0);
        assert!(weight < 0 && amount > 0);
        debug!(
            "canceling cycle #{} len={} weight={} amount={}",
            n_canceled,
            cycle.0.len(),
            weight,
            amount
        );
        augment(rg, &cycle.0, amount);
        n_canceled += 1;
    }
    n_canceled
}

///
/// Find min-cost flow of value `m` on the flow network by cycle canceling.
///
pub fn min_cost_flow_by_cycle_canceling(network: &FlowNetwork) -> Result<Flow> {
    let graph = &network.graph;
    let mut rg = flow_to_residue(graph, &Flow::new(graph.edge_count(), 0));

    find_initial_flow(network, &mut rg)?;
    let init_cost = total_cost(graph, &residue_to_flow(graph, &rg));

    let n_canceled = cancel_negative_cycles(&mut rg);
    let flow = residue_to_flow(graph, &rg);
    debug!(
        "cycle canceling: {} cycles, cost {} -> {}",
        n_canceled,
        init_cost,
        total_cost(graph, &flow)
    );
    Ok(flow)
}
