//!
//! Simulation sweep
//!
//! Solve many random graphs in parallel and aggregate their availabilities.
//! Each instance owns its graph, so nothing is shared between solve calls
//! except the (immutable) solver.
//!
use crate::error::{AssignmentError, Result};
use crate::random_graph::{generate, ProbRange};
use crate::solver::AssignmentSolver;
use indicatif::{ParallelProgressIterator, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

///
/// Parameters of a sweep
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// number of random graphs
    pub n_sims: usize,
    /// number of VNFs
    pub m: usize,
    /// number of servers
    pub n: usize,
    /// capacity of each server
    pub r: usize,
    pub vnf_fail_prob: ProbRange,
    pub server_fail_prob: ProbRange,
    /// the i-th graph is generated with seed `seed + i` (wrapping around `u64::MAX`)
    pub seed: u64,
}

///
/// Aggregated result of a sweep
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub solver: String,
    pub n_solved: usize,
    pub n_failed: usize,
    /// availability of each solved instance, in the order of seeds
    pub availabilities: Vec<f64>,
    /// `None` if no instance was solved
    pub mean_availability: Option<f64>,
    /// `-ln(availability)` of each solved instance, free from underflow
    pub log_unavailabilities: Vec<f64>,
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{bar:40} {pos}/{len} {elapsed_precise} (eta {eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

///
/// Generate `n_sims` graphs and solve them in parallel.
///
/// Instances failing to be solved (e.g. infeasible ones) are skipped
/// with a warning and counted in `n_failed`.
///
pub fn sweep<S: AssignmentSolver + Sync>(solver: &S, config: &SweepConfig) -> Result<SweepSummary> {
    if config.r == 0 {
        return Err(AssignmentError::InvalidConfig(
            "server capacity r should be >= 1".to_string(),
        ));
    }

    let results: Vec<Result<(f64, f64)>> = (0..config.n_sims)
        .into_par_iter()
        .progress_with_style(progress_style())
        .map(|i| {
            let seed = config.seed.wrapping_add(i as u64);
            let graph = generate(
                config.m,
                config.n,
                config.r,
                config.vnf_fail_prob,
                config.server_fail_prob,
                seed,
            )?;
            let solution = solver.solve(&graph).map_err(|e| {
                warn!("skipped instance #{} (seed={}): {}", i, seed, e);
                e
            })?;
            Ok((solution.availability, solution.log_unavailability))
        })
        .collect();

    let (availabilities, log_unavailabilities): (Vec<f64>, Vec<f64>) = results
        .iter()
        .filter_map(|r| r.as_ref().ok().copied())
        .unzip();
    let n_solved = availabilities.len();
    let n_failed = results.len() - n_solved;
    let mean_availability = if n_solved > 0 {
        Some(availabilities.iter().sum::<f64>() / n_solved as f64)
    } else {
        None
    };
    info!(
        "sweep {} m={} n={} r={}: solved={} failed={} mean_availability={:?}",
        solver.name(),
        config.m,
        config.n,
        config.r,
        n_solved,
        n_failed,
        mean_availability
    );

    Ok(SweepSummary {
        solver: solver.name().to_string(),
        n_solved,
        n_failed,
        availabilities,
        mean_availability,
        log_unavailabilities,
    })
}
