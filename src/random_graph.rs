//!
//! Random backup graph generation
//!
//! Failure probabilities are drawn uniformly from the given ranges
//! and every server has the same capacity `r`.
//! The same seed always gives the same graph.
//!
use crate::common::FailureProb;
use crate::error::{AssignmentError, Result};
use crate::model::{BackupGraph, Server, Vnf};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

///
/// Closed range `[lo, hi]` of failure probabilities
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbRange {
    pub lo: FailureProb,
    pub hi: FailureProb,
}

impl ProbRange {
    ///
    /// Create a range with `0 <= lo <= hi < 1`.
    ///
    pub fn new(lo: FailureProb, hi: FailureProb) -> Result<Self> {
        if 0.0 <= lo && lo <= hi && hi < 1.0 {
            Ok(ProbRange { lo, hi })
        } else {
            Err(AssignmentError::InvalidConfig(format!(
                "probability range [{}, {}] should satisfy 0 <= lo <= hi < 1",
                lo, hi
            )))
        }
    }
    fn sample<R: Rng>(&self, rng: &mut R) -> FailureProb {
        rng.gen_range(self.lo..=self.hi)
    }
}

impl std::str::FromStr for ProbRange {
    type Err = AssignmentError;
    ///
    /// Parse `"lo,hi"`.
    ///
    fn from_str(s: &str) -> Result<Self> {
        let parse = |x: &str| {
            x.trim().parse::<f64>().map_err(|e| {
                AssignmentError::InvalidConfig(format!("cannot parse {:?} in {:?}: {}", x, s, e))
            })
        };
        match s.split_once(',') {
            Some((lo, hi)) => ProbRange::new(parse(lo)?, parse(hi)?),
            None => Err(AssignmentError::InvalidConfig(format!(
                "probability range should be \"lo,hi\" but {:?}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ProbRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{},{}", self.lo, self.hi)
    }
}

///
/// Generate a graph of `m` VNFs and `n` servers of capacity `r`.
///
pub fn generate(
    m: usize,
    n: usize,
    r: usize,
    vnf_prob: ProbRange,
    server_prob: ProbRange,
    seed: u64,
) -> Result<BackupGraph> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let vnfs = (0..m).map(|_| Vnf::new(vnf_prob.sample(&mut rng))).collect();
    let servers = (0..n)
        .map(|_| Server::new(server_prob.sample(&mut rng), r))
        .collect();
    BackupGraph::new(vnfs, servers)
}
