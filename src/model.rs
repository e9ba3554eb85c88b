//!
//! # Bipartite graph model
//!
//! The input of the solver: a set of VNFs and a set of backup servers.
//! Every VNF can be backed up by every server (complete bipartite graph),
//! so only the node attributes are stored.
//!
//! ```text
//! vnfs:    v0(p=0.1)  v1(p=0.2)
//!            |   \   /   |
//!            |    \ /    |
//!            |    / \    |
//! servers: s0(p=0.3,r=1)  s1(p=0.1,r=1)
//! ```
//!
use crate::common::FailureProb;
use crate::error::{AssignmentError, Result};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A virtual network function which needs a backup server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
pub struct Vnf {
    pub failure_prob: FailureProb,
}

/// A backup server which can absorb up to `capacity` VNFs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
pub struct Server {
    pub failure_prob: FailureProb,
    /// resource capacity `r`
    #[serde(rename = "r", alias = "capacity")]
    pub capacity: usize,
}

///
/// VNF set and server set.
///
/// The instance is validated on construction and never mutated by solvers,
/// so it can be shared (or cloned) between independent solve calls.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BackupGraphJson", into = "BackupGraphJson")]
pub struct BackupGraph {
    vnfs: Vec<Vnf>,
    servers: Vec<Server>,
}

fn check_prob(kind: &str, index: usize, p: FailureProb) -> Result<()> {
    if (0.0..1.0).contains(&p) {
        Ok(())
    } else {
        Err(AssignmentError::InvalidGraph(format!(
            "failure_prob of {}#{} is {} (should be in [0,1))",
            kind, index, p
        )))
    }
}

impl BackupGraph {
    ///
    /// Create a graph from VNFs and servers, checking that
    /// every failure probability is in `[0,1)` and every capacity is positive.
    ///
    pub fn new(vnfs: Vec<Vnf>, servers: Vec<Server>) -> Result<Self> {
        for (i, vnf) in vnfs.iter().enumerate() {
            check_prob("vnf", i, vnf.failure_prob)?;
        }
        for (j, server) in servers.iter().enumerate() {
            check_prob("server", j, server.failure_prob)?;
            if server.capacity < 1 {
                return Err(AssignmentError::InvalidGraph(format!(
                    "capacity of server#{} is {} (should be >= 1)",
                    j, server.capacity
                )));
            }
        }
        Ok(BackupGraph { vnfs, servers })
    }
    ///
    /// Create a graph from failure probabilities, with uniform server capacity `r`.
    ///
    pub fn from_probs(vnf_probs: &[f64], server_probs: &[f64], r: usize) -> Result<Self> {
        let vnfs = vnf_probs.iter().map(|&p| Vnf::new(p)).collect();
        let servers = server_probs.iter().map(|&p| Server::new(p, r)).collect();
        BackupGraph::new(vnfs, servers)
    }
    /// number of VNFs `m`
    pub fn n_vnfs(&self) -> usize {
        self.vnfs.len()
    }
    /// number of servers `n`
    pub fn n_servers(&self) -> usize {
        self.servers.len()
    }
    pub fn vnf(&self, index: usize) -> &Vnf {
        &self.vnfs[index]
    }
    pub fn server(&self, index: usize) -> &Server {
        &self.servers[index]
    }
    pub fn vnfs(&self) -> &[Vnf] {
        &self.vnfs
    }
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }
    ///
    /// Sum of capacities of all servers
    ///
    pub fn total_capacity(&self) -> usize {
        self.servers.iter().map(|s| s.capacity).sum()
    }
    ///
    /// Necessary condition for every VNF to be matchable.
    ///
    pub fn has_enough_capacity(&self) -> bool {
        self.total_capacity() >= self.n_vnfs()
    }
    ///
    /// Parse the dictionary-style JSON representation.
    ///
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| AssignmentError::InvalidGraph(e.to_string()))
    }
    pub fn to_json_string(&self) -> String {
        // map with integer keys and float/integer values always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl std::fmt::Display for BackupGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, vnf) in self.vnfs.iter().enumerate() {
            writeln!(f, "vnf\t{}\t{}", i, vnf.failure_prob)?;
        }
        for (j, server) in self.servers.iter().enumerate() {
            writeln!(f, "server\t{}\t{}\t{}", j, server.failure_prob, server.capacity)?;
        }
        Ok(())
    }
}

///
/// Dictionary-style serialized form
///
/// ```text
/// {"vnfs": {"0": {"failure_prob": 0.1}},
///  "servers": {"0": {"failure_prob": 0.3, "r": 1}}}
/// ```
///
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupGraphJson {
    pub vnfs: BTreeMap<usize, Vnf>,
    pub servers: BTreeMap<usize, Server>,
}

/// check that keys of a map are exactly `0..len`
fn into_dense<T>(kind: &str, map: BTreeMap<usize, T>) -> Result<Vec<T>> {
    let len = map.len();
    map.into_iter()
        .enumerate()
        .map(|(i, (key, value))| {
            if i == key {
                Ok(value)
            } else {
                Err(AssignmentError::InvalidGraph(format!(
                    "{} indices should be 0..{} but found {}",
                    kind, len, key
                )))
            }
        })
        .collect()
}

impl std::convert::TryFrom<BackupGraphJson> for BackupGraph {
    type Error = AssignmentError;
    fn try_from(json: BackupGraphJson) -> Result<Self> {
        let vnfs = into_dense("vnf", json.vnfs)?;
        let servers = into_dense("server", json.servers)?;
        BackupGraph::new(vnfs, servers)
    }
}

impl From<BackupGraph> for BackupGraphJson {
    fn from(graph: BackupGraph) -> Self {
        BackupGraphJson {
            vnfs: graph.vnfs.into_iter().enumerate().collect(),
            servers: graph.servers.into_iter().enumerate().collect(),
        }
    }
}
