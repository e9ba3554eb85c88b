//!
//! Errors of the backup assignment solver
//!
use thiserror::Error;

/// Error returned by `solve` and its building blocks.
///
/// Every variant is terminal for a single solve call.
/// No partial assignment is returned together with an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssignmentError {
    /// Malformed input: out-of-range probabilities, non-positive capacity,
    /// or node indices not forming `0..m` / `0..n`.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    /// Not all VNFs could be routed to a backup server.
    #[error("infeasible assignment: routed {routed} of {required} VNFs")]
    InfeasibleAssignment { routed: usize, required: usize },
    /// Scaled costs do not fit in the integer cost type.
    #[error("numeric overflow: {0}")]
    NumericOverflow(String),
    /// Bad solver or generator parameters.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AssignmentError>;
