use thiserror::Error;

use crate::ElementId;

/// Structural faults raised by the plan store and the executors.
///
/// These are distinct from [`crate::ReturnCode::Error`], which is an
/// in-band outcome that flows through the node hierarchy during a plan
/// cycle. A `PlanError` is raised at the Rust API boundary (store
/// mutation, command parsing) and is what the command layer collapses
/// into a literal `"FAIL"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("comparator value {0} is not one of EQ/NE/GT/LT/TR/FL")]
    InvalidComparator(u8),

    #[error("table for this node kind is at capacity")]
    CapacityExceeded,

    #[error("plan has not been initialised")]
    NotInitialised,

    #[error("element id {0} does not exist")]
    UnknownElement(ElementId),
}
