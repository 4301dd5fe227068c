//! Shared node, id and error types for the reactive plan engine.

mod dispatch;
mod error;
mod id;
mod monitor_flags;
mod node;
mod ports;
mod releaser;
mod retcode;

pub use dispatch::{dispatch, DispatchOutcome};
pub use error::PlanError;
pub use id::{ElementId, NO_ELEMENT};
pub use monitor_flags::MonitorFlags;
pub use node::{
    Action, ActionPattern, ActionPatternElement, Competence, CompetenceElement, Counters, Drive,
    DriveStatus, HasCounters, NodeKind, PlanNode, RuntimeStatus,
};
pub use ports::{Actions, Monitor, NullMonitor, Senses};
pub use releaser::{Comparator, Releaser};
pub use retcode::{Return, ReturnCode};
