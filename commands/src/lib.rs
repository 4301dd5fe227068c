//! The text command grammar: a line-based protocol for building,
//! inspecting and resetting a plan.
//!
//! Each line is two uppercase characters followed by integer arguments,
//! confirmed field-for-field against `CmdPlanner::executeCommand`'s
//! parse/display grammar. This crate only parses and renders; applying
//! a [`Command`] to a live plan is the `engine` crate's job, since that
//! needs the Plan Store and id-allocation state this crate has no
//! business owning.

mod parse;
mod render;

pub use parse::parse;
pub use render::{render_counters, render_node};

use plan_types::{ElementId, MonitorFlags};

/// A node-add command carries every runtime field for its kind, in the
/// exact order the wire grammar fixes — see `parse`/`render_node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddDrive {
        element_id: ElementId,
        child_id: ElementId,
        priority: u16,
        frequency_interval: u32,
        sense_id: u16,
        comparator: u8,
        trigger: i32,
        hysteresis: i32,
        flex_latch_hysteresis: i32,
        ramp_increment: u16,
        urgency_multiplier: u8,
        ramp_interval: u32,
    },
    AddCompetence {
        element_id: ElementId,
        use_or_within_group: bool,
    },
    AddAction {
        element_id: ElementId,
        action_id: u16,
        action_value: i32,
    },
    AddActionPattern {
        element_id: ElementId,
    },
    AddCompetenceElement {
        element_id: ElementId,
        parent_id: ElementId,
        child_id: ElementId,
        priority: u16,
        retry_limit: u16,
        sense_id: u16,
        comparator: u8,
        trigger: i32,
        hysteresis: i32,
        flex_latch_hysteresis: i32,
    },
    AddActionPatternElement {
        element_id: ElementId,
        parent_id: ElementId,
        child_id: ElementId,
        order: u16,
    },
    DisplayNode(ElementId),
    DisplayCounters(ElementId),
    DisplayHighest,
    SetNodeMonitor {
        element_id: ElementId,
        flags: MonitorFlags,
    },
    SetGlobalMonitor(MonitorFlags),
    ResetClear,
    ResetInit([usize; 6]),
    SizeCounts,
    SizeTotal,
    SetPlanId(i32),
    GetPlanId,
}

/// Parse error shape: the grammar has no partial-match recovery, so any
/// malformed line is simply a command that fails to parse; the caller
/// (`engine::Engine::execute_command`) turns that into the literal
/// `"FAIL"`, same as a structurally bad but well-formed command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed command line")]
pub struct ParseError;
