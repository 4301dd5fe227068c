use crate::node::PlanNode;
use crate::releaser::Releaser;

/// Read-only access to the host's sense readings.
///
/// Idempotent, side-effect-free reads are recommended but not required by
/// the contract; the engine treats every call as authoritative for that
/// cycle.
pub trait Senses {
    fn read(&self, sense_id: u16) -> i32;
}

/// The host's action executor.
///
/// `action_value` and `check_for_complete` are passed through unchanged
/// from the owning [`crate::Action`] node; the return's low bits are a
/// [`crate::ReturnCode`] and the high bits are an opaque payload the
/// engine propagates but never interprets.
pub trait Actions {
    fn execute(&mut self, action_id: u16, action_value: i32, check_for_complete: bool) -> crate::Return;
}

/// The monitor sink. Every callback receives a snapshot copy
/// of the node, never the live node, and is invoked synchronously from
/// inside `run_plan`/`process_timers`.
pub trait Monitor {
    fn on_executed(&mut self, node: &PlanNode);
    fn on_success(&mut self, node: &PlanNode);
    fn on_in_progress(&mut self, node: &PlanNode);
    fn on_fail(&mut self, node: &PlanNode);
    fn on_error(&mut self, node: &PlanNode);
    fn on_sense(&mut self, releaser: &Releaser, sense_value: i32);
}

/// A monitor that discards every event; the default when the host
/// registers no sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMonitor;

impl Monitor for NullMonitor {
    fn on_executed(&mut self, _node: &PlanNode) {}
    fn on_success(&mut self, _node: &PlanNode) {}
    fn on_in_progress(&mut self, _node: &PlanNode) {}
    fn on_fail(&mut self, _node: &PlanNode) {}
    fn on_error(&mut self, _node: &PlanNode) {}
    fn on_sense(&mut self, _releaser: &Releaser, _sense_value: i32) {}
}
