use engine::EngineConfig;
use plan_types::{Actions, Monitor, PlanNode, Releaser, Return, ReturnCode, Senses};

/// Always reads zero. Stand-in for a real sense reader, letting the
/// tick loop and the text command grammar be exercised end to end
/// before a host wires in real hardware/sim sense readers.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoSenses;

impl Senses for DemoSenses {
    fn read(&self, _sense_id: u16) -> i32 {
        0
    }
}

/// Always succeeds immediately. Stand-in for a real action executor.
/// TODO: replace with a real Actions implementation once a concrete
/// robot/simulator backend is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoActions;

impl Actions for DemoActions {
    fn execute(&mut self, _action_id: u16, _action_value: i32, _check_for_complete: bool) -> Return {
        Return::new(ReturnCode::Success)
    }
}

/// Logs every dispatch event at `debug`/`trace` via `tracing`, matching
/// the ambient logging conventions the rest of this workspace uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMonitor;

impl Monitor for TracingMonitor {
    fn on_executed(&mut self, node: &PlanNode) {
        tracing::trace!(id = node.element_id(), "executed");
    }
    fn on_success(&mut self, node: &PlanNode) {
        tracing::debug!(id = node.element_id(), "success");
    }
    fn on_in_progress(&mut self, node: &PlanNode) {
        tracing::trace!(id = node.element_id(), "in progress");
    }
    fn on_fail(&mut self, node: &PlanNode) {
        tracing::debug!(id = node.element_id(), "fail");
    }
    fn on_error(&mut self, node: &PlanNode) {
        tracing::warn!(id = node.element_id(), "error");
    }
    fn on_sense(&mut self, releaser: &Releaser, sense_value: i32) {
        tracing::trace!(sense_id = releaser.sense_id, sense_value, "sense read");
    }
}

pub fn demo_engine_config(cli: &crate::cli::Cli) -> EngineConfig {
    let mut config = EngineConfig::from_env();
    config.tick_interval_ms = cli.tick_interval_ms;
    config.initial_sizes[4] = cli.drive_capacity;
    config.initial_sizes[5] = cli.action_capacity;
    config
}
