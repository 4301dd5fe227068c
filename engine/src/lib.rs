//! Top-level facade wiring the Plan Store, Drive Scheduler, Timer
//! Processor and the executors behind one `Engine`, matching
//! `Planner`/`CmdPlanner` in the source one-for-one at the facade level.

mod apply;
pub mod config;

pub use config::EngineConfig;

use commands::Command;
use executor::ExecCtx;
use plan_store::PlanStore;
use plan_types::{Actions, Monitor, MonitorFlags, NullMonitor, Return, ReturnCode, Senses};

/// Senses implementation that always reads zero — a safe placeholder
/// until the host wires in a real sense reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroSenses;

impl Senses for ZeroSenses {
    fn read(&self, _sense_id: u16) -> i32 {
        0
    }
}

/// Actions implementation that always fails — a safe placeholder until
/// the host wires in a real action executor; this keeps a plan with no
/// Actions interface attached from silently reporting Success.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnwiredActions;

impl Actions for UnwiredActions {
    fn execute(&mut self, _action_id: u16, _action_value: i32, _check_for_complete: bool) -> Return {
        Return::new(ReturnCode::Fail)
    }
}

/// Bundles a [`PlanStore`] with the three external collaborators and the
/// plan id, exposing `run_plan`, `process_timers` and `execute_command`
/// — the three entry points an embedding host drives. Single-threaded,
/// cooperative, with no internal re-entrancy.
pub struct Engine {
    store: PlanStore,
    senses: Box<dyn Senses>,
    actions: Box<dyn Actions>,
    monitor: Box<dyn Monitor>,
    global_mask: MonitorFlags,
    plan_id: i32,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        let mut store = PlanStore::new();
        store.initialise(config.initial_sizes);
        Self {
            store,
            senses: Box::new(ZeroSenses),
            actions: Box::new(UnwiredActions),
            monitor: Box::new(NullMonitor),
            global_mask: MonitorFlags::NONE,
            plan_id: 0,
        }
    }

    pub fn with_collaborators(
        config: &EngineConfig,
        senses: Box<dyn Senses>,
        actions: Box<dyn Actions>,
        monitor: Box<dyn Monitor>,
    ) -> Self {
        let mut store = PlanStore::new();
        store.initialise(config.initial_sizes);
        Self { store, senses, actions, monitor, global_mask: MonitorFlags::NONE, plan_id: 0 }
    }

    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    /// Advances the plan exactly one cycle: Drive selection, recursive
    /// execution down to an Action, counters and monitor notification.
    /// At most one Action invocation per call.
    pub fn run_plan(&mut self) -> Return {
        let mut ctx = ExecCtx {
            senses: self.senses.as_ref(),
            actions: self.actions.as_mut(),
            monitor: self.monitor.as_mut(),
            global_mask: self.global_mask,
        };
        scheduler::run_plan(&mut self.store, &mut ctx)
    }

    /// Decays frequency and ramp timers by `delta_ticks`. Does not
    /// execute any node.
    pub fn process_timers(&mut self, delta_ticks: u32) {
        scheduler::process_timers(&mut self.store, delta_ticks);
    }

    /// Parses and applies one line of the text command grammar,
    /// returning the literal `"OK"`/`"FAIL"` or the command's data line.
    /// Command failures surface as `"FAIL"` with no partial side
    /// effects, since `apply` only mutates the store after every field
    /// has already parsed successfully.
    pub fn execute_command(&mut self, line: &str) -> String {
        let cmd = match commands::parse(line) {
            Ok(cmd) => cmd,
            Err(_) => return "FAIL".to_string(),
        };

        if let Command::SetGlobalMonitor(flags) = cmd {
            self.global_mask = flags;
            return "OK".to_string();
        }

        match apply::apply(cmd, &mut self.store, &mut self.plan_id) {
            Ok(Some(data)) => data,
            Ok(None) => "OK".to_string(),
            Err(err) => {
                tracing::warn!(%err, line, "command failed");
                "FAIL".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_drive_with_always_released_releaser_runs_its_action() {
        let mut engine = Engine::with_collaborators(
            &EngineConfig { initial_sizes: [0, 0, 0, 0, 1, 1], ..EngineConfig::default() },
            Box::new(ZeroSenses),
            Box::new(StubActions(ReturnCode::Success)),
            Box::new(NullMonitor),
        );

        assert_eq!(engine.execute_command("A A 1 7 42"), "OK");
        assert_eq!(engine.execute_command("A D 2 1 5 0 0 4 0 0 0 0 0 0"), "OK");

        let ret = engine.run_plan();
        assert_eq!(ret.code, ReturnCode::Success);
        assert_eq!(engine.store().drive(2).unwrap().counters.execution_count, 1);
        assert_eq!(engine.store().drive(2).unwrap().counters.success_count, 1);
        assert_eq!(engine.store().action(1).unwrap().counters.execution_count, 1);
    }

    #[test]
    fn malformed_command_fails_without_side_effects() {
        let mut engine = Engine::new(&EngineConfig::default());
        assert_eq!(engine.execute_command("A D 1 2 3"), "FAIL");
        assert_eq!(engine.store().total_count(), 0);
    }

    #[test]
    fn reset_init_with_zero_sizes_then_size_counts_returns_it_verbatim() {
        // S C emits current per-kind *counts*, which are zero
        // regardless of capacity until something is added, so "R I s;
        // S C returns s verbatim" only round-trips literally when s is
        // the all-zero vector. Each count carries a trailing space, same
        // as the original's "%u " per-count format.
        let mut engine = Engine::new(&EngineConfig::default());
        assert_eq!(engine.execute_command("R I 0 0 0 0 0 0"), "OK");
        assert_eq!(engine.execute_command("S C"), "0 0 0 0 0 0 ");
    }

    #[test]
    fn size_counts_reflects_additions_not_capacity() {
        let mut engine = Engine::new(&EngineConfig::default());
        engine.execute_command("R I 0 0 1 10 2 20");
        engine.execute_command("A C 5 0");
        assert_eq!(engine.execute_command("S C"), "0 0 1 0 0 0 ");
    }

    #[test]
    fn display_node_round_trips_through_the_same_add_line() {
        let mut engine = Engine::new(&EngineConfig::default());
        let add_line = "A D 2 1 5 0 0 4 0 0 0 0 0 0";
        engine.execute_command(add_line);
        assert_eq!(engine.execute_command("D N 2"), add_line);
    }

    #[test]
    fn plan_id_round_trips() {
        let mut engine = Engine::new(&EngineConfig::default());
        assert_eq!(engine.execute_command("I S 42"), "OK");
        assert_eq!(engine.execute_command("I R"), "42");
    }

    struct StubActions(ReturnCode);
    impl Actions for StubActions {
        fn execute(&mut self, _action_id: u16, _action_value: i32, _check_for_complete: bool) -> Return {
            Return::new(self.0)
        }
    }
}
