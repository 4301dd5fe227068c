use crate::monitor_flags::MonitorFlags;
use crate::node::{HasCounters, PlanNode};
use crate::ports::Monitor;

/// The five dispatch outcomes a node can report, beyond the unconditional
/// `Executed` event that fires alongside every one of them. `Sense`
/// is handled separately by the releaser evaluator since it targets a
/// [`crate::Releaser`], not a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success,
    InProgress,
    Fail,
    Error,
}

impl DispatchOutcome {
    fn flag(self) -> MonitorFlags {
        match self {
            DispatchOutcome::Success => MonitorFlags::SUCCESS,
            DispatchOutcome::InProgress => MonitorFlags::PENDING,
            DispatchOutcome::Fail => MonitorFlags::FAIL,
            DispatchOutcome::Error => MonitorFlags::ERROR,
        }
    }

    pub fn from_return_code(code: crate::ReturnCode) -> Self {
        match code {
            crate::ReturnCode::Success => DispatchOutcome::Success,
            crate::ReturnCode::InProgress => DispatchOutcome::InProgress,
            crate::ReturnCode::Fail => DispatchOutcome::Fail,
            crate::ReturnCode::Error => DispatchOutcome::Error,
        }
    }
}

/// Updates a node's counters for one dispatch and notifies the monitor
/// with a post-update snapshot.
///
/// Call this *after* the node's own status/cursor fields have already
/// been mutated for this cycle, so the snapshot the monitor receives
/// reflects the final state. `wrap` lifts the typed node into the
/// [`PlanNode`] snapshot shape the monitor expects.
pub fn dispatch<T: Clone + HasCounters>(
    node: &mut T,
    global_mask: MonitorFlags,
    outcome: DispatchOutcome,
    monitor: &mut dyn Monitor,
    wrap: impl FnOnce(T) -> PlanNode,
) {
    let counters = node.counters_mut();
    counters.execution_count = counters.execution_count.wrapping_add(1);
    if outcome == DispatchOutcome::Success {
        counters.success_count = counters.success_count.wrapping_add(1);
    }

    let local = node.counters().monitor_flags;
    let fires_executed = local.fires(global_mask, MonitorFlags::EXECUTED);
    let fires_outcome = local.fires(global_mask, outcome.flag());

    if !fires_executed && !fires_outcome {
        return;
    }

    let snapshot = wrap(node.clone());
    if fires_executed {
        monitor.on_executed(&snapshot);
    }
    if fires_outcome {
        match outcome {
            DispatchOutcome::Success => monitor.on_success(&snapshot),
            DispatchOutcome::InProgress => monitor.on_in_progress(&snapshot),
            DispatchOutcome::Fail => monitor.on_fail(&snapshot),
            DispatchOutcome::Error => monitor.on_error(&snapshot),
        }
    }
}
