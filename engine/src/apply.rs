//! Turns a parsed [`commands::Command`] into Plan Store mutations or a
//! data line, matching `CmdPlanner::executeCommand`'s per-verb dispatch.
//! `Engine::execute_command` wraps this into the literal `"OK"`/`"FAIL"`
//! contract.

use commands::Command;
use plan_store::PlanStore;
use plan_types::{
    Action, ActionPattern, ActionPatternElement, Competence, CompetenceElement, Comparator,
    Counters, Drive, DriveStatus, MonitorFlags, PlanError, PlanNode, Releaser, RuntimeStatus,
};

/// `Ok(None)` is a bare `"OK"`; `Ok(Some(line))` is a data-producing
/// command (`D N`, `D C`, `D H`, `S C`, `S S`, `I R`); `Err` collapses to
/// `"FAIL"` at the `Engine` boundary.
pub fn apply(cmd: Command, store: &mut PlanStore, plan_id: &mut i32) -> Result<Option<String>, PlanError> {
    match cmd {
        Command::AddDrive {
            element_id,
            child_id,
            priority,
            frequency_interval,
            sense_id,
            comparator,
            trigger,
            hysteresis,
            flex_latch_hysteresis,
            ramp_increment,
            urgency_multiplier,
            ramp_interval,
        } => {
            let comparator = Comparator::from_u8(comparator).ok_or(PlanError::InvalidComparator(comparator))?;
            store.add(PlanNode::Drive(Drive {
                element_id,
                priority,
                runtime_priority: priority,
                ramp_increment,
                urgency_multiplier,
                ramp_interval,
                runtime_ramp_counter: ramp_interval,
                frequency_interval,
                runtime_frequency_counter: 0,
                child_id,
                releaser: Releaser::new(sense_id, comparator, trigger, hysteresis, flex_latch_hysteresis),
                status: DriveStatus::NotRunning,
                checked: false,
                counters: Counters::new(MonitorFlags::NONE),
            }))?;
            Ok(None)
        }

        Command::AddCompetence { element_id, use_or_within_group } => {
            store.add(PlanNode::Competence(Competence {
                element_id,
                current_element_id: 0,
                use_or_within_group,
                counters: Counters::new(MonitorFlags::NONE),
            }))?;
            Ok(None)
        }

        Command::AddAction { element_id, action_id, action_value } => {
            store.add(PlanNode::Action(Action {
                element_id,
                action_id,
                action_value,
                check_for_complete: false,
                counters: Counters::new(MonitorFlags::NONE),
            }))?;
            Ok(None)
        }

        Command::AddActionPattern { element_id } => {
            store.add(PlanNode::ActionPattern(ActionPattern {
                element_id,
                current_element_id: 0,
                counters: Counters::new(MonitorFlags::NONE),
            }))?;
            Ok(None)
        }

        Command::AddCompetenceElement {
            element_id,
            parent_id,
            child_id,
            priority,
            retry_limit,
            sense_id,
            comparator,
            trigger,
            hysteresis,
            flex_latch_hysteresis,
        } => {
            let comparator = Comparator::from_u8(comparator).ok_or(PlanError::InvalidComparator(comparator))?;
            store.add(PlanNode::CompetenceElement(CompetenceElement {
                element_id,
                priority,
                releaser: Releaser::new(sense_id, comparator, trigger, hysteresis, flex_latch_hysteresis),
                retry_limit,
                runtime_retry_count: 0,
                parent_id,
                child_id,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))?;
            Ok(None)
        }

        Command::AddActionPatternElement { element_id, parent_id, child_id, order } => {
            store.add(PlanNode::ActionPatternElement(ActionPatternElement {
                element_id,
                parent_id,
                child_id,
                order,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))?;
            Ok(None)
        }

        Command::DisplayNode(id) => {
            let node = store.get(id).ok_or(PlanError::UnknownElement(id))?;
            Ok(Some(commands::render_node(&node)))
        }

        Command::DisplayCounters(id) => {
            let node = store.get(id).ok_or(PlanError::UnknownElement(id))?;
            Ok(Some(commands::render_counters(&node)))
        }

        Command::DisplayHighest => Ok(Some(store.max_element_id().to_string())),

        Command::SetNodeMonitor { element_id, flags } => {
            let mut node = store.get(element_id).ok_or(PlanError::UnknownElement(element_id))?;
            node.counters_mut().monitor_flags = flags;
            store.update(node)?;
            Ok(None)
        }

        Command::SetGlobalMonitor(_flags) => {
            // The global mask lives on `Engine`, not the store; handled
            // by the caller before delegating here.
            Ok(None)
        }

        Command::ResetClear => {
            store.initialise([0; 6]);
            Ok(None)
        }

        Command::ResetInit(sizes) => {
            store.initialise(sizes);
            Ok(None)
        }

        Command::SizeCounts => {
            // `CmdPlanner::executeCommand` prints each count with a
            // trailing `"%u "`, so the line itself carries a trailing
            // space rather than joining counts with one.
            let counts = store.counts();
            Ok(Some(counts.iter().map(|c| format!("{c} ")).collect()))
        }

        Command::SizeTotal => Ok(Some(store.usage_bytes().to_string())),

        Command::SetPlanId(id) => {
            *plan_id = id;
            Ok(None)
        }

        Command::GetPlanId => Ok(Some(plan_id.to_string())),
    }
}
