use plan_types::{DriveStatus, PlanNode, RuntimeStatus};

/// Renders `node` as the `"A *"` line that would recreate it — the `D N`
/// inverse of [`crate::parse`], field order confirmed against the
/// original `CmdPlanner::displayNode`.
pub fn render_node(node: &PlanNode) -> String {
    match node {
        PlanNode::Drive(d) => format!(
            "A D {} {} {} {} {} {} {} {} {} {} {} {}",
            d.element_id,
            d.child_id,
            d.priority,
            d.frequency_interval,
            d.releaser.sense_id,
            d.releaser.comparator.to_u8(),
            d.releaser.trigger,
            d.releaser.hysteresis,
            d.releaser.flex_latch_hysteresis,
            d.ramp_increment,
            d.urgency_multiplier,
            d.ramp_interval,
        ),
        PlanNode::CompetenceElement(ce) => format!(
            "A E {} {} {} {} {} {} {} {} {} {}",
            ce.element_id,
            ce.parent_id,
            ce.child_id,
            ce.priority,
            ce.retry_limit,
            ce.releaser.sense_id,
            ce.releaser.comparator.to_u8(),
            ce.releaser.trigger,
            ce.releaser.hysteresis,
            ce.releaser.flex_latch_hysteresis,
        ),
        PlanNode::ActionPattern(ap) => format!("A P {}", ap.element_id),
        PlanNode::ActionPatternElement(ape) => {
            format!("A L {} {} {} {}", ape.element_id, ape.parent_id, ape.child_id, ape.order)
        }
        PlanNode::Action(a) => format!("A A {} {} {}", a.element_id, a.action_id, a.action_value),
        PlanNode::Competence(c) => format!("A C {} {}", c.element_id, c.use_or_within_group as u8),
    }
}

/// Renders `node`'s counters as a single line — the `D C` line shape,
/// confirmed against the original `displayNodeCounters`: every kind
/// leads with `id execution_count success_count`, followed by kind-
/// specific runtime values.
pub fn render_counters(node: &PlanNode) -> String {
    let c = node.counters();
    let head = format!("{} {} {}", node.element_id(), c.execution_count, c.success_count);
    match node {
        PlanNode::Drive(d) => format!(
            "{head} {} {} {} {}",
            d.runtime_ramp_counter,
            d.runtime_frequency_counter,
            d.runtime_priority,
            drive_status_to_u8(d.status),
        ),
        PlanNode::CompetenceElement(ce) => format!("{head} {}", runtime_status_to_u8(ce.runtime_status)),
        PlanNode::ActionPattern(ap) => format!("{head} {}", ap.current_element_id),
        PlanNode::ActionPatternElement(ape) => format!("{head} {}", runtime_status_to_u8(ape.runtime_status)),
        PlanNode::Action(a) => format!("{head} {}", a.check_for_complete as u8),
        PlanNode::Competence(comp) => format!("{head} {}", comp.current_element_id),
    }
}

fn drive_status_to_u8(status: DriveStatus) -> u8 {
    match status {
        DriveStatus::NotRunning => 0,
        DriveStatus::Running => 1,
        DriveStatus::Interrupted => 2,
    }
}

fn runtime_status_to_u8(status: RuntimeStatus) -> u8 {
    match status {
        RuntimeStatus::NotTested => 0,
        RuntimeStatus::Success => 1,
        RuntimeStatus::InProgress => 2,
        RuntimeStatus::Error => 3,
        RuntimeStatus::Failed => 4,
        RuntimeStatus::NotReleased => 5,
    }
}
