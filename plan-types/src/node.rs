use crate::id::ElementId;
use crate::monitor_flags::MonitorFlags;
use crate::releaser::Releaser;

/// Tag identifying which of the six typed tables a node lives in.
///
/// Ordered exactly as the "Node capacity order" (the order `R I` takes
/// its per-kind capacities in, and `S C` emits its counts in):
/// ActionPattern, ActionPatternElement, Competence, CompetenceElement,
/// Drive, Action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ActionPattern,
    ActionPatternElement,
    Competence,
    CompetenceElement,
    Drive,
    Action,
}

impl NodeKind {
    /// The six kinds in capacity order, for iterating `sizes[6]` arrays.
    pub const ALL: [NodeKind; 6] = [
        NodeKind::ActionPattern,
        NodeKind::ActionPatternElement,
        NodeKind::Competence,
        NodeKind::CompetenceElement,
        NodeKind::Drive,
        NodeKind::Action,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap()
    }
}

/// Fields common to every node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub execution_count: u32,
    pub success_count: u32,
    pub monitor_flags: MonitorFlags,
}

impl Counters {
    pub fn new(monitor_flags: MonitorFlags) -> Self {
        Self {
            execution_count: 0,
            success_count: 0,
            monitor_flags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveStatus {
    NotRunning,
    Running,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeStatus {
    NotTested,
    Success,
    InProgress,
    Error,
    Failed,
    NotReleased,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drive {
    pub element_id: ElementId,
    pub priority: u16,
    pub runtime_priority: u16,
    pub ramp_increment: u16,
    /// 0-255, scaled by 1/32.
    pub urgency_multiplier: u8,
    pub ramp_interval: u32,
    pub runtime_ramp_counter: u32,
    pub frequency_interval: u32,
    pub runtime_frequency_counter: u32,
    pub child_id: ElementId,
    pub releaser: Releaser,
    pub status: DriveStatus,
    /// Per-cycle scratch flag used by the Drive Scheduler's selection loop.
    pub checked: bool,
    pub counters: Counters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competence {
    pub element_id: ElementId,
    /// Resume cursor; `NO_ELEMENT` means "start from the top".
    pub current_element_id: ElementId,
    pub use_or_within_group: bool,
    pub counters: Counters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetenceElement {
    pub element_id: ElementId,
    pub priority: u16,
    pub releaser: Releaser,
    pub retry_limit: u16,
    pub runtime_retry_count: u16,
    pub parent_id: ElementId,
    pub child_id: ElementId,
    pub runtime_status: RuntimeStatus,
    pub counters: Counters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPattern {
    pub element_id: ElementId,
    pub current_element_id: ElementId,
    pub counters: Counters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPatternElement {
    pub element_id: ElementId,
    pub parent_id: ElementId,
    pub child_id: ElementId,
    pub order: u16,
    pub runtime_status: RuntimeStatus,
    pub counters: Counters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub element_id: ElementId,
    pub action_id: u16,
    pub action_value: i32,
    pub check_for_complete: bool,
    pub counters: Counters,
}

/// Tagged union over the six node kinds.
///
/// Used as the Plan Store's generic `add`/`get` payload and as the
/// snapshot type handed to a [`crate::ports::Monitor`] sink — the snapshot
/// is always a clone, never the live node.
/// Gives generic code (notably [`crate::dispatch::dispatch`]) access to a
/// node's counters without matching on [`PlanNode`] first.
pub trait HasCounters {
    fn counters(&self) -> &Counters;
    fn counters_mut(&mut self) -> &mut Counters;
}

macro_rules! impl_has_counters {
    ($t:ty) => {
        impl HasCounters for $t {
            fn counters(&self) -> &Counters {
                &self.counters
            }
            fn counters_mut(&mut self) -> &mut Counters {
                &mut self.counters
            }
        }
    };
}

impl_has_counters!(Drive);
impl_has_counters!(Competence);
impl_has_counters!(CompetenceElement);
impl_has_counters!(ActionPattern);
impl_has_counters!(ActionPatternElement);
impl_has_counters!(Action);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanNode {
    Drive(Drive),
    Competence(Competence),
    CompetenceElement(CompetenceElement),
    ActionPattern(ActionPattern),
    ActionPatternElement(ActionPatternElement),
    Action(Action),
}

impl PlanNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            PlanNode::Drive(_) => NodeKind::Drive,
            PlanNode::Competence(_) => NodeKind::Competence,
            PlanNode::CompetenceElement(_) => NodeKind::CompetenceElement,
            PlanNode::ActionPattern(_) => NodeKind::ActionPattern,
            PlanNode::ActionPatternElement(_) => NodeKind::ActionPatternElement,
            PlanNode::Action(_) => NodeKind::Action,
        }
    }

    pub fn element_id(&self) -> ElementId {
        match self {
            PlanNode::Drive(n) => n.element_id,
            PlanNode::Competence(n) => n.element_id,
            PlanNode::CompetenceElement(n) => n.element_id,
            PlanNode::ActionPattern(n) => n.element_id,
            PlanNode::ActionPatternElement(n) => n.element_id,
            PlanNode::Action(n) => n.element_id,
        }
    }

    pub fn counters(&self) -> &Counters {
        match self {
            PlanNode::Drive(n) => &n.counters,
            PlanNode::Competence(n) => &n.counters,
            PlanNode::CompetenceElement(n) => &n.counters,
            PlanNode::ActionPattern(n) => &n.counters,
            PlanNode::ActionPatternElement(n) => &n.counters,
            PlanNode::Action(n) => &n.counters,
        }
    }

    pub fn counters_mut(&mut self) -> &mut Counters {
        match self {
            PlanNode::Drive(n) => &mut n.counters,
            PlanNode::Competence(n) => &mut n.counters,
            PlanNode::CompetenceElement(n) => &mut n.counters,
            PlanNode::ActionPattern(n) => &mut n.counters,
            PlanNode::ActionPatternElement(n) => &mut n.counters,
            PlanNode::Action(n) => &mut n.counters,
        }
    }
}

impl HasCounters for PlanNode {
    fn counters(&self) -> &Counters {
        PlanNode::counters(self)
    }
    fn counters_mut(&mut self) -> &mut Counters {
        PlanNode::counters_mut(self)
    }
}
