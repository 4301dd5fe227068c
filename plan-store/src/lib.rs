//! Typed storage for the six plan node kinds.
//!
//! Every table is pre-reserved to the capacity handed to [`PlanStore::initialise`]
//! and never grows past it — no dynamic growth once a plan is installed is
//! honored by treating a push past capacity as [`PlanError::CapacityExceeded`]
//! rather than reallocating. Lookup is a linear scan, which is acceptable
//! since plans are small.

use std::mem::size_of;

use plan_types::{
    Action, ActionPattern, ActionPatternElement, Competence, CompetenceElement, Drive, ElementId,
    NodeKind, PlanError, PlanNode,
};

/// Per-kind capacities, in capacity order: ActionPattern,
/// ActionPatternElement, Competence, CompetenceElement, Drive, Action.
pub type Sizes = [usize; 6];

#[derive(Debug, Default)]
pub struct PlanStore {
    action_patterns: Vec<ActionPattern>,
    action_pattern_elements: Vec<ActionPatternElement>,
    competences: Vec<Competence>,
    competence_elements: Vec<CompetenceElement>,
    drives: Vec<Drive>,
    actions: Vec<Action>,
    sizes: Sizes,
    initialised: bool,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases any existing tables and allocates fresh ones sized per
    /// `sizes` (capacity order above). All executor resume state (cursors,
    /// statuses) disappears with the old tables — a full rebuild-reset.
    pub fn initialise(&mut self, sizes: Sizes) {
        self.action_patterns = Vec::with_capacity(sizes[0]);
        self.action_pattern_elements = Vec::with_capacity(sizes[1]);
        self.competences = Vec::with_capacity(sizes[2]);
        self.competence_elements = Vec::with_capacity(sizes[3]);
        self.drives = Vec::with_capacity(sizes[4]);
        self.actions = Vec::with_capacity(sizes[5]);
        self.sizes = sizes;
        self.initialised = true;
        tracing::info!(?sizes, "plan store initialised");
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Appends `node` into the table for its kind. Fails if that table is
    /// at capacity.
    pub fn add(&mut self, node: PlanNode) -> Result<(), PlanError> {
        if !self.initialised {
            return Err(PlanError::NotInitialised);
        }
        match node {
            PlanNode::ActionPattern(n) => Self::push(&mut self.action_patterns, n),
            PlanNode::ActionPatternElement(n) => Self::push(&mut self.action_pattern_elements, n),
            PlanNode::Competence(n) => Self::push(&mut self.competences, n),
            PlanNode::CompetenceElement(n) => Self::push(&mut self.competence_elements, n),
            PlanNode::Drive(n) => Self::push(&mut self.drives, n),
            PlanNode::Action(n) => Self::push(&mut self.actions, n),
        }
    }

    fn push<T>(table: &mut Vec<T>, node: T) -> Result<(), PlanError> {
        if table.len() == table.capacity() {
            return Err(PlanError::CapacityExceeded);
        }
        table.push(node);
        Ok(())
    }

    /// Clones out the node with `id`, regardless of kind.
    pub fn get(&self, id: ElementId) -> Option<PlanNode> {
        NodeKind::ALL.iter().find_map(|k| self.find(id, *k))
    }

    /// Clones out the node with `id` iff it is of kind `kind`.
    pub fn find(&self, id: ElementId, kind: NodeKind) -> Option<PlanNode> {
        match kind {
            NodeKind::ActionPattern => Self::find_in(&self.action_patterns, id, PlanNode::ActionPattern),
            NodeKind::ActionPatternElement => {
                Self::find_in(&self.action_pattern_elements, id, PlanNode::ActionPatternElement)
            }
            NodeKind::Competence => Self::find_in(&self.competences, id, PlanNode::Competence),
            NodeKind::CompetenceElement => {
                Self::find_in(&self.competence_elements, id, PlanNode::CompetenceElement)
            }
            NodeKind::Drive => Self::find_in(&self.drives, id, PlanNode::Drive),
            NodeKind::Action => Self::find_in(&self.actions, id, PlanNode::Action),
        }
    }

    fn find_in<T: Clone>(
        table: &[T],
        id: ElementId,
        wrap: impl Fn(T) -> PlanNode,
        ) -> Option<PlanNode>
    where
        T: HasElementId,
    {
        table.iter().find(|n| n.element_id() == id).cloned().map(wrap)
    }

    /// Searches only the Action/ActionPattern/Competence tables, in that
    /// order — CE and APE can never be children of an A/AP/C edge.
    pub fn find_child(&self, id: ElementId) -> Option<(NodeKind, PlanNode)> {
        self.find(id, NodeKind::Action)
            .map(|n| (NodeKind::Action, n))
            .or_else(|| self.find(id, NodeKind::ActionPattern).map(|n| (NodeKind::ActionPattern, n)))
            .or_else(|| self.find(id, NodeKind::Competence).map(|n| (NodeKind::Competence, n)))
    }

    /// Overwrites the stored node sharing `node`'s id and kind.
    pub fn update(&mut self, node: PlanNode) -> Result<(), PlanError> {
        let id = node.element_id();
        match node {
            PlanNode::ActionPattern(n) => Self::update_in(&mut self.action_patterns, id, n),
            PlanNode::ActionPatternElement(n) => Self::update_in(&mut self.action_pattern_elements, id, n),
            PlanNode::Competence(n) => Self::update_in(&mut self.competences, id, n),
            PlanNode::CompetenceElement(n) => Self::update_in(&mut self.competence_elements, id, n),
            PlanNode::Drive(n) => Self::update_in(&mut self.drives, id, n),
            PlanNode::Action(n) => Self::update_in(&mut self.actions, id, n),
        }
    }

    fn update_in<T: HasElementId>(table: &mut [T], id: ElementId, replacement: T) -> Result<(), PlanError> {
        match table.iter_mut().find(|n| n.element_id() == id) {
            Some(slot) => {
                *slot = replacement;
                Ok(())
            }
            None => Err(PlanError::UnknownElement(id)),
        }
    }

    pub fn drive(&self, id: ElementId) -> Option<&Drive> {
        self.drives.iter().find(|n| n.element_id == id)
    }

    pub fn drive_mut(&mut self, id: ElementId) -> Option<&mut Drive> {
        self.drives.iter_mut().find(|n| n.element_id == id)
    }

    pub fn competence(&self, id: ElementId) -> Option<&Competence> {
        self.competences.iter().find(|n| n.element_id == id)
    }

    pub fn competence_mut(&mut self, id: ElementId) -> Option<&mut Competence> {
        self.competences.iter_mut().find(|n| n.element_id == id)
    }

    pub fn competence_element(&self, id: ElementId) -> Option<&CompetenceElement> {
        self.competence_elements.iter().find(|n| n.element_id == id)
    }

    pub fn competence_element_mut(&mut self, id: ElementId) -> Option<&mut CompetenceElement> {
        self.competence_elements.iter_mut().find(|n| n.element_id == id)
    }

    pub fn action_pattern(&self, id: ElementId) -> Option<&ActionPattern> {
        self.action_patterns.iter().find(|n| n.element_id == id)
    }

    pub fn action_pattern_mut(&mut self, id: ElementId) -> Option<&mut ActionPattern> {
        self.action_patterns.iter_mut().find(|n| n.element_id == id)
    }

    pub fn action_pattern_element(&self, id: ElementId) -> Option<&ActionPatternElement> {
        self.action_pattern_elements.iter().find(|n| n.element_id == id)
    }

    pub fn action_pattern_element_mut(&mut self, id: ElementId) -> Option<&mut ActionPatternElement> {
        self.action_pattern_elements.iter_mut().find(|n| n.element_id == id)
    }

    pub fn action(&self, id: ElementId) -> Option<&Action> {
        self.actions.iter().find(|n| n.element_id == id)
    }

    pub fn action_mut(&mut self, id: ElementId) -> Option<&mut Action> {
        self.actions.iter_mut().find(|n| n.element_id == id)
    }

    pub fn drives(&self) -> &[Drive] {
        &self.drives
    }

    pub fn drives_mut(&mut self) -> &mut [Drive] {
        &mut self.drives
    }

    /// Every Competence Element whose `parent_id` is `competence_id`.
    pub fn ces_of(&self, competence_id: ElementId) -> impl Iterator<Item = &CompetenceElement> {
        self.competence_elements.iter().filter(move |ce| ce.parent_id == competence_id)
    }

    pub fn ces_of_mut(&mut self, competence_id: ElementId) -> impl Iterator<Item = &mut CompetenceElement> {
        self.competence_elements.iter_mut().filter(move |ce| ce.parent_id == competence_id)
    }

    /// Every Action Pattern Element whose `parent_id` is `pattern_id`.
    pub fn apes_of(&self, pattern_id: ElementId) -> impl Iterator<Item = &ActionPatternElement> {
        self.action_pattern_elements.iter().filter(move |ape| ape.parent_id == pattern_id)
    }

    pub fn apes_of_mut(&mut self, pattern_id: ElementId) -> impl Iterator<Item = &mut ActionPatternElement> {
        self.action_pattern_elements.iter_mut().filter(move |ape| ape.parent_id == pattern_id)
    }

    pub fn max_element_id(&self) -> ElementId {
        [
            self.action_patterns.iter().map(|n| n.element_id).max(),
            self.action_pattern_elements.iter().map(|n| n.element_id).max(),
            self.competences.iter().map(|n| n.element_id).max(),
            self.competence_elements.iter().map(|n| n.element_id).max(),
            self.drives.iter().map(|n| n.element_id).max(),
            self.actions.iter().map(|n| n.element_id).max(),
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(plan_types::NO_ELEMENT)
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        match kind {
            NodeKind::ActionPattern => self.action_patterns.len(),
            NodeKind::ActionPatternElement => self.action_pattern_elements.len(),
            NodeKind::Competence => self.competences.len(),
            NodeKind::CompetenceElement => self.competence_elements.len(),
            NodeKind::Drive => self.drives.len(),
            NodeKind::Action => self.actions.len(),
        }
    }

    /// Per-kind counts in capacity order — what `S C` emits.
    pub fn counts(&self) -> Sizes {
        let mut out = [0usize; 6];
        for (i, kind) in NodeKind::ALL.iter().enumerate() {
            out[i] = self.count(*kind);
        }
        out
    }

    pub fn total_count(&self) -> usize {
        NodeKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    /// Total footprint of the six pre-sized tables, at their configured
    /// capacity (not their current length) — what `S S` emits.
    pub fn usage_bytes(&self) -> usize {
        self.sizes[0] * size_of::<ActionPattern>()
            + self.sizes[1] * size_of::<ActionPatternElement>()
            + self.sizes[2] * size_of::<Competence>()
            + self.sizes[3] * size_of::<CompetenceElement>()
            + self.sizes[4] * size_of::<Drive>()
            + self.sizes[5] * size_of::<Action>()
    }
}

trait HasElementId {
    fn element_id(&self) -> ElementId;
}

macro_rules! impl_has_element_id {
    ($t:ty) => {
        impl HasElementId for $t {
            fn element_id(&self) -> ElementId {
                self.element_id
            }
        }
    };
}

impl_has_element_id!(ActionPattern);
impl_has_element_id!(ActionPatternElement);
impl_has_element_id!(Competence);
impl_has_element_id!(CompetenceElement);
impl_has_element_id!(Drive);
impl_has_element_id!(Action);
