use plan_types::{Actions, Monitor, MonitorFlags, Senses};

/// Bundles the three external collaborators every executor function needs,
/// so `execute_*` signatures don't grow a parameter per trait object.
pub struct ExecCtx<'a> {
    pub senses: &'a dyn Senses,
    pub actions: &'a mut dyn Actions,
    pub monitor: &'a mut dyn Monitor,
    pub global_mask: MonitorFlags,
}
