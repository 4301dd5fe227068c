//! Node Dispatch, Competence Executor, Action-Pattern Executor and Action
//! execution.

mod action;
mod action_pattern;
mod competence;
mod ctx;

pub use action::execute_action;
pub use action_pattern::execute_action_pattern;
pub use competence::execute_competence;
pub use ctx::ExecCtx;

use plan_store::PlanStore;
use plan_types::{DriveStatus, ElementId, NodeKind, Return, ReturnCode};

/// Resolves `child_id`'s kind via the Plan Store and recurses into the
/// matching executor. This is the shared "Node Dispatch" plumbing every
/// Drive, Competence Element and Action Pattern Element edge goes through.
pub fn execute_child(store: &mut PlanStore, child_id: ElementId, parent_drive_status: DriveStatus, ctx: &mut ExecCtx) -> Return {
    match store.find_child(child_id) {
        Some((NodeKind::Action, _)) => execute_action(store, child_id, ctx),
        Some((NodeKind::ActionPattern, _)) => execute_action_pattern(store, child_id, parent_drive_status, ctx),
        Some((NodeKind::Competence, _)) => execute_competence(store, child_id, parent_drive_status, ctx),
        _ => {
            tracing::warn!(child_id, "dangling child id or inadmissible child kind");
            Return::new(ReturnCode::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_store::PlanStore;
    use plan_types::{
        Action, ActionPattern, ActionPatternElement, Comparator, Competence, CompetenceElement,
        Counters, Drive, DriveStatus, MonitorFlags, NullMonitor, PlanNode, Releaser, RuntimeStatus,
    };

    struct StubActions {
        next: ReturnCode,
        calls: usize,
    }

    impl plan_types::Actions for StubActions {
        fn execute(&mut self, _action_id: u16, _action_value: i32, _check_for_complete: bool) -> Return {
            self.calls += 1;
            Return::new(self.next)
        }
    }

    struct ZeroSenses;
    impl plan_types::Senses for ZeroSenses {
        fn read(&self, _sense_id: u16) -> i32 {
            0
        }
    }

    fn releaser_tr() -> Releaser {
        Releaser::new(0, Comparator::Tr, 0, 0, 0)
    }

    fn releaser_fl() -> Releaser {
        Releaser::new(0, Comparator::Fl, 0, 0, 0)
    }

    fn action(id: ElementId, action_id: u16) -> PlanNode {
        PlanNode::Action(Action {
            element_id: id,
            action_id,
            action_value: 0,
            check_for_complete: false,
            counters: Counters::new(MonitorFlags::NONE),
        })
    }

    #[test]
    fn single_action_succeeds() {
        let mut store = PlanStore::new();
        store.initialise([0, 0, 0, 0, 0, 1]);
        store.add(action(1, 7)).unwrap();

        let mut actions = StubActions { next: ReturnCode::Success, calls: 0 };
        let mut monitor = NullMonitor;
        let senses = ZeroSenses;
        let mut ctx = ExecCtx { senses: &senses, actions: &mut actions, monitor: &mut monitor, global_mask: MonitorFlags::NONE };

        let ret = execute_action(&mut store, 1, &mut ctx);
        assert_eq!(ret.code, ReturnCode::Success);
        assert_eq!(store.action(1).unwrap().counters.execution_count, 1);
        assert_eq!(store.action(1).unwrap().counters.success_count, 1);
        assert_eq!(actions.calls, 1);
    }

    #[test]
    fn competence_and_group_runs_both_ces_in_priority_order() {
        let mut store = PlanStore::new();
        store.initialise([0, 0, 1, 2, 0, 2]);
        store.add(action(1, 1)).unwrap();
        store.add(action(2, 2)).unwrap();
        store
            .add(PlanNode::Competence(Competence {
                element_id: 10,
                current_element_id: 0,
                use_or_within_group: false,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();
        store
            .add(PlanNode::CompetenceElement(CompetenceElement {
                element_id: 11,
                priority: 9,
                releaser: releaser_tr(),
                retry_limit: 0,
                runtime_retry_count: 0,
                parent_id: 10,
                child_id: 1,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();
        store
            .add(PlanNode::CompetenceElement(CompetenceElement {
                element_id: 12,
                priority: 9,
                releaser: releaser_tr(),
                retry_limit: 0,
                runtime_retry_count: 0,
                parent_id: 10,
                child_id: 2,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();

        let mut actions = StubActions { next: ReturnCode::Success, calls: 0 };
        let mut monitor = NullMonitor;
        let senses = ZeroSenses;

        {
            let mut ctx = ExecCtx { senses: &senses, actions: &mut actions, monitor: &mut monitor, global_mask: MonitorFlags::NONE };
            let ret = execute_competence(&mut store, 10, DriveStatus::Running, &mut ctx);
            assert_eq!(ret.code, ReturnCode::InProgress);
        }
        assert_eq!(store.competence(10).unwrap().current_element_id, 12);

        let mut ctx = ExecCtx { senses: &senses, actions: &mut actions, monitor: &mut monitor, global_mask: MonitorFlags::NONE };
        let ret = execute_competence(&mut store, 10, DriveStatus::Running, &mut ctx);
        assert_eq!(ret.code, ReturnCode::Success);
        assert_eq!(store.competence(10).unwrap().current_element_id, 0);
    }

    #[test]
    fn competence_or_group_skips_failed_releaser_same_cycle() {
        let mut store = PlanStore::new();
        store.initialise([0, 0, 1, 2, 0, 2]);
        store.add(action(1, 1)).unwrap();
        store.add(action(2, 2)).unwrap();
        store
            .add(PlanNode::Competence(Competence {
                element_id: 10,
                current_element_id: 0,
                use_or_within_group: true,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();
        store
            .add(PlanNode::CompetenceElement(CompetenceElement {
                element_id: 11,
                priority: 9,
                releaser: releaser_fl(),
                retry_limit: 0,
                runtime_retry_count: 0,
                parent_id: 10,
                child_id: 1,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();
        store
            .add(PlanNode::CompetenceElement(CompetenceElement {
                element_id: 12,
                priority: 9,
                releaser: releaser_tr(),
                retry_limit: 0,
                runtime_retry_count: 0,
                parent_id: 10,
                child_id: 2,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();

        let mut actions = StubActions { next: ReturnCode::Success, calls: 0 };
        let mut monitor = NullMonitor;
        let senses = ZeroSenses;
        let mut ctx = ExecCtx { senses: &senses, actions: &mut actions, monitor: &mut monitor, global_mask: MonitorFlags::NONE };

        let ret = execute_competence(&mut store, 10, DriveStatus::Running, &mut ctx);
        assert_eq!(ret.code, ReturnCode::Success);
        assert_eq!(store.competence_element(11).unwrap().runtime_status, RuntimeStatus::NotReleased);
        assert_eq!(actions.calls, 1);
    }

    #[test]
    fn action_pattern_advances_in_order() {
        let mut store = PlanStore::new();
        store.initialise([1, 2, 0, 0, 0, 2]);
        store.add(action(1, 1)).unwrap();
        store.add(action(2, 2)).unwrap();
        store
            .add(PlanNode::ActionPattern(ActionPattern { element_id: 20, current_element_id: 0, counters: Counters::new(MonitorFlags::NONE) }))
            .unwrap();
        store
            .add(PlanNode::ActionPatternElement(ActionPatternElement {
                element_id: 21,
                parent_id: 20,
                child_id: 1,
                order: 0,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();
        store
            .add(PlanNode::ActionPatternElement(ActionPatternElement {
                element_id: 22,
                parent_id: 20,
                child_id: 2,
                order: 1,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();

        let mut actions = StubActions { next: ReturnCode::Success, calls: 0 };
        let mut monitor = NullMonitor;
        let senses = ZeroSenses;

        {
            let mut ctx = ExecCtx { senses: &senses, actions: &mut actions, monitor: &mut monitor, global_mask: MonitorFlags::NONE };
            let ret = execute_action_pattern(&mut store, 20, DriveStatus::Running, &mut ctx);
            assert_eq!(ret.code, ReturnCode::InProgress);
        }
        assert_eq!(store.action_pattern(20).unwrap().current_element_id, 22);

        let mut ctx = ExecCtx { senses: &senses, actions: &mut actions, monitor: &mut monitor, global_mask: MonitorFlags::NONE };
        let ret = execute_action_pattern(&mut store, 20, DriveStatus::Running, &mut ctx);
        assert_eq!(ret.code, ReturnCode::Success);
        assert_eq!(store.action_pattern(20).unwrap().current_element_id, 0);
    }

    #[test]
    fn ce_retry_converts_fail_to_in_progress() {
        let mut store = PlanStore::new();
        store.initialise([0, 0, 1, 1, 0, 1]);
        store.add(action(1, 1)).unwrap();
        store
            .add(PlanNode::Competence(Competence {
                element_id: 10,
                current_element_id: 0,
                use_or_within_group: false,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();
        store
            .add(PlanNode::CompetenceElement(CompetenceElement {
                element_id: 11,
                priority: 9,
                releaser: releaser_tr(),
                retry_limit: 2,
                runtime_retry_count: 0,
                parent_id: 10,
                child_id: 1,
                runtime_status: RuntimeStatus::NotTested,
                counters: Counters::new(MonitorFlags::NONE),
            }))
            .unwrap();

        let mut actions = StubActions { next: ReturnCode::Fail, calls: 0 };
        let mut monitor = NullMonitor;
        let senses = ZeroSenses;
        let mut ctx = ExecCtx { senses: &senses, actions: &mut actions, monitor: &mut monitor, global_mask: MonitorFlags::NONE };

        let ret = execute_competence(&mut store, 10, DriveStatus::Running, &mut ctx);
        assert_eq!(ret.code, ReturnCode::InProgress);
        assert_eq!(store.competence_element(11).unwrap().runtime_retry_count, 1);
    }
}
