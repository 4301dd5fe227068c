use plan_store::PlanStore;
use plan_types::{dispatch, DispatchOutcome, ElementId, PlanNode, Return, ReturnCode};

use crate::ExecCtx;

/// Invokes the host's Actions interface and updates the Action node's own
/// counters.
pub fn execute_action(store: &mut PlanStore, id: ElementId, ctx: &mut ExecCtx) -> Return {
    let (action_id, action_value, check_for_complete) = match store.action(id) {
        Some(a) => (a.action_id, a.action_value, a.check_for_complete),
        None => return Return::new(ReturnCode::Error),
    };

    let ret = ctx.actions.execute(action_id, action_value, check_for_complete);

    let action = store.action_mut(id).expect("resolved by the lookup above");
    // InProgress on this call means the next invocation is a continuation.
    action.check_for_complete = ret.is_in_progress();

    dispatch(
        action,
        ctx.global_mask,
        DispatchOutcome::from_return_code(ret.code),
        ctx.monitor,
        PlanNode::Action,
    );

    ret
}
