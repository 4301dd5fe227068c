use plan_store::PlanStore;
use plan_types::{
    dispatch, DispatchOutcome, DriveStatus, ElementId, PlanNode, Return, ReturnCode, RuntimeStatus,
    NO_ELEMENT,
};

use crate::ExecCtx;

/// Advances an ordered sequence of Action Pattern Elements.
pub fn execute_action_pattern(
    store: &mut PlanStore,
    id: ElementId,
    parent_drive_status: DriveStatus,
    ctx: &mut ExecCtx,
) -> Return {
    let current = store.action_pattern(id).map(|ap| ap.current_element_id).unwrap_or(NO_ELEMENT);

    let cursor = if current == NO_ELEMENT {
        clear_ape_statuses(store, id);
        find_next_ape(store, id, 0)
    } else {
        Some(current)
    };

    let result = match cursor {
        None => Return::new(ReturnCode::Fail),
        Some(ape_id) => run_ape(store, id, ape_id, parent_drive_status, ctx),
    };

    let ap = store.action_pattern_mut(id).expect("resolved above");
    dispatch(
        ap,
        ctx.global_mask,
        DispatchOutcome::from_return_code(result.code),
        ctx.monitor,
        PlanNode::ActionPattern,
    );
    result
}

fn run_ape(
    store: &mut PlanStore,
    pattern_id: ElementId,
    ape_id: ElementId,
    parent_drive_status: DriveStatus,
    ctx: &mut ExecCtx,
) -> Return {
    let child_id = store.action_pattern_element(ape_id).expect("resolved above").child_id;
    let ape_order = store.action_pattern_element(ape_id).expect("resolved above").order;

    let child_ret = crate::execute_child(store, child_id, parent_drive_status, ctx);

    let ape = store.action_pattern_element_mut(ape_id).expect("resolved above");
    ape.runtime_status = match child_ret.code {
        ReturnCode::Success => RuntimeStatus::Success,
        ReturnCode::InProgress => RuntimeStatus::InProgress,
        ReturnCode::Fail => RuntimeStatus::Failed,
        ReturnCode::Error => RuntimeStatus::Error,
    };
    dispatch(
        ape,
        ctx.global_mask,
        DispatchOutcome::from_return_code(child_ret.code),
        ctx.monitor,
        PlanNode::ActionPatternElement,
    );

    match child_ret.code {
        ReturnCode::Success => match find_next_ape(store, pattern_id, ape_order) {
            Some(next_id) => {
                store.action_pattern_mut(pattern_id).expect("resolved above").current_element_id = next_id;
                child_ret.with_code(ReturnCode::InProgress)
            }
            None => {
                store.action_pattern_mut(pattern_id).expect("resolved above").current_element_id = NO_ELEMENT;
                clear_ape_statuses(store, pattern_id);
                child_ret
            }
        },
        ReturnCode::InProgress => {
            store.action_pattern_mut(pattern_id).expect("resolved above").current_element_id = ape_id;
            child_ret
        }
        ReturnCode::Fail | ReturnCode::Error => {
            store.action_pattern_mut(pattern_id).expect("resolved above").current_element_id = NO_ELEMENT;
            clear_ape_statuses(store, pattern_id);
            child_ret
        }
    }
}

fn clear_ape_statuses(store: &mut PlanStore, pattern_id: ElementId) {
    for ape in store.apes_of_mut(pattern_id) {
        ape.runtime_status = RuntimeStatus::NotTested;
    }
}

/// Lowest `order` that is `NotTested` and `>= min_order`; ties by table
/// (insertion) order — confirmed against `findNextAPE` in the Supplement.
fn find_next_ape(store: &PlanStore, pattern_id: ElementId, min_order: u16) -> Option<ElementId> {
    let mut best: Option<(ElementId, u16)> = None;
    for ape in store.apes_of(pattern_id) {
        if ape.runtime_status != RuntimeStatus::NotTested {
            continue;
        }
        if ape.order < min_order {
            continue;
        }
        match best {
            None => best = Some((ape.element_id, ape.order)),
            Some((_, bo)) if ape.order < bo => best = Some((ape.element_id, ape.order)),
            _ => {}
        }
    }
    best.map(|(id, _)| id)
}
