use plan_store::PlanStore;
use plan_types::{
    dispatch, DispatchOutcome, DriveStatus, ElementId, NodeKind, PlanNode, Return, ReturnCode,
    RuntimeStatus, NO_ELEMENT,
};

use crate::ExecCtx;

/// Selects and advances Competence Elements, honoring priority groups,
/// AND/OR semantics, retries, and resumption state.
pub fn execute_competence(
    store: &mut PlanStore,
    id: ElementId,
    parent_drive_status: DriveStatus,
    ctx: &mut ExecCtx,
) -> Return {
    let current = store.competence(id).expect("resolved by caller").current_element_id;

    let result = if current == NO_ELEMENT {
        initial_path(store, id, parent_drive_status, ctx)
    } else {
        subsequent_path(store, id, current, parent_drive_status, ctx)
    };

    let comp = store.competence_mut(id).expect("resolved above");
    dispatch(
        comp,
        ctx.global_mask,
        DispatchOutcome::from_return_code(result.code),
        ctx.monitor,
        PlanNode::Competence,
    );
    result
}

fn initial_path(store: &mut PlanStore, competence_id: ElementId, parent_drive_status: DriveStatus, ctx: &mut ExecCtx) -> Return {
    clear_ce_statuses(store, competence_id);

    let mut last_priority: u16 = 0;
    loop {
        let Some(ce_id) = find_ce_for_releaser_check(store, competence_id, last_priority) else {
            terminate(store, competence_id);
            return Return::new(ReturnCode::Fail);
        };

        let priority = store.competence_element(ce_id).expect("just found").priority;
        if releaser_released(store, ce_id, parent_drive_status, ctx) {
            let ret = execute_ce(store, ce_id, parent_drive_status, ctx);
            return process_executed_ce(store, competence_id, ce_id, ret);
        }

        store.competence_element_mut(ce_id).expect("just found").runtime_status = RuntimeStatus::NotReleased;
        last_priority = priority;
    }
}

fn subsequent_path(
    store: &mut PlanStore,
    competence_id: ElementId,
    cursor_id: ElementId,
    parent_drive_status: DriveStatus,
    ctx: &mut ExecCtx,
) -> Return {
    let cursor_priority = store.competence_element(cursor_id).expect("resume cursor must resolve").priority;

    for ce in store.ces_of_mut(competence_id) {
        if ce.priority == cursor_priority && ce.runtime_status == RuntimeStatus::NotReleased {
            ce.runtime_status = RuntimeStatus::NotTested;
        }
    }

    let resumable = ce_has_running_action_pattern(store, cursor_id)
        || releaser_released(store, cursor_id, parent_drive_status, ctx);

    if resumable {
        let ret = execute_ce(store, cursor_id, parent_drive_status, ctx);
        return process_executed_ce(store, competence_id, cursor_id, ret);
    }

    store.competence_element_mut(cursor_id).expect("resume cursor must resolve").runtime_status = RuntimeStatus::NotReleased;

    let use_or = store.competence(competence_id).expect("resolved above").use_or_within_group;
    if !use_or {
        terminate(store, competence_id);
        return Return::new(ReturnCode::Fail);
    }

    match next_ce_same_priority_for_resume(store, competence_id, cursor_priority, cursor_id) {
        Some(next_id) => {
            store.competence_mut(competence_id).expect("resolved above").current_element_id = next_id;
            Return::new(ReturnCode::Fail)
        }
        None => {
            terminate(store, competence_id);
            Return::new(ReturnCode::Fail)
        }
    }
}

/// Dispatches to the CE's child, applying retry policy to a Fail outcome.
fn execute_ce(store: &mut PlanStore, ce_id: ElementId, parent_drive_status: DriveStatus, ctx: &mut ExecCtx) -> Return {
    let child_id = store.competence_element(ce_id).expect("resolved by caller").child_id;
    let child_ret = crate::execute_child(store, child_id, parent_drive_status, ctx);

    let (retry_limit, mut retry_count) = {
        let ce = store.competence_element(ce_id).expect("resolved by caller");
        (ce.retry_limit, ce.runtime_retry_count)
    };

    let mut effective = child_ret;
    match child_ret.code {
        ReturnCode::Success => retry_count = 0,
        ReturnCode::Fail => {
            if retry_limit > 0 && retry_count < retry_limit {
                retry_count += 1;
                effective = effective.with_code(ReturnCode::InProgress);
            } else {
                retry_count = 0;
            }
        }
        ReturnCode::InProgress | ReturnCode::Error => {}
    }

    let ce = store.competence_element_mut(ce_id).expect("resolved by caller");
    ce.runtime_retry_count = retry_count;
    ce.runtime_status = match effective.code {
        ReturnCode::Success => RuntimeStatus::Success,
        ReturnCode::InProgress => RuntimeStatus::InProgress,
        ReturnCode::Fail => RuntimeStatus::Failed,
        ReturnCode::Error => RuntimeStatus::Error,
    };
    dispatch(
        ce,
        ctx.global_mask,
        DispatchOutcome::from_return_code(effective.code),
        ctx.monitor,
        PlanNode::CompetenceElement,
    );

    effective
}

/// Interprets a just-executed CE's return, searching for the next CE to
/// attempt and converting the Competence's own return as needed.
fn process_executed_ce(store: &mut PlanStore, competence_id: ElementId, ce_id: ElementId, ret: Return) -> Return {
    let use_or = store.competence(competence_id).expect("resolved above").use_or_within_group;
    let priority = store.competence_element(ce_id).expect("resolved above").priority;

    match ret.code {
        ReturnCode::Success => match next_ce_after_success(store, competence_id, priority, use_or) {
            Some(next_id) => {
                store.competence_mut(competence_id).expect("resolved above").current_element_id = next_id;
                ret.with_code(ReturnCode::InProgress)
            }
            None => {
                terminate(store, competence_id);
                ret
            }
        },
        ReturnCode::InProgress => {
            store.competence_mut(competence_id).expect("resolved above").current_element_id = ce_id;
            ret
        }
        ReturnCode::Fail | ReturnCode::Error => {
            if use_or {
                if let Some(next_id) = next_ce_same_priority_after_fail(store, competence_id, priority) {
                    store.competence_mut(competence_id).expect("resolved above").current_element_id = next_id;
                    return ret.with_code(ReturnCode::InProgress);
                }
            }
            terminate(store, competence_id);
            ret
        }
    }
}

fn terminate(store: &mut PlanStore, competence_id: ElementId) {
    store.competence_mut(competence_id).expect("resolved above").current_element_id = NO_ELEMENT;
    clear_ce_statuses(store, competence_id);
}

fn clear_ce_statuses(store: &mut PlanStore, competence_id: ElementId) {
    for ce in store.ces_of_mut(competence_id) {
        ce.runtime_status = RuntimeStatus::NotTested;
    }
}

fn releaser_released(store: &mut PlanStore, ce_id: ElementId, parent_drive_status: DriveStatus, ctx: &mut ExecCtx) -> bool {
    let ce = store.competence_element_mut(ce_id).expect("resolved by caller");
    let mask = ce.counters.monitor_flags;
    let code = releaser::evaluate(&mut ce.releaser, parent_drive_status, ctx.senses, mask, ctx.global_mask, ctx.monitor);
    code == ReturnCode::Success
}

fn ce_has_running_action_pattern(store: &PlanStore, ce_id: ElementId) -> bool {
    let Some(ce) = store.competence_element(ce_id) else {
        return false;
    };
    match store.find_child(ce.child_id) {
        Some((NodeKind::ActionPattern, PlanNode::ActionPattern(ap))) => ap.current_element_id != NO_ELEMENT,
        _ => false,
    }
}

/// Greatest priority `<= last_priority` among `NotTested` CEs, first-wins
/// on ties; `last_priority == 0` is the initial sentinel meaning
/// "unbounded" (there is no priority 0 band in a populated plan), matching
/// `findCEForReleaserCheck` in the Supplement.
fn find_ce_for_releaser_check(store: &PlanStore, competence_id: ElementId, last_priority: u16) -> Option<ElementId> {
    let mut best: Option<(ElementId, u16)> = None;
    for ce in store.ces_of(competence_id) {
        if ce.runtime_status != RuntimeStatus::NotTested {
            continue;
        }
        if last_priority != 0 && ce.priority > last_priority {
            continue;
        }
        match best {
            None => best = Some((ce.element_id, ce.priority)),
            Some((_, bp)) if ce.priority > bp => best = Some((ce.element_id, ce.priority)),
            _ => {}
        }
    }
    best.map(|(id, _)| id)
}

/// Lowest admissible priority above `completed_priority` — strictly above
/// for OR groups, same-or-above for AND groups — among CEs still
/// `NotTested` or `NotReleased`. Ties by table order.
fn next_ce_after_success(store: &PlanStore, competence_id: ElementId, completed_priority: u16, use_or: bool) -> Option<ElementId> {
    let mut best: Option<(ElementId, u16)> = None;
    for ce in store.ces_of(competence_id) {
        if !matches!(ce.runtime_status, RuntimeStatus::NotTested | RuntimeStatus::NotReleased) {
            continue;
        }
        let admissible = if use_or {
            ce.priority > completed_priority
        } else {
            ce.priority >= completed_priority
        };
        if !admissible {
            continue;
        }
        match best {
            None => best = Some((ce.element_id, ce.priority)),
            Some((_, bp)) if ce.priority < bp => best = Some((ce.element_id, ce.priority)),
            _ => {}
        }
    }
    best.map(|(id, _)| id)
}

fn next_ce_same_priority_after_fail(store: &PlanStore, competence_id: ElementId, priority: u16) -> Option<ElementId> {
    store
        .ces_of(competence_id)
        .find(|ce| ce.priority == priority && matches!(ce.runtime_status, RuntimeStatus::NotTested | RuntimeStatus::NotReleased))
        .map(|ce| ce.element_id)
}

fn next_ce_same_priority_for_resume(store: &PlanStore, competence_id: ElementId, priority: u16, exclude: ElementId) -> Option<ElementId> {
    store
        .ces_of(competence_id)
        .find(|ce| ce.element_id != exclude && ce.priority == priority && ce.runtime_status == RuntimeStatus::NotTested)
        .map(|ce| ce.element_id)
}
