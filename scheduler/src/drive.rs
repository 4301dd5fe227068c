use executor::ExecCtx;
use plan_store::PlanStore;
use plan_types::{dispatch, DispatchOutcome, Drive, DriveStatus, ElementId, PlanNode, Return, ReturnCode};

/// Selects the highest-priority eligible Drive and advances it one cycle.
pub fn run_plan(store: &mut PlanStore, ctx: &mut ExecCtx) -> Return {
    for drive in store.drives_mut() {
        drive.checked = false;
    }

    loop {
        let Some(drive_id) = pick_next_drive(store) else {
            return Return::new(ReturnCode::Fail);
        };

        let freq_ok = {
            let drive = store.drive_mut(drive_id).expect("resolved above");
            check_frequency(drive)
        };

        let released = freq_ok && {
            let status = store.drive(drive_id).expect("resolved above").status;
            let drive = store.drive_mut(drive_id).expect("resolved above");
            let mask = drive.counters.monitor_flags;
            releaser::evaluate(&mut drive.releaser, status, ctx.senses, mask, ctx.global_mask, ctx.monitor) == ReturnCode::Success
        };

        if released {
            return run_drive(store, drive_id, ctx);
        }

        let drive = store.drive_mut(drive_id).expect("resolved above");
        drive.status = DriveStatus::NotRunning;
        drive.releaser.runtime_released = false;
        drive.checked = true;
    }
}

fn run_drive(store: &mut PlanStore, drive_id: ElementId, ctx: &mut ExecCtx) -> Return {
    interrupt_other_running_drives(store, drive_id);

    let (child_id, own_status) = {
        let drive = store.drive(drive_id).expect("resolved above");
        (drive.child_id, drive.status)
    };

    let ret = executor::execute_child(store, child_id, own_status, ctx);

    let drive = store.drive_mut(drive_id).expect("resolved above");
    drive.status = match ret.code {
        ReturnCode::InProgress => DriveStatus::Running,
        _ => DriveStatus::NotRunning,
    };
    if drive.status == DriveStatus::NotRunning {
        drive.releaser.runtime_released = false;
    }
    if ret.code == ReturnCode::Success && drive.ramp_interval > 0 {
        drive.runtime_priority = drive.priority;
    }

    dispatch(drive, ctx.global_mask, DispatchOutcome::from_return_code(ret.code), ctx.monitor, PlanNode::Drive);

    ret
}

fn interrupt_other_running_drives(store: &mut PlanStore, chosen_id: ElementId) {
    for drive in store.drives_mut() {
        if drive.element_id != chosen_id && drive.status == DriveStatus::Running {
            drive.status = DriveStatus::Interrupted;
        }
    }
}

/// Already-`Running` Drives always qualify; otherwise the Drive is gated
/// by its frequency counter, which is only reloaded at the moment it's
/// (re)gated.
fn check_frequency(drive: &mut Drive) -> bool {
    if drive.status == DriveStatus::Running {
        return true;
    }
    if drive.runtime_frequency_counter == 0 {
        drive.runtime_frequency_counter = drive.frequency_interval;
        true
    } else {
        false
    }
}

/// Greatest `runtime_priority` among `checked == false` Drives, first-wins
/// on ties (table/insertion order).
///
/// Mirrors `Planner::runPlan`'s selection loop exactly: the running best
/// starts at priority `0`, and a Drive is only ever selected with a
/// strict `>` comparison against it, so a Drive whose `runtime_priority`
/// is `0` can never be selected.
fn pick_next_drive(store: &PlanStore) -> Option<ElementId> {
    let mut best: Option<(ElementId, u16)> = None;
    let mut best_priority: u16 = 0;
    for drive in store.drives() {
        if drive.checked {
            continue;
        }
        if drive.runtime_priority > best_priority {
            best = Some((drive.element_id, drive.runtime_priority));
            best_priority = drive.runtime_priority;
        }
    }
    best.map(|(id, _)| id)
}
