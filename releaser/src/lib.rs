//! The Releaser Evaluator: a sense predicate with hysteresis and a
//! flex-latch policy used while the owning Drive is interrupted.

use plan_types::{Comparator, DriveStatus, Monitor, MonitorFlags, Releaser, ReturnCode, Senses};

/// Evaluates `releaser` against the current sense reading, updating
/// `releaser.runtime_released` to reflect the outcome.
///
/// `node_mask`/`global_mask` gate the `Sense` monitor event exactly like
/// any other dispatch event — the owning node's mask, not the
/// releaser itself, carries the subscription.
pub fn evaluate(
    releaser: &mut Releaser,
    parent_drive_status: DriveStatus,
    senses: &dyn Senses,
    node_mask: MonitorFlags,
    global_mask: MonitorFlags,
    monitor: &mut dyn Monitor,
) -> ReturnCode {
    // TR/FL are unconditional and never read a sense.
    match releaser.comparator {
        Comparator::Tr => {
            releaser.runtime_released = true;
            return ReturnCode::Success;
        }
        Comparator::Fl => {
            releaser.runtime_released = false;
            return ReturnCode::Fail;
        }
        _ => {}
    }

    if parent_drive_status == DriveStatus::NotRunning {
        // Hysteresis must not carry over from a stale Drive.
        releaser.runtime_released = false;
    }

    let sense = senses.read(releaser.sense_id);
    if node_mask.fires(global_mask, MonitorFlags::SENSE) {
        monitor.on_sense(releaser, sense);
    }

    let hysteresis = if parent_drive_status == DriveStatus::Interrupted {
        releaser.flex_latch_hysteresis
    } else {
        releaser.hysteresis
    };

    let success = match releaser.comparator {
        Comparator::Gt => {
            let threshold = if releaser.runtime_released {
                releaser.trigger - hysteresis
            } else {
                releaser.trigger
            };
            sense > threshold
        }
        Comparator::Lt => {
            let threshold = if releaser.runtime_released {
                releaser.trigger + hysteresis
            } else {
                releaser.trigger
            };
            sense < threshold
        }
        Comparator::Eq => sense == releaser.trigger,
        Comparator::Ne => sense != releaser.trigger,
        Comparator::Tr | Comparator::Fl => unreachable!("handled above"),
    };

    releaser.runtime_released = success;
    if success {
        ReturnCode::Success
    } else {
        ReturnCode::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_types::NullMonitor;
    use std::cell::Cell;

    struct StubSense(Cell<i32>);
    impl Senses for StubSense {
        fn read(&self, _sense_id: u16) -> i32 {
            self.0.get()
        }
    }

    #[test]
    fn gt_hysteresis_narrows_threshold_after_trigger() {
        let mut releaser = Releaser::new(0, Comparator::Gt, 50, 5, 5);
        let mut monitor = NullMonitor;
        let sense = StubSense(Cell::new(0));

        let mut step = |value: i32| {
            sense.0.set(value);
            evaluate(
                &mut releaser,
                DriveStatus::Running,
                &sense,
                MonitorFlags::NONE,
                MonitorFlags::NONE,
                &mut monitor,
            )
        };

        assert_eq!(step(40), ReturnCode::Fail);
        assert_eq!(step(55), ReturnCode::Success);
        // Threshold is now 45 (50 - 5) since runtime_released was true.
        assert_eq!(step(48), ReturnCode::Success);
        assert_eq!(step(44), ReturnCode::Fail);
    }

    #[test]
    fn not_running_forces_unlatch() {
        let mut releaser = Releaser::new(0, Comparator::Gt, 50, 5, 5);
        releaser.runtime_released = true;
        let mut monitor = NullMonitor;
        let sense = StubSense(Cell::new(48));

        // With latch carried over this would succeed (threshold 45); the
        // NotRunning reset must force it back to trigger (50) first.
        let result = evaluate(
            &mut releaser,
            DriveStatus::NotRunning,
            &sense,
            MonitorFlags::NONE,
            MonitorFlags::NONE,
            &mut monitor,
        );
        assert_eq!(result, ReturnCode::Fail);
    }

    #[test]
    fn tr_and_fl_do_not_read_sense() {
        let mut releaser = Releaser::new(0, Comparator::Tr, 0, 0, 0);
        let mut monitor = NullMonitor;
        struct PanicSense;
        impl Senses for PanicSense {
            fn read(&self, _sense_id: u16) -> i32 {
                panic!("TR must not read a sense");
            }
        }
        let result = evaluate(
            &mut releaser,
            DriveStatus::Running,
            &PanicSense,
            MonitorFlags::NONE,
            MonitorFlags::NONE,
            &mut monitor,
        );
        assert_eq!(result, ReturnCode::Success);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// NotRunning always forces the releaser back to unlatched,
            /// no matter what sense value or prior latch state it saw.
            #[test]
            fn not_running_always_forces_unlatch(
                trigger in any::<i32>(),
                hysteresis in 0i32..1000,
                sense in any::<i32>(),
                was_released in any::<bool>(),
            ) {
                let mut releaser = Releaser::new(0, Comparator::Gt, trigger, hysteresis, hysteresis);
                releaser.runtime_released = was_released;
                let mut monitor = NullMonitor;
                let stub = StubSense(Cell::new(sense));

                evaluate(&mut releaser, DriveStatus::NotRunning, &stub, MonitorFlags::NONE, MonitorFlags::NONE, &mut monitor);

                prop_assert!(!releaser.runtime_released);
            }

            /// GT hysteresis band only ever narrows the trigger once latched
            /// (by exactly `hysteresis`), never widens it in the other
            /// direction — so a sense that fails against the raw trigger
            /// can never succeed while unlatched.
            #[test]
            fn gt_unlatched_never_beats_raw_trigger(
                trigger in -1000i32..1000,
                hysteresis in 0i32..1000,
                sense in -2000i32..2000,
            ) {
                let mut releaser = Releaser::new(0, Comparator::Gt, trigger, hysteresis, hysteresis);
                releaser.runtime_released = false;
                let mut monitor = NullMonitor;
                let stub = StubSense(Cell::new(sense));

                let result = evaluate(&mut releaser, DriveStatus::Running, &stub, MonitorFlags::NONE, MonitorFlags::NONE, &mut monitor);

                prop_assert_eq!(result == ReturnCode::Success, sense > trigger);
            }

            /// Once latched, GT's effective threshold is exactly
            /// `trigger - hysteresis`: nothing above it fails, nothing at or
            /// below it succeeds.
            #[test]
            fn gt_latched_threshold_is_exactly_trigger_minus_hysteresis(
                trigger in -1000i32..1000,
                hysteresis in 0i32..1000,
                sense in -2000i32..2000,
            ) {
                let mut releaser = Releaser::new(0, Comparator::Gt, trigger, hysteresis, hysteresis);
                releaser.runtime_released = true;
                let mut monitor = NullMonitor;
                let stub = StubSense(Cell::new(sense));

                let result = evaluate(&mut releaser, DriveStatus::Running, &stub, MonitorFlags::NONE, MonitorFlags::NONE, &mut monitor);

                prop_assert_eq!(result == ReturnCode::Success, sense > trigger - hysteresis);
            }

            /// TR/FL ignore the sense reading and latch state entirely.
            #[test]
            fn tr_fl_are_sense_and_latch_independent(
                sense in any::<i32>(),
                was_released in any::<bool>(),
                status in prop_oneof![
                    Just(DriveStatus::NotRunning),
                    Just(DriveStatus::Running),
                    Just(DriveStatus::Interrupted),
                ],
            ) {
                let mut tr = Releaser::new(0, Comparator::Tr, 0, 0, 0);
                tr.runtime_released = was_released;
                let mut monitor = NullMonitor;
                let stub = StubSense(Cell::new(sense));
                prop_assert_eq!(evaluate(&mut tr, status, &stub, MonitorFlags::NONE, MonitorFlags::NONE, &mut monitor), ReturnCode::Success);

                let mut fl = Releaser::new(0, Comparator::Fl, 0, 0, 0);
                fl.runtime_released = was_released;
                prop_assert_eq!(evaluate(&mut fl, status, &stub, MonitorFlags::NONE, MonitorFlags::NONE, &mut monitor), ReturnCode::Fail);
            }
        }
    }

    #[test]
    fn interrupted_uses_flex_latch_hysteresis() {
        let mut releaser = Releaser::new(0, Comparator::Gt, 50, 5, 20);
        releaser.runtime_released = true;
        let mut monitor = NullMonitor;
        let sense = StubSense(Cell::new(35));

        // Flex latch widens the band to 30 (50 - 20); 35 still qualifies.
        let result = evaluate(
            &mut releaser,
            DriveStatus::Interrupted,
            &sense,
            MonitorFlags::NONE,
            MonitorFlags::NONE,
            &mut monitor,
        );
        assert_eq!(result, ReturnCode::Success);
    }
}
