use plan_store::PlanStore;

/// Decays frequency and ramp timers by an externally supplied time delta.
pub fn process_timers(store: &mut PlanStore, delta_ticks: u32) {
    for drive in store.drives_mut() {
        if drive.frequency_interval > 0 {
            drive.runtime_frequency_counter = drive.runtime_frequency_counter.saturating_sub(delta_ticks);
        }

        if drive.ramp_interval > 0 {
            drive.runtime_ramp_counter = drive.runtime_ramp_counter.saturating_sub(delta_ticks);
            if drive.runtime_ramp_counter == 0 {
                drive.runtime_ramp_counter = drive.ramp_interval;
                drive.runtime_priority = drive.runtime_priority.saturating_add(drive.ramp_increment);

                if drive.releaser.runtime_released && drive.urgency_multiplier > 0 {
                    // Widened to u64 so the multiply can't overflow before
                    // the divide-by-32 narrows it back down.
                    let boost = (drive.runtime_priority as u64 * drive.urgency_multiplier as u64) / 32;
                    let boost = u16::try_from(boost).unwrap_or(u16::MAX);
                    drive.runtime_priority = drive.runtime_priority.saturating_add(boost);
                }
            }
        }
    }
}

#[cfg(test)]
mod proptests {
    use plan_store::PlanStore;
    use plan_types::{Comparator, Counters, Drive, DriveStatus, MonitorFlags, PlanNode, Releaser};
    use proptest::prelude::*;

    fn lone_drive(store: &mut PlanStore, d: Drive) {
        store.initialise([0, 0, 0, 0, 1, 0]);
        store.add(PlanNode::Drive(d)).unwrap();
    }

    fn blank_drive() -> Drive {
        Drive {
            element_id: 1,
            priority: 0,
            runtime_priority: 0,
            ramp_increment: 0,
            urgency_multiplier: 0,
            ramp_interval: 0,
            runtime_ramp_counter: 0,
            frequency_interval: 0,
            runtime_frequency_counter: 0,
            child_id: 0,
            releaser: Releaser::new(0, Comparator::Tr, 0, 0, 0),
            status: DriveStatus::NotRunning,
            checked: false,
            counters: Counters::new(MonitorFlags::NONE),
        }
    }

    proptest! {
        /// A frequency counter never underflows — it either lands on
        /// exactly `counter - delta` or saturates at zero.
        #[test]
        fn frequency_counter_never_underflows(
            freq_interval in 1u32..10_000,
            counter in 0u32..10_000,
            delta in 0u32..20_000,
        ) {
            let mut d = blank_drive();
            d.frequency_interval = freq_interval;
            d.runtime_frequency_counter = counter;
            let mut store = PlanStore::new();
            lone_drive(&mut store, d);

            super::process_timers(&mut store, delta);

            let got = store.drive(1).unwrap().runtime_frequency_counter;
            prop_assert_eq!(got, counter.saturating_sub(delta));
        }

        /// The ramp counter reload never wraps below its configured
        /// interval: once it hits zero it is reset to `ramp_interval`
        /// exactly, never left at zero or negative.
        #[test]
        fn ramp_counter_reloads_to_interval_on_expiry(
            ramp_interval in 1u32..10_000,
            counter in 0u32..10_000,
        ) {
            let mut d = blank_drive();
            d.ramp_interval = ramp_interval;
            d.runtime_ramp_counter = counter;
            let mut store = PlanStore::new();
            lone_drive(&mut store, d);

            super::process_timers(&mut store, counter);

            let got = store.drive(1).unwrap().runtime_ramp_counter;
            prop_assert_eq!(got, ramp_interval);
        }

        /// A ramp tick matches the widened-then-narrowed saturating formula
        /// exactly, for every combination of priority/increment/multiplier
        /// — including the corners nearest `u16::MAX` where a naive u16
        /// multiply would have overflowed.
        #[test]
        fn runtime_priority_matches_saturating_formula(
            priority in any::<u16>(),
            ramp_increment in any::<u16>(),
            urgency_multiplier in any::<u8>(),
            released in any::<bool>(),
        ) {
            let mut d = blank_drive();
            d.runtime_priority = priority;
            d.ramp_increment = ramp_increment;
            d.ramp_interval = 1;
            d.runtime_ramp_counter = 1;
            d.urgency_multiplier = urgency_multiplier;
            d.releaser.runtime_released = released;
            let mut store = PlanStore::new();
            lone_drive(&mut store, d);

            super::process_timers(&mut store, 1);

            let ramped = priority.saturating_add(ramp_increment);
            let expected = if released && urgency_multiplier > 0 {
                let boost = (ramped as u64 * urgency_multiplier as u64) / 32;
                let boost = u16::try_from(boost).unwrap_or(u16::MAX);
                ramped.saturating_add(boost)
            } else {
                ramped
            };

            let got = store.drive(1).unwrap().runtime_priority;
            prop_assert_eq!(got, expected);
        }
    }
}
