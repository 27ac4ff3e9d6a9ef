#![no_main]
use chrono::Duration;
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use zeitfenster::{SearchOptions, SlotIndex, WindowFinder};

fuzz_target!(|data: (SlotIndex, u8, u8)| {
    #[cfg(feature = "log")]
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();

    let (slots, min_slots, min_people) = data;
    let step = slots.slot_length().seconds();
    let options = SearchOptions::new(
        slots.slot_length().duration() * i32::from(min_slots % 16),
        usize::from(min_people % 8),
    );

    let windows = WindowFinder::new(&slots, options).windows();

    let mut starts = HashSet::with_capacity(windows.len());
    for window in &windows {
        assert!(
            starts.insert(window.start),
            "Two windows start at {}",
            window.start
        );
        assert!(window.duration >= options.min_duration);
        assert!(window.headcount() >= options.min_people);

        let start = window.start.timestamp();
        for k in 0..window.duration.num_seconds() / step {
            let slot = slots
                .get(start + k * step)
                .unwrap_or_else(|| panic!("Window at {} spans a gap", window.start));
            assert!(
                slot.available.is_superset(&window.available),
                "Slot {} lost people from the window at {}",
                slot.time,
                window.start
            );
        }
    }

    assert_eq!(
        windows,
        WindowFinder::new(&slots, options).windows(),
        "Searching twice gave different windows"
    );
});
