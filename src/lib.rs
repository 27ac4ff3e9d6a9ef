pub mod error;
pub mod export;
pub mod person;
pub mod report;
pub mod slot;
pub mod time;
pub mod window;

pub use error::{Error, Result};
pub use export::PollExport;
pub use person::{CategoryTable, Person, PersonDirectory, PersonId};
pub use report::Report;
pub use slot::{Slot, SlotIndex};
pub use time::SlotLength;
pub use window::{SearchOptions, Window, WindowFinder, WindowSearch};

#[cfg(test)]
mod tests {

    #[test]
    fn finds_window_through_larger_group() {
        use crate::export::PollExport;
        use crate::person::CategoryTable;
        use crate::time::{parse_duration, SlotLength};
        use crate::window::{SearchOptions, WindowFinder};

        let export = PollExport::from_json(
            r#"[["A", "B", "C"], [1, 2, 3], [0, 900, 1800], [[1, 2], [1, 2, 3], [1, 2]]]"#,
        )
        .unwrap();
        let slots = export.slots(SlotLength::default()).unwrap();
        let people = export.people(&CategoryTable::default());

        let options = SearchOptions::new(parse_duration("0:30").unwrap(), 2);
        let search = WindowFinder::new(&slots, options).search(&people);

        assert_eq!(search.windows.len(), 1);
        assert_eq!(search.windows[0].start.timestamp(), 0);
        assert_eq!(search.windows[0].duration.num_minutes(), 45);
        assert_eq!(search.windows[0].headcount(), 2);
        assert!(search.categories.is_empty());
    }

    #[test]
    fn needs_everyone_for_larger_group() {
        use crate::person::PersonId;
        use crate::slot::SlotIndex;
        use crate::time::SlotLength;
        use crate::window::{SearchOptions, WindowFinder};
        use chrono::Duration;
        use std::collections::BTreeSet;

        let (a, b, c) = (PersonId(1), PersonId(2), PersonId(3));
        let slots = SlotIndex::from_export(
            &[0, 900, 1800],
            vec![vec![a, b], vec![a, b, c], vec![a, b]],
            SlotLength::default(),
        )
        .unwrap();

        let options = SearchOptions::new(Duration::minutes(15), 3);
        let windows = WindowFinder::new(&slots, options).windows();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start.timestamp(), 900);
        assert_eq!(windows[0].duration, Duration::minutes(15));
        assert_eq!(windows[0].available, BTreeSet::from([a, b, c]));

        let options = SearchOptions::new(Duration::minutes(30), 3);
        let windows = WindowFinder::new(&slots, options).windows();
        assert!(windows.is_empty());
    }

    #[test]
    fn reports_categories() {
        use crate::export::PollExport;
        use crate::person::CategoryTable;
        use crate::report::Report;
        use crate::time::SlotLength;
        use crate::window::{SearchOptions, WindowFinder};
        use chrono::{Duration, Utc};

        let export =
            PollExport::from_json(r#"[["A", "B"], [1, 2], [0, 900], [[1, 2], [1, 2]]]"#).unwrap();
        let people = export.people(&CategoryTable::parse("A\tStaff\n").unwrap());
        let slots = export.slots(SlotLength::default()).unwrap();

        let search = WindowFinder::new(&slots, SearchOptions::new(Duration::minutes(30), 2))
            .search(&people);
        assert_eq!(search.categories, vec!["Staff".to_string()]);

        let report = Report::new(&search, &people, &Utc).unwrap();
        assert_eq!(report.header.last().map(String::as_str), Some("Staff"));
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0][3..], ["0:30", "2", "1 (A)"]);
    }
}
