use crate::error::{Error, Result};
use crate::person::{PersonDirectory, PersonId};
use crate::slot::{Slot, SlotIndex};
use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;
use log::{debug, trace};
use std::collections::{BTreeSet, HashSet};

/// Thresholds a window has to meet to be reported
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub min_duration: Duration,
    pub min_people: usize,
}

impl SearchOptions {
    pub fn new(min_duration: Duration, min_people: usize) -> SearchOptions {
        SearchOptions {
            min_duration,
            min_people,
        }
    }
}

/// A contiguous run of slots in which everyone in `available` can meet.
/// Later slots of the run may have more people, never fewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub duration: Duration,
    pub available: BTreeSet<PersonId>,
}

impl Window {
    /// # Errors
    /// `Error::InvalidTimestamp` when the window would end past the last representable instant.
    pub fn end(&self) -> Result<DateTime<Utc>> {
        self.start
            .checked_add_signed(self.duration)
            .ok_or_else(|| {
                Error::InvalidTimestamp(
                    self.start
                        .timestamp()
                        .saturating_add(self.duration.num_seconds()),
                )
            })
    }

    pub fn headcount(&self) -> usize {
        self.available.len()
    }
}

/// Result of a search: the windows in start order, and every category any of
/// their participants belongs to, in the order first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowSearch {
    pub windows: Vec<Window>,
    pub categories: Vec<String>,
}

pub struct WindowFinder<'a> {
    slots: &'a SlotIndex,
    options: SearchOptions,
}

impl<'a> WindowFinder<'a> {
    pub fn new(slots: &'a SlotIndex, options: SearchOptions) -> WindowFinder<'a> {
        WindowFinder { slots, options }
    }

    /// Scans the slots in time order, treating each slot with enough people as
    /// the anchor of a window. A window grows while the next slot follows without
    /// a gap and still has everyone from the anchor.
    ///
    /// A slot with exactly the anchor's people is absorbed into the anchor's window
    /// and never anchors its own. A slot with *more* people may still anchor a
    /// window of its own, since that larger group could have a run of its own.
    ///
    /// # Examples
    /// ```
    /// use chrono::Duration;
    /// use std::collections::BTreeSet;
    /// use zeitfenster::person::PersonId;
    /// use zeitfenster::slot::SlotIndex;
    /// use zeitfenster::time::SlotLength;
    /// use zeitfenster::window::{SearchOptions, WindowFinder};
    ///
    /// let (a, b, c) = (PersonId(1), PersonId(2), PersonId(3));
    /// let slots = SlotIndex::from_export(
    ///     &[0, 900, 1800],
    ///     vec![vec![a, b], vec![a, b, c], vec![a, b]],
    ///     SlotLength::default(),
    /// )
    /// .unwrap();
    ///
    /// let windows = WindowFinder::new(&slots, SearchOptions::new(Duration::minutes(30), 2))
    ///     .windows();
    ///
    /// assert_eq!(windows.len(), 1);
    /// assert_eq!(windows[0].start.timestamp(), 0);
    /// assert_eq!(windows[0].duration, Duration::minutes(45));
    /// assert_eq!(windows[0].available, BTreeSet::from([a, b]));
    /// ```
    pub fn windows(&self) -> Vec<Window> {
        let slot_length = self.slots.slot_length();
        let mut subsumed: HashSet<i64> = HashSet::new();
        let mut windows = Vec::new();

        for anchor in self.slots {
            if subsumed.contains(&anchor.timestamp()) {
                trace!("{} is covered by an earlier window", anchor.time);
                continue;
            }

            if anchor.headcount() < self.options.min_people {
                trace!(
                    "{} has {} of {} people",
                    anchor.time,
                    anchor.headcount(),
                    self.options.min_people
                );
                continue;
            }

            let span = self.extend(anchor, &mut subsumed);
            let duration = slot_length.times(span);

            if duration < self.options.min_duration {
                trace!("{} only lasts {} minutes", anchor.time, duration.num_minutes());
                continue;
            }

            debug!(
                "window at {} for {} minutes with {} people",
                anchor.time,
                duration.num_minutes(),
                anchor.headcount()
            );

            windows.push(Window {
                start: anchor.time,
                duration,
                available: anchor.available.clone(),
            });
        }

        windows
    }

    /// Counts the slots of the run starting at `anchor`, marking every slot with
    /// exactly the anchor's people as subsumed.
    fn extend(&self, anchor: &Slot, subsumed: &mut HashSet<i64>) -> i32 {
        let mut span = 1;
        let mut current = anchor;

        while let Some(next) = self.slots.next_contiguous(current) {
            if !next.available.is_superset(&anchor.available) {
                break;
            }

            if next.headcount() == anchor.headcount() {
                subsumed.insert(next.timestamp());
            }

            span += 1;
            current = next;
        }

        span
    }

    /// Finds the windows, along with the categories of their participants.
    /// Participants missing from `people` contribute no category.
    pub fn search(&self, people: &PersonDirectory) -> WindowSearch {
        let windows = self.windows();

        let categories = windows
            .iter()
            .flat_map(|window| window.available.iter())
            .filter_map(|&id| people.get(id))
            .filter_map(|person| person.category.as_deref())
            .unique()
            .map(str::to_string)
            .collect_vec();

        debug!(
            "found {} windows, categories: {}",
            windows.len(),
            categories.iter().join(", ")
        );

        WindowSearch {
            windows,
            categories,
        }
    }
}
