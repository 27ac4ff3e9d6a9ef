use crate::error::Result;
use crate::person::PersonId;
use crate::time::{instant, SlotLength};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::debug;
use std::collections::{btree_map, BTreeMap, BTreeSet};

/// One poll slot: an instant, and who is available at it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub time: DateTime<Utc>,
    pub available: BTreeSet<PersonId>,
}

impl Slot {
    pub fn new<I>(time: DateTime<Utc>, available: I) -> Slot
    where
        I: IntoIterator<Item = PersonId>,
    {
        Slot {
            time,
            available: available.into_iter().collect(),
        }
    }

    /// Seconds since the epoch. This is the key the slot is stored under.
    pub fn timestamp(&self) -> i64 {
        self.time.timestamp()
    }

    pub fn headcount(&self) -> usize {
        self.available.len()
    }
}

/// Poll slots keyed and ordered by timestamp.
/// Iteration is always ascending, no matter the order slots were inserted in.
#[derive(Clone, Debug, Default)]
pub struct SlotIndex {
    slots: BTreeMap<i64, Slot>,
    slot_length: SlotLength,
}

impl SlotIndex {
    pub fn new(slot_length: SlotLength) -> SlotIndex {
        SlotIndex {
            slots: BTreeMap::new(),
            slot_length,
        }
    }

    /// Builds the index from the export's parallel `timestamps` and `availability`.
    /// A repeated timestamp replaces the slot inserted before it.
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::person::PersonId;
    /// use zeitfenster::slot::SlotIndex;
    /// use zeitfenster::time::SlotLength;
    ///
    /// let index = SlotIndex::from_export(
    ///     &[1800, 900],
    ///     vec![vec![PersonId(1)], vec![PersonId(1), PersonId(2)]],
    ///     SlotLength::default(),
    /// )
    /// .unwrap();
    ///
    /// let order: Vec<i64> = index.iter().map(|slot| slot.timestamp()).collect();
    /// assert_eq!(order, vec![900, 1800]);
    /// ```
    pub fn from_export<I, A>(
        timestamps: &[i64],
        availability: I,
        slot_length: SlotLength,
    ) -> Result<SlotIndex>
    where
        I: IntoIterator<Item = A>,
        A: IntoIterator<Item = PersonId>,
    {
        let mut index = SlotIndex::new(slot_length);

        for (&timestamp, available) in timestamps.iter().zip(availability) {
            index.insert(Slot::new(instant(timestamp)?, available));
        }

        debug!("indexed {} slots", index.len());
        Ok(index)
    }

    /// Inserts `slot`, returning the slot it replaced at the same timestamp
    pub fn insert(&mut self, slot: Slot) -> Option<Slot> {
        self.slots.insert(slot.timestamp(), slot)
    }

    pub fn get(&self, timestamp: i64) -> Option<&Slot> {
        self.slots.get(&timestamp)
    }

    /// The slot directly after `slot`, if there is one without a gap
    pub fn next_contiguous(&self, slot: &Slot) -> Option<&Slot> {
        self.get(slot.timestamp() + self.slot_length.seconds())
    }

    pub fn iter(&self) -> btree_map::Values<'_, i64, Slot> {
        self.slots.values()
    }

    pub fn slot_length(&self) -> SlotLength {
        self.slot_length
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consecutive timestamps which are not exactly one slot length apart.
    /// Windows never extend across these.
    pub fn gaps(&self) -> Vec<(i64, i64)> {
        let step = self.slot_length.seconds();

        self.slots
            .keys()
            .tuple_windows()
            .filter(|(&before, &after)| after - before != step)
            .map(|(&before, &after)| (before, after))
            .collect_vec()
    }
}

impl<'a> IntoIterator for &'a SlotIndex {
    type Item = &'a Slot;
    type IntoIter = btree_map::Values<'a, i64, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for SlotIndex {
    /// Slots on a small grid, so that contiguous runs and gaps both show up
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let slot_length = SlotLength::default();
        let mut index = SlotIndex::new(slot_length);

        let len = u.arbitrary_len::<(u8, Vec<u8>)>()?;
        for _ in 0..len {
            let step: u8 = u.arbitrary()?;
            let people: Vec<u8> = u.arbitrary()?;
            let time = instant(i64::from(step) * slot_length.seconds())
                .map_err(|_| arbitrary::Error::IncorrectFormat)?;
            index.insert(Slot::new(
                time,
                people.into_iter().map(|p| PersonId(u64::from(p % 8))),
            ));
        }

        Ok(index)
    }
}
