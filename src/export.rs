use crate::error::{Error, Result};
use crate::person::{CategoryTable, PersonDirectory, PersonId};
use crate::slot::SlotIndex;
use crate::time::SlotLength;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A when2meet poll, as copied from the browser console with
/// `[PeopleNames, PeopleIDs, TimeOfSlot, AvailableAtSlot]`.
///
/// Names and ids are parallel, as are slot times and availability.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PollExport(
    pub Vec<String>,
    pub Vec<PersonId>,
    pub Vec<i64>,
    pub Vec<Vec<PersonId>>,
);

impl PollExport {
    /// Reads and validates an export
    pub fn from_reader<R: Read>(reader: R) -> Result<PollExport> {
        let export: PollExport = serde_json::from_reader(reader)?;
        export.validate()?;
        Ok(export)
    }

    /// # Examples
    /// ```
    /// use zeitfenster::export::PollExport;
    ///
    /// let export = PollExport::from_json(r#"[["Ada"], [7], [0, 900], [[7], []]]"#).unwrap();
    /// assert_eq!(export.names(), ["Ada"]);
    ///
    /// assert!(PollExport::from_json(r#"[["Ada"], [], [], []]"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<PollExport> {
        let export: PollExport = serde_json::from_str(json)?;
        export.validate()?;
        Ok(export)
    }

    /// Checks that the parallel arrays line up
    pub fn validate(&self) -> Result<()> {
        if self.ids().len() != self.names().len() {
            Err(Error::MismatchedLength {
                field: "PeopleIDs",
                expected: self.names().len(),
                found: self.ids().len(),
            })
        } else if self.availability().len() != self.timestamps().len() {
            Err(Error::MismatchedLength {
                field: "AvailableAtSlot",
                expected: self.timestamps().len(),
                found: self.availability().len(),
            })
        } else {
            Ok(())
        }
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn ids(&self) -> &[PersonId] {
        &self.1
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.2
    }

    pub fn availability(&self) -> &[Vec<PersonId>] {
        &self.3
    }

    pub fn people(&self, categories: &CategoryTable) -> PersonDirectory {
        PersonDirectory::new(
            self.names()
                .iter()
                .map(String::as_str)
                .zip(self.ids().iter().copied()),
            categories,
        )
    }

    pub fn slots(&self, slot_length: SlotLength) -> Result<SlotIndex> {
        SlotIndex::from_export(
            self.timestamps(),
            self.availability().iter().map(|ids| ids.iter().copied()),
            slot_length,
        )
    }
}
