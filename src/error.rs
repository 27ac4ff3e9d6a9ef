use crate::person::PersonId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid duration '{0}'. Expected H:MM")]
    InvalidDuration(String),
    #[error("Category file line {line} has no tab separated category")]
    MissingCategory { line: usize },
    #[error("Unsupported length of {field}. Expected {expected}, got {found}")]
    MismatchedLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Slot timestamp {0} is out of range")]
    InvalidTimestamp(i64),
    #[error("Person {0} is available in a window but missing from the people list")]
    UnknownPerson(PersonId),
    #[error("Could not read poll export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
