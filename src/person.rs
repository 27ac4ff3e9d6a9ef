use crate::error::{Error, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque identifier of a poll participant, stable within one export
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub category: Option<String>,
}

impl Person {
    pub fn new(id: PersonId, name: &str, category: Option<&str>) -> Person {
        Person {
            id,
            name: name.to_string(),
            category: category.map(str::to_string),
        }
    }
}

/// Name to category lookup, loaded from a `<name>\t<category>` file
#[derive(Clone, Debug, Default)]
pub struct CategoryTable {
    categories: HashMap<String, String>,
}

impl CategoryTable {
    /// Parses one `<name>\t<category>` entry per line.
    /// The category is the second tab separated field, with trailing whitespace
    /// trimmed. Any further fields are ignored.
    ///
    /// # Errors
    /// `Error::MissingCategory` with the 1-based line number when a line has no
    /// tab, blank lines included.
    ///
    /// # Examples
    /// ```
    /// use zeitfenster::person::CategoryTable;
    ///
    /// let table = CategoryTable::parse("Ada\tStaff\nGrace\tGuest \n").unwrap();
    /// assert_eq!(table.get("Grace"), Some("Guest"));
    /// assert_eq!(table.get("Alan"), None);
    ///
    /// assert!(CategoryTable::parse("Ada Staff").is_err());
    /// ```
    pub fn parse(contents: &str) -> Result<CategoryTable> {
        let mut categories = HashMap::new();

        for (index, line) in contents.lines().enumerate() {
            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or_default();
            let category = fields
                .next()
                .ok_or(Error::MissingCategory { line: index + 1 })?;

            trace!("category {:?} -> {:?}", name, category.trim_end());
            categories.insert(name.to_string(), category.trim_end().to_string());
        }

        debug!("loaded {} categorized people", categories.len());
        Ok(CategoryTable { categories })
    }

    /// The category of `name`, if it has a non-empty one
    pub fn get(&self, name: &str) -> Option<&str> {
        self.categories
            .get(name)
            .map(String::as_str)
            .filter(|category| !category.is_empty())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Every person of a poll, keyed by identifier
#[derive(Clone, Debug, Default)]
pub struct PersonDirectory {
    people: HashMap<PersonId, Person>,
}

impl PersonDirectory {
    /// Joins the poll's `(name, id)` pairs with `categories` by name.
    /// Names without a category, and categories without a person, are ignored.
    pub fn new<'a, I>(people: I, categories: &CategoryTable) -> PersonDirectory
    where
        I: IntoIterator<Item = (&'a str, PersonId)>,
    {
        let people: HashMap<PersonId, Person> = people
            .into_iter()
            .map(|(name, id)| (id, Person::new(id, name, categories.get(name))))
            .collect();

        debug!(
            "{} people, {} with a category",
            people.len(),
            people.values().filter(|p| p.category.is_some()).count()
        );

        PersonDirectory { people }
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    /// Like `get`, but a missing person is an error
    pub fn person(&self, id: PersonId) -> Result<&Person> {
        self.get(id).ok_or(Error::UnknownPerson(id))
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
