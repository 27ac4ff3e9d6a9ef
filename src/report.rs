//! CSV report of the windows found in a poll.
//!
//! Each row describes one window: when it starts and ends, how long it lasts,
//! and who is available. When people have categories, every category seen in
//! any window gets its own column.

use crate::error::Result;
use crate::person::PersonDirectory;
use crate::time::{ctime, format_duration, timestamp_marker};
use crate::window::{Window, WindowSearch};
use chrono::TimeZone;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt::Display;
use std::io::Write;

const HEADINGS: [&str; 5] = ["timestamp", "start", "end", "length", "people"];

/// Names of the people available in a window, overall and per category
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attendance<'a> {
    pub names: Vec<&'a str>,
    pub by_category: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Attendance<'a> {
    /// # Errors
    /// `Error::UnknownPerson` if a participant of `window` is not in `people`
    pub fn new(window: &Window, people: &'a PersonDirectory) -> Result<Attendance<'a>> {
        let mut names = Vec::with_capacity(window.headcount());
        let mut by_category: HashMap<&str, Vec<&str>> = HashMap::new();

        for &id in &window.available {
            let person = people.person(id)?;
            names.push(person.name.as_str());

            if let Some(category) = person.category.as_deref() {
                by_category
                    .entry(category)
                    .or_default()
                    .push(person.name.as_str());
            }
        }

        Ok(Attendance { names, by_category })
    }

    pub fn in_category(&self, category: &str) -> &[&'a str] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// `count (name, name)`, or a bare `0` without names
fn tally(names: &[&str]) -> String {
    if names.is_empty() {
        "0".to_string()
    } else {
        format!("{} ({})", names.len(), names.join(", "))
    }
}

/// Header and rows, ready to be written out
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    /// Renders every window of `search`, showing times in `tz`
    pub fn new<Tz>(search: &WindowSearch, people: &PersonDirectory, tz: &Tz) -> Result<Report>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let header = HEADINGS
            .iter()
            .map(|heading| heading.to_string())
            .chain(search.categories.iter().cloned())
            .collect_vec();

        let rows = search
            .windows
            .iter()
            .map(|window| Report::row(window, &search.categories, people, tz))
            .collect::<Result<Vec<_>>>()?;

        Ok(Report { header, rows })
    }

    fn row<Tz>(
        window: &Window,
        categories: &[String],
        people: &PersonDirectory,
        tz: &Tz,
    ) -> Result<Vec<String>>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let attendance = Attendance::new(window, people)?;
        let start = window.start.with_timezone(tz);
        let end = window.end()?.with_timezone(tz);

        let mut row = Vec::with_capacity(HEADINGS.len() + categories.len());
        row.push(timestamp_marker(&start));
        row.push(ctime(&start));
        row.push(ctime(&end));
        row.push(format_duration(window.duration));

        if categories.is_empty() {
            row.push(tally(&attendance.names));
        } else {
            row.push(attendance.names.len().to_string());
        }

        row.extend(
            categories
                .iter()
                .map(|category| tally(attendance.in_category(category))),
        );

        Ok(row)
    }

    /// Writes the header and rows as CSV, with `\r\n` line endings
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_record(writer, &self.header)?;
        for row in &self.rows {
            write_record(writer, row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_record<W: Write>(writer: &mut W, fields: &[String]) -> Result<()> {
    let record = fields.iter().map(|field| escape_field(field)).join(",");
    write!(writer, "{}\r\n", record)?;
    Ok(())
}

/// Quotes fields holding a comma, quote or line break, doubling any quotes
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
