//! Population files (`.pop`).
//!
//! ```text
//! # population
//! Geografi island.geo
//! Herbivore 3 4 2
//!   5  20.000
//!   1   8.500
//! ```
//!
//! An optional `Geografi` header names the map; each block gives a species,
//! a location and a headcount, followed by one `age weight` line per animal.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use biosim_data::{AnimalRecord, PopulationRecord};

use crate::error::{IoError, Result};
use crate::params::{source_name, tokens};

/// Contents of a population file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationFile {
    pub geography: Option<String>,
    pub records: Vec<PopulationRecord>,
}

impl PopulationFile {
    #[must_use]
    pub fn headcount(&self) -> usize {
        self.records.iter().map(PopulationRecord::headcount).sum()
    }
}

struct Cursor<'a> {
    source: &'a str,
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(|&(_, text)| text)
    }

    fn next(&mut self, what: &str) -> Result<(usize, &'a str)> {
        let end_line = self.tokens.last().map_or(0, |&(line, _)| line);
        let token = self.tokens.get(self.pos).copied().ok_or_else(|| {
            IoError::parse(
                self.source,
                end_line,
                format!("unexpected end of file, expected {what}"),
            )
        })?;
        self.pos += 1;
        Ok(token)
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let (line, text) = self.next(what)?;
        text.parse()
            .map_err(|_| IoError::parse(self.source, line, format!("invalid {what}: {text}")))
    }
}

pub fn parse_population(content: &str, source: &str) -> Result<PopulationFile> {
    let mut cursor = Cursor {
        source,
        tokens: tokens(content),
        pos: 0,
    };
    let mut file = PopulationFile::default();

    if cursor.peek() == Some("Geografi") {
        cursor.next("Geografi")?;
        let (_, name) = cursor.next("map name")?;
        file.geography = Some(name.to_string());
    }

    while !cursor.is_done() {
        let (_, species) = cursor.next("species")?;
        let x: u32 = cursor.number("x coordinate")?;
        let y: u32 = cursor.number("y coordinate")?;
        let headcount: usize = cursor.number("headcount")?;
        let mut record = PopulationRecord::new(species, x, y);
        for _ in 0..headcount {
            let age: u32 = cursor.number("age")?;
            let weight: f64 = cursor.number("weight")?;
            record.animals.push(AnimalRecord { age, weight });
        }
        file.records.push(record);
    }

    Ok(file)
}

pub fn read_population(path: impl AsRef<Path>) -> Result<PopulationFile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| IoError::from(e).with_context(format!("reading {}", path.display())))?;
    let file = parse_population(&content, &source_name(path))?;
    tracing::debug!(
        file = %path.display(),
        records = file.records.len(),
        animals = file.headcount(),
        "Population file read"
    );
    Ok(file)
}

/// Writes records in the format [`parse_population`] reads.
pub fn write_population<W: Write>(
    out: &mut W,
    geography: Option<&str>,
    records: &[PopulationRecord],
) -> Result<()> {
    writeln!(out, "# population")?;
    if let Some(geography) = geography {
        writeln!(out, "Geografi     {geography}")?;
    }
    for record in records {
        writeln!(
            out,
            "{} {} {} {}",
            record.species,
            record.x,
            record.y,
            record.headcount()
        )?;
        for animal in &record.animals {
            writeln!(out, "{:>3}{:>9.3}", animal.age, animal.weight)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
