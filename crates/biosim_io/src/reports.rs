//! Yearly reports and periodic dumps.
//!
//! All outputs share one stem: the yearly series goes to `<stem>.dat` and the
//! dumps to `<stem>_<year>.<ext>` with the year zero-padded to five digits.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use biosim_core::grid::Grid;
use biosim_core::rng::RandomSource;
use biosim_core::world::World;
use biosim_data::DietKind;

use crate::error::{IoError, Result};
use crate::population::write_population;

/// `<stem>_<year:05>.<ext>`
#[must_use]
pub fn dump_path(stem: &Path, year: u32, ext: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(format!("_{year:05}.{ext}"));
    PathBuf::from(name)
}

/// `<stem>.<ext>`
#[must_use]
pub fn series_path(stem: &Path, ext: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(format!(".{ext}"));
    PathBuf::from(name)
}

/// Creates every directory leading up to the output stem.
pub fn create_output_dir(stem: &Path) -> Result<()> {
    match stem.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).map_err(|e| {
            IoError::from(e).with_context(format!("creating {}", dir.display()))
        }),
        _ => Ok(()),
    }
}

/// Whether a dump with `interval` is due in `year`. Interval 0 never is.
#[must_use]
pub fn is_due(year: u32, interval: u32) -> bool {
    interval != 0 && year % interval == 0
}

/// Live terrain codes in catalog order, the `.dat` column groups.
#[must_use]
pub fn live_terrain_codes(grid: &Grid) -> Vec<char> {
    grid.terrains()
        .iter()
        .filter(|t| t.is_live())
        .map(|t| t.code())
        .collect()
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| IoError::from(e).with_context(format!("creating {}", path.display())))
}

/// The yearly population series: one line per year with herbivore and
/// predator counts for each live terrain.
pub struct DatReport<W: Write> {
    out: W,
    codes: Vec<char>,
}

impl DatReport<BufWriter<File>> {
    pub fn create(path: &Path, geography: &str, codes: Vec<char>) -> Result<Self> {
        Self::new(create(path)?, geography, codes)
    }
}

impl<W: Write> DatReport<W> {
    pub fn new(mut out: W, geography: &str, codes: Vec<char>) -> Result<Self> {
        writeln!(out, "#")?;
        writeln!(out, "Geografi     {geography}")?;
        write!(out, "#Year")?;
        for code in &codes {
            write!(out, "{:>8}{:>8}", format!("B/{code}"), format!("R/{code}"))?;
        }
        writeln!(out)?;
        Ok(Self { out, codes })
    }

    pub fn write_year<R: RandomSource>(&mut self, world: &World<R>) -> Result<()> {
        let counts = world.counts_by_diet_and_terrain();
        let count = |kind: DietKind, code: char| counts.get(&(kind, code)).copied().unwrap_or(0);
        write!(self.out, "{:>5}", world.year())?;
        for &code in &self.codes {
            write!(
                self.out,
                "{:>8}{:>8}",
                count(DietKind::Herbivore, code),
                count(DietKind::Predator, code)
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Per-cell herbivore and predator counts, a blank line after each row.
pub fn write_density<W: Write, R: RandomSource>(
    out: &mut W,
    world: &World<R>,
    geography: &str,
) -> Result<()> {
    writeln!(out, "#")?;
    writeln!(out, "Geografi     {geography}")?;
    writeln!(out, "#    herb    pred")?;
    let cols = world.grid().cols() as usize;
    let cells = world.grid().all_cells();
    for (i, &cell) in cells.iter().enumerate() {
        let census = world.cell_census(cell);
        writeln!(out, "{:>8}{:>8}", census.herbivores, census.predators)?;
        if (i + 1) % cols == 0 {
            writeln!(out)?;
        }
    }
    writeln!(out, "# cells: {}", cells.len())?;
    Ok(())
}

/// Per-cell feed stock, same layout as [`write_density`].
pub fn write_feed<W: Write, R: RandomSource>(
    out: &mut W,
    world: &World<R>,
    geography: &str,
) -> Result<()> {
    writeln!(out, "#")?;
    writeln!(out, "Geografi     {geography}")?;
    writeln!(out, "# feed")?;
    let cols = world.grid().cols() as usize;
    let levels = world.feed_levels();
    for (i, (_, feed)) in levels.iter().enumerate() {
        writeln!(out, "{feed:>9.2}")?;
        if (i + 1) % cols == 0 {
            writeln!(out)?;
        }
    }
    writeln!(out, "# cells: {}", levels.len())?;
    Ok(())
}

/// Writes the due dumps for the world's current year next to `stem`.
pub fn write_dumps<R: RandomSource>(
    stem: &Path,
    world: &World<R>,
    geography: &str,
    intervals: DumpIntervals,
) -> Result<Vec<PathBuf>> {
    let year = world.year();
    let mut written = Vec::new();
    if is_due(year, intervals.animals) {
        let path = dump_path(stem, year, "dyr");
        let mut out = create(&path)?;
        write_density(&mut out, world, geography)?;
        out.flush()?;
        written.push(path);
    }
    if is_due(year, intervals.feed) {
        let path = dump_path(stem, year, "for");
        let mut out = create(&path)?;
        write_feed(&mut out, world, geography)?;
        out.flush()?;
        written.push(path);
    }
    if is_due(year, intervals.population) {
        let path = dump_path(stem, year, "pop");
        let mut out = create(&path)?;
        write_population(&mut out, Some(geography), &world.population_records())?;
        out.flush()?;
        written.push(path);
    }
    for path in &written {
        tracing::debug!(year, file = %path.display(), "Dump written");
    }
    Ok(written)
}

/// Dump intervals in years; 0 disables a dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpIntervals {
    pub animals: u32,
    pub feed: u32,
    pub population: u32,
}
