//! The simulation world.
//!
//! A [`World`] composes the grid, the species catalog, the population and a
//! random source, and advances one year per [`World::advance_year`] call.

mod census;
mod update;

use biosim_data::PopulationRecord;
use serde::Serialize;

use crate::error::Result;
use crate::grid::Grid;
use crate::population::{AnimalId, Population};
use crate::rng::{ChaChaSource, RandomSource};
use crate::species::SpeciesCatalog;

pub use census::CellCensus;

/// Counters collected while advancing one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    /// Calendar year reached by the step.
    pub year: u32,
    pub deaths: usize,
    pub wandered: usize,
    pub births: usize,
    pub herbivores_fed: usize,
    pub predators_fed: usize,
    pub eaten: usize,
    pub herbivores: usize,
    pub predators: usize,
    pub population: usize,
}

/// Outcome of loading population records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementReport {
    pub placed: usize,
    /// Animals whose cell is missing or refuses animals.
    pub rejected: usize,
    /// Animals of species not in the catalog.
    pub unknown: usize,
}

impl PlacementReport {
    pub fn merge(&mut self, other: Self) {
        self.placed += other.placed;
        self.rejected += other.rejected;
        self.unknown += other.unknown;
    }
}

pub struct World<R: RandomSource = ChaChaSource> {
    year: u32,
    grid: Grid,
    catalog: SpeciesCatalog,
    population: Population,
    rng: R,
}

impl<R: RandomSource> std::fmt::Debug for World<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("year", &self.year)
            .field("cells", &self.grid.len())
            .field("species", &self.catalog.len())
            .field("population", &self.population.len())
            .finish_non_exhaustive()
    }
}

impl<R: RandomSource> World<R> {
    pub fn new(grid: Grid, catalog: SpeciesCatalog, rng: R) -> Self {
        Self {
            year: 0,
            grid,
            catalog,
            population: Population::new(),
            rng,
        }
    }

    #[must_use]
    pub fn with_start_year(mut self, year: u32) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub fn year(&self) -> u32 {
        self.year
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Places one animal. `Ok(None)` if the location cannot hold it.
    pub fn insert_animal(
        &mut self,
        species: &str,
        x: u32,
        y: u32,
        age: u32,
        weight: f64,
    ) -> Result<Option<AnimalId>> {
        self.population
            .insert(&mut self.grid, &self.catalog, species, x, y, age, weight)
    }

    /// Places every animal in `records`.
    ///
    /// Records naming an unknown species are skipped with a warning; any
    /// other error aborts the load.
    pub fn load_population(&mut self, records: &[PopulationRecord]) -> Result<PlacementReport> {
        let mut report = PlacementReport::default();
        for record in records {
            let species = match self.catalog.lookup(&record.species) {
                Ok(id) => id,
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(
                        species = %record.species,
                        x = record.x,
                        y = record.y,
                        headcount = record.headcount(),
                        "Skipping population record: {e}"
                    );
                    report.unknown += record.headcount();
                    continue;
                }
                Err(e) => return Err(e),
            };
            let Some(cell) = self.grid.at(record.x, record.y) else {
                report.rejected += record.headcount();
                continue;
            };
            for animal in &record.animals {
                match self.population.place(
                    &mut self.grid,
                    species,
                    cell,
                    animal.age,
                    animal.weight,
                ) {
                    Some(_) => report.placed += 1,
                    None => report.rejected += 1,
                }
            }
        }
        tracing::debug!(
            placed = report.placed,
            rejected = report.rejected,
            unknown = report.unknown,
            "Population loaded"
        );
        Ok(report)
    }

    /// Runs the four passes of one year and moves the calendar forward.
    ///
    /// An error means an animal handle went stale mid-pass; the world is left
    /// as it was at the failure point.
    pub fn advance_year(&mut self) -> Result<YearSummary> {
        let mut summary = YearSummary::default();

        self.pass_aging_and_death(&mut summary)?;
        let cells = self.pass_wander_and_regrowth(&mut summary)?;
        self.pass_breeding(&cells, &mut summary)?;
        self.pass_feeding(&mut summary)?;

        self.year += 1;
        let (herbivores, predators) = self.diet_counts();
        summary.year = self.year;
        summary.herbivores = herbivores;
        summary.predators = predators;
        summary.population = self.population.len();

        tracing::info!(
            year = summary.year,
            herbivores = summary.herbivores,
            predators = summary.predators,
            births = summary.births,
            deaths = summary.deaths,
            eaten = summary.eaten,
            "Year complete"
        );
        Ok(summary)
    }
}
