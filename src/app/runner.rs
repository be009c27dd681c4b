//! The yearly driver loop.
//!
//! A run writes one `.dat` row for the start year and one after every step,
//! and the due dumps after every step. Steps continue while the calendar is
//! before the end year.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use biosim_core::RunMetrics;
use biosim_io::reports::{self, DumpIntervals};
use biosim_io::DatReport;

use super::setup::{self, Simulation};

/// Command-line settings applied on top of every run file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub end_year: Option<u32>,
}

/// Drives one simulation from its start year to its end year.
pub struct Runner {
    sim: Simulation,
    metrics: RunMetrics,
    dumps: Vec<PathBuf>,
}

impl Runner {
    #[must_use]
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            metrics: RunMetrics::new(),
            dumps: Vec::new(),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Dump files written so far, in order.
    pub fn dumps(&self) -> &[PathBuf] {
        &self.dumps
    }

    /// Runs every year and returns the path of the yearly series.
    pub fn run(&mut self) -> Result<PathBuf> {
        let run = self.sim.config.run.clone();
        let stem = run.output.as_path();
        reports::create_output_dir(stem)?;

        let dat_path = reports::series_path(stem, "dat");
        let codes = reports::live_terrain_codes(self.sim.world.grid());
        let mut dat = DatReport::create(&dat_path, &self.sim.geography, codes)?;
        dat.write_year(&self.sim.world)?;

        let intervals = DumpIntervals {
            animals: run.dump_animals,
            feed: run.dump_feed,
            population: run.dump_population,
        };

        while self.sim.world.year() < run.end_year {
            let started = Instant::now();
            let summary = self
                .sim
                .world
                .advance_year()
                .with_context(|| format!("Year {} failed", self.sim.world.year()))?;
            self.metrics.record_year(&summary, started.elapsed());

            let written =
                reports::write_dumps(stem, &self.sim.world, &self.sim.geography, intervals)?;
            self.dumps.extend(written);
            dat.write_year(&self.sim.world)?;
        }

        dat.finish()?;
        self.metrics.log_totals(&stem.display().to_string());
        Ok(dat_path)
    }
}

/// Loads, builds and runs one run file.
pub fn run_file(path: &Path, overrides: Overrides) -> Result<Runner> {
    let mut config = setup::load_config(path)?;
    config.apply_overrides(overrides.seed, overrides.end_year);
    config
        .validate()
        .with_context(|| format!("Invalid overrides for {}", path.display()))?;

    tracing::info!(
        file = %path.display(),
        start = config.run.start_year,
        end = config.run.end_year,
        "Starting run"
    );
    let mut runner = Runner::new(setup::build(config)?);
    runner.run()?;
    Ok(runner)
}

/// Runs every file in order and returns how many failed.
///
/// A failed run is logged and does not stop the ones after it.
pub fn run_all(paths: &[PathBuf], overrides: Overrides) -> usize {
    let mut failures = 0;
    for path in paths {
        if let Err(e) = run_file(path, overrides) {
            tracing::error!(file = %path.display(), "Run failed: {e:#}");
            failures += 1;
        }
    }
    failures
}
