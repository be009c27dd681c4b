//! Run configuration.
//!
//! One TOML file describes one simulation run: the calendar, the seed, the
//! output stem and dump intervals, where the map and its terrain catalog come
//! from, the species taking part and the initial population files.
//!
//! ## Example
//!
//! ```toml
//! species_files = ["predator.toml"]
//! populations = ["initial.pop"]
//!
//! [run]
//! start_year = 0
//! end_year = 100
//! seed = 42
//! output = "out/island"
//! dump_animals = 10
//!
//! [map]
//! geography = "island.geo"
//! classic = { alpha = 0.3, fmax_savannah = 300.0, fmax_jungle = 800.0 }
//!
//! [[species]]
//! name = "Herbivore"
//! birth_weight = 6.0
//! # ...
//! ```
//!
//! Relative paths are resolved against the directory of the file they were
//! read from.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use biosim_data::{SpeciesParams, TerrainSpec};
use serde::{Deserialize, Serialize};

/// Calendar, seed and output settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub start_year: u32,
    /// Calendar year the run stops at. The last year stepped is the one before.
    pub end_year: u32,
    pub seed: u64,
    /// Output stem: reports are written as `<stem>.dat`, `<stem>_<year>.dyr`, ...
    pub output: PathBuf,
    /// Interval of `.dyr` density dumps, 0 disables them.
    pub dump_animals: u32,
    /// Interval of `.for` feed dumps.
    pub dump_feed: u32,
    /// Interval of `.pop` population dumps.
    pub dump_population: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_year: 0,
            end_year: 100,
            seed: 0,
            output: PathBuf::from("biosim"),
            dump_animals: 0,
            dump_feed: 0,
            dump_population: 0,
        }
    }
}

/// Parameters of the classic five-terrain catalog.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ClassicTerrain {
    pub alpha: f64,
    pub fmax_savannah: f64,
    pub fmax_jungle: f64,
}

impl ClassicTerrain {
    #[must_use]
    pub fn specs(&self) -> Vec<TerrainSpec> {
        TerrainSpec::classic(self.alpha, self.fmax_savannah, self.fmax_jungle)
    }
}

/// Map file and terrain catalog source.
///
/// Exactly one of `classic`, `classic_file`, `spec` or `terrain` must be set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub geography: PathBuf,
    pub classic: Option<ClassicTerrain>,
    /// Classic catalog parameters in a `key value` text file.
    pub classic_file: Option<PathBuf>,
    /// Extended per-code terrain table.
    pub spec: Option<PathBuf>,
    pub terrain: Vec<TerrainSpec>,
}

impl MapConfig {
    fn terrain_sources(&self) -> usize {
        usize::from(self.classic.is_some())
            + usize::from(self.classic_file.is_some())
            + usize::from(self.spec.is_some())
            + usize::from(!self.terrain.is_empty())
    }
}

/// A complete run description.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Species tables stored in separate TOML files.
    pub species_files: Vec<PathBuf>,
    /// Initial population files, loaded in order.
    pub populations: Vec<PathBuf>,
    pub run: RunConfig,
    pub map: MapConfig,
    pub species: Vec<SpeciesParams>,
}

impl SimConfig {
    /// Reads, resolves and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Makes every relative path relative to `base` instead.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() && !p.as_os_str().is_empty() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.run.output);
        resolve(&mut self.map.geography);
        if let Some(p) = self.map.classic_file.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.map.spec.as_mut() {
            resolve(p);
        }
        self.species_files.iter_mut().for_each(resolve);
        self.populations.iter_mut().for_each(resolve);
    }

    /// Applies command-line overrides.
    pub fn apply_overrides(&mut self, seed: Option<u64>, end_year: Option<u32>) {
        if let Some(seed) = seed {
            self.run.seed = seed;
        }
        if let Some(end_year) = end_year {
            self.run.end_year = end_year;
        }
    }

    /// Number of yearly steps the run will take.
    #[must_use]
    pub fn years(&self) -> u32 {
        self.run.end_year.saturating_sub(self.run.start_year)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description of the first failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.run.end_year >= self.run.start_year,
            "End year {} is before start year {}",
            self.run.end_year,
            self.run.start_year
        );
        anyhow::ensure!(
            !self.run.output.as_os_str().is_empty(),
            "Output stem must not be empty"
        );
        anyhow::ensure!(
            !self.map.geography.as_os_str().is_empty(),
            "A geography file is required"
        );

        let sources = self.map.terrain_sources();
        anyhow::ensure!(sources > 0, "No terrain catalog given");
        anyhow::ensure!(
            sources == 1,
            "Terrain catalog given {sources} ways, expected exactly one"
        );
        if let Some(classic) = &self.map.classic {
            anyhow::ensure!(
                (0.0..=1.0).contains(&classic.alpha),
                "Savannah regrowth alpha must be in [0, 1]"
            );
            anyhow::ensure!(
                classic.fmax_savannah >= 0.0 && classic.fmax_jungle >= 0.0,
                "Maximum feed must be non-negative"
            );
        }

        anyhow::ensure!(
            !self.species.is_empty() || !self.species_files.is_empty(),
            "At least one species is required"
        );
        for species in &self.species {
            let missing = species.missing_fields();
            anyhow::ensure!(
                missing.is_empty(),
                "Species {} is missing {}",
                species.name.as_deref().unwrap_or("<unnamed>"),
                missing.join(", ")
            );
        }
        Ok(())
    }
}
