//! Turning a configuration file into a ready-to-run world.

use std::path::Path;

use anyhow::{Context, Result};
use biosim_core::config::SimConfig;
use biosim_core::world::PlacementReport;
use biosim_core::{ChaChaSource, World};
use biosim_io::legacy;

/// Reads a run file. `.toml` files are run configurations, anything else is
/// read as a classic `.sim` parameter file.
pub fn load_config(path: &Path) -> Result<SimConfig> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        SimConfig::load(path)
    } else {
        legacy::read_sim(path).with_context(|| format!("Failed to load {}", path.display()))
    }
}

/// A world together with the configuration it was built from.
#[derive(Debug)]
pub struct Simulation {
    pub config: SimConfig,
    pub world: World,
    /// Map name written into report headers.
    pub geography: String,
    pub placement: PlacementReport,
}

/// Builds the world described by `config`, initial populations included.
pub fn build(config: SimConfig) -> Result<Simulation> {
    let grid = biosim_io::load_grid(&config.map)
        .with_context(|| format!("Failed to load map {}", config.map.geography.display()))?;
    let catalog = biosim_io::load_catalog(&config).context("Failed to load species")?;

    let rng = ChaChaSource::new(config.run.seed);
    let mut world = World::new(grid, catalog, rng).with_start_year(config.run.start_year);

    let mut placement = PlacementReport::default();
    for path in &config.populations {
        let file = biosim_io::read_population(path)
            .with_context(|| format!("Failed to read population {}", path.display()))?;
        let report = world
            .load_population(&file.records)
            .with_context(|| format!("Failed to place population {}", path.display()))?;
        placement.merge(report);
    }
    if placement.rejected > 0 || placement.unknown > 0 {
        tracing::warn!(
            rejected = placement.rejected,
            unknown = placement.unknown,
            "Some animals could not be placed"
        );
    }

    let geography = config
        .map
        .geography
        .file_name()
        .map_or_else(
            || config.map.geography.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

    tracing::info!(
        cells = world.grid().len(),
        live = world.grid().live_count(),
        species = world.catalog().len(),
        animals = placement.placed,
        seed = config.run.seed,
        "World ready"
    );

    Ok(Simulation {
        config,
        world,
        geography,
        placement,
    })
}
