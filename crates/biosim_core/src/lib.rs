//! # BioSim Core
//!
//! The annual-cycle engine of the BioSim predator/prey island simulation.
//!
//! This crate contains the deterministic simulation logic:
//! - Terrain catalog and the cell grid with its fixed neighbour topology
//! - Species descriptors with the fitness and decision probability formulas
//! - The animal arena and per-animal behaviours (aging, death, wandering,
//!   breeding, grazing, hunting)
//! - The four-pass yearly step that ties everything together
//! - Read-only census queries used by report writers
//!
//! ## Architecture
//!
//! Ownership is split by arena: the [`grid::Grid`] owns cells, the
//! [`population::Population`] owns animals, and the two refer to each other
//! only through handles. Shared descriptors (terrain kinds, species) are
//! interned once and referenced by id. Every [`world::World`] owns its own
//! random stream, so independent runs never share mutable state.
//!
//! ## Example
//!
//! ```
//! use biosim_core::grid::Grid;
//! use biosim_core::rng::ChaChaSource;
//! use biosim_core::species::SpeciesCatalog;
//! use biosim_core::world::World;
//! use biosim_data::TerrainSpec;
//!
//! let grid = Grid::from_rows(
//!     TerrainSpec::classic(0.3, 300.0, 800.0),
//!     &["HHHH", "HJSH", "HHHH"],
//! )
//! .unwrap();
//! let mut world = World::new(grid, SpeciesCatalog::new(), ChaChaSource::new(42));
//! let summary = world.advance_year().unwrap();
//! assert_eq!(summary.population, 0);
//! ```

/// Run configuration loaded from TOML
pub mod config;
/// Error taxonomy shared by all core operations
pub mod error;
/// Terrain catalog, cells and grid topology
pub mod grid;
/// Logging initialisation and run-level counters
pub mod metrics;
/// Animal arena and per-animal behaviours
pub mod population;
/// Randomness contract and its implementations
pub mod rng;
/// Species descriptors, fitness and decision probabilities
pub mod species;
/// The simulation world and its yearly cycle
pub mod world;

pub use error::{Result, SimError};
pub use grid::{CellId, Grid, GridBuilder, TerrainId};
pub use metrics::{init_logging, RunMetrics};
pub use population::{Animal, AnimalId, Population};
pub use rng::{ChaChaSource, RandomSource, ReplaySource};
pub use species::{Species, SpeciesCatalog, SpeciesId};
pub use world::{World, YearSummary};
