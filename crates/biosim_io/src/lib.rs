//! # BioSim IO
//!
//! File formats of the BioSim simulation.
//!
//! This crate provides:
//! - Structured error handling with file and line context
//! - Map loading (`.geo` grids, `.spec` terrain tables, classic terrain parameters)
//! - Species loading (TOML tables or classic `key value` parameter files)
//! - Population files (`.pop`), read and written
//! - Report writers (`.dat`, `.dyr`, `.for`) and output directory handling
//! - Classic `.sim` run descriptions

/// Error types and result aliases for I/O operations
pub mod error;
/// Classic `.sim` run descriptions
pub mod legacy;
/// Map and terrain catalog loaders
pub mod map;
/// `key value` parameter files
pub mod params;
/// Population file reader and writer
pub mod population;
/// Yearly reports and dump files
pub mod reports;
/// Species file loaders and catalog assembly
pub mod species;

pub use error::{IoError, Result};
pub use map::{load_grid, load_terrains, parse_geo, parse_spec_table, read_geo};
pub use population::{parse_population, read_population, write_population, PopulationFile};
pub use reports::{create_output_dir, dump_path, series_path, DatReport};
pub use species::{load_catalog, read_species_file};
