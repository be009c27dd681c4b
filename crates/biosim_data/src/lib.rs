//! Plain data records shared between the BioSim crates.
//!
//! Everything here is a passive, serde-friendly description: terrain kinds as
//! they come out of a catalog file, species parameter sets as they come out of
//! a species table, and population records as they are read from or written to
//! `.pop` files. Behaviour lives in `biosim_core`.

pub mod data;

pub use data::population::{AnimalRecord, PopulationRecord};
pub use data::species::{DietKind, SpeciesParams};
pub use data::terrain::TerrainSpec;
