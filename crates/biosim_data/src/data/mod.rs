//! Core data records for the BioSim simulation.

pub mod population;
pub mod species;
pub mod terrain;
