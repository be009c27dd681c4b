//! BioSim: predator/prey population dynamics on a grid island.
//!
//! The simulation engine lives in `biosim_core` and the file formats in
//! `biosim_io`; this crate wires them into runs driven from the command line.

/// Run setup and the yearly driver loop.
pub mod app;

