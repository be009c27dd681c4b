//! Classic `.sim` run descriptions.
//!
//! A `.sim` file is a parameter file naming the map (`Geografi`), one terrain
//! catalog (`CelleParameter` or `CelleSpec`), species files (`ArtParameter`,
//! repeatable, then `BytteParameter` and `RovdyrParameter`), population files
//! (`Populasjon`, repeatable), the calendar (`StartAar`, `SluttAar`, both
//! inclusive), the seed (`SlumptallFroe`), the output stem (`UtdataStamme`)
//! and dump intervals (`DumpDyrInterval`, `DumpForInterval`, `DumpPopInterval`).
//! It converts to the same [`SimConfig`] as a TOML run file.

use std::path::{Path, PathBuf};

use biosim_core::config::{MapConfig, RunConfig, SimConfig};

use crate::error::{IoError, Result};
use crate::params::ParamFile;

fn path_param(params: &ParamFile, key: &str) -> Option<PathBuf> {
    params.get(key).map(|e| PathBuf::from(&e.value))
}

pub fn sim_from_params(params: &ParamFile) -> Result<SimConfig> {
    let geography = path_param(params, "Geografi")
        .ok_or_else(|| IoError::validation(format!("{}: missing Geografi", params.source())))?;

    // CelleParameter wins over CelleSpec when both are given.
    let classic_file = path_param(params, "CelleParameter");
    let spec = if classic_file.is_some() {
        None
    } else {
        path_param(params, "CelleSpec")
    };

    let species_files = params
        .get_all("ArtParameter")
        .chain(params.get_all("BytteParameter"))
        .chain(params.get_all("RovdyrParameter"))
        .map(|e| PathBuf::from(&e.value))
        .collect();
    let populations = params
        .get_all("Populasjon")
        .map(|e| PathBuf::from(&e.value))
        .collect();

    let defaults = RunConfig::default();
    let run = RunConfig {
        start_year: params.require("StartAar")?,
        // SluttAar is the last year stepped, end_year the year the run stops at.
        end_year: params.require::<u32>("SluttAar")?.saturating_add(1),
        seed: params.value("SlumptallFroe")?.unwrap_or(defaults.seed),
        output: path_param(params, "UtdataStamme").ok_or_else(|| {
            IoError::validation(format!("{}: missing UtdataStamme", params.source()))
        })?,
        dump_animals: params.value("DumpDyrInterval")?.unwrap_or(0),
        dump_feed: params.value("DumpForInterval")?.unwrap_or(0),
        dump_population: params.value("DumpPopInterval")?.unwrap_or(0),
    };

    Ok(SimConfig {
        species_files,
        populations,
        run,
        map: MapConfig {
            geography,
            classic: None,
            classic_file,
            spec,
            terrain: Vec::new(),
        },
        species: Vec::new(),
    })
}

/// Reads a `.sim` file, resolving its paths against the file's directory.
pub fn read_sim(path: impl AsRef<Path>) -> Result<SimConfig> {
    let path = path.as_ref();
    let mut config = sim_from_params(&ParamFile::read(path)?)?;
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }
    config
        .validate()
        .map_err(|e| IoError::validation(format!("{}: {e:#}", path.display())))?;
    Ok(config)
}
