//! Species files and catalog assembly.
//!
//! Species tables are TOML (`*.toml`) or classic parameter files with one
//! `key value` pair per line (`Navn`, `v_fod`, `a_halv`, `F`, `DeltaPhiMax`,
//! ...). Both spellings of each key are accepted in both formats.

use std::fs;
use std::path::Path;

use biosim_core::config::SimConfig;
use biosim_core::species::SpeciesCatalog;
use biosim_data::SpeciesParams;

use crate::error::{IoError, Result};
use crate::params::{source_name, ParamFile};

/// Keys read as text even when the value looks like a number.
const TEXT_KEYS: &[&str] = &["Navn", "name"];

pub fn parse_species_toml(content: &str) -> Result<SpeciesParams> {
    Ok(toml::from_str(content)?)
}

pub fn parse_species_params(content: &str, source: &str) -> Result<SpeciesParams> {
    let params = ParamFile::parse(content, source)?;
    toml::Value::Table(params.to_toml_table(TEXT_KEYS))
        .try_into()
        .map_err(|e: toml::de::Error| IoError::from(e).with_context(source.to_string()))
}

/// Reads a species table, choosing the format by extension.
pub fn read_species_file(path: impl AsRef<Path>) -> Result<SpeciesParams> {
    let path = path.as_ref();
    let source = source_name(path);
    let content = fs::read_to_string(path)
        .map_err(|e| IoError::from(e).with_context(format!("reading {source}")))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        parse_species_toml(&content).map_err(|e| e.with_context(source))
    } else {
        parse_species_params(&content, &source)
    }
}

/// Registers the inline species of `config`, then those of its species files,
/// in order.
pub fn load_catalog(config: &SimConfig) -> Result<SpeciesCatalog> {
    let mut catalog = SpeciesCatalog::new();
    for params in &config.species {
        catalog.register(params)?;
    }
    for path in &config.species_files {
        let params = read_species_file(path)?;
        catalog
            .register(&params)
            .map_err(|e| IoError::from(e).with_context(source_name(path)))?;
    }
    if catalog.is_empty() {
        return Err(IoError::validation("no species configured"));
    }
    tracing::debug!(species = catalog.len(), "Species catalog loaded");
    Ok(catalog)
}
