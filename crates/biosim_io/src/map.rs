//! Map and terrain catalog loaders.
//!
//! A `.geo` file starts with `Rader <rows>` and `Kolonner <cols>` header
//! lines in either order, followed by `rows * cols` terrain codes read row by
//! row. Whitespace between codes is ignored.
//!
//! A `.spec` terrain table has one terrain per line:
//! `code alpha max_feed live rrggbb`, where `live` is `0` or `1` and the
//! colour is optional.

use std::fs;
use std::path::Path;

use biosim_core::config::{ClassicTerrain, MapConfig};
use biosim_core::grid::{Grid, GridBuilder};
use biosim_data::TerrainSpec;

use crate::error::{IoError, Result};
use crate::params::{significant_lines, source_name, ParamFile};

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| IoError::from(e).with_context(format!("reading {}", path.display())))
}

/// Builds a grid from `.geo` text over the given terrain catalog.
pub fn parse_geo(content: &str, terrains: Vec<TerrainSpec>, source: &str) -> Result<Grid> {
    let mut rows: Option<u32> = None;
    let mut cols: Option<u32> = None;
    let mut lines = significant_lines(content);

    for (line, text) in lines.by_ref() {
        let mut words = text.split_whitespace();
        let key = words.next().unwrap_or_default();
        let value = words.next().and_then(|v| v.parse::<u32>().ok());
        match (key, value) {
            ("Rader", Some(v)) => rows = Some(v),
            ("Kolonner", Some(v)) => cols = Some(v),
            _ => {
                return Err(IoError::parse(
                    source,
                    line,
                    format!("expected `Rader <n>` or `Kolonner <n>`, found `{text}`"),
                ))
            }
        }
        if rows.is_some() && cols.is_some() {
            break;
        }
    }
    let (Some(rows), Some(cols)) = (rows, cols) else {
        return Err(IoError::parse(source, 0, "missing map dimensions"));
    };
    if rows == 0 || cols == 0 {
        return Err(IoError::parse(source, 0, "map has no cells"));
    }

    let mut builder = GridBuilder::new(terrains)?;
    let expected = rows as usize * cols as usize;
    let mut placed = 0usize;
    let mut last_line = 0;
    'rows: for (line, text) in lines {
        last_line = line;
        for code in text.chars().filter(|c| !c.is_whitespace()) {
            if placed == expected {
                tracing::warn!(file = source, line, "Ignoring terrain codes past the map size");
                break 'rows;
            }
            let x = (placed % cols as usize) as u32;
            let y = (placed / cols as usize) as u32;
            builder
                .build_cell(x, y, code)
                .map_err(|e| IoError::parse(source, line, e.to_string()))?;
            placed += 1;
        }
    }
    if placed < expected {
        return Err(IoError::parse(
            source,
            last_line,
            format!("map truncated: {placed} of {expected} cells"),
        ));
    }

    let grid = builder.finish()?;
    tracing::debug!(file = source, rows, cols, live = grid.live_count(), "Map loaded");
    Ok(grid)
}

pub fn read_geo(path: impl AsRef<Path>, terrains: Vec<TerrainSpec>) -> Result<Grid> {
    let path = path.as_ref();
    parse_geo(&read_text(path)?, terrains, &source_name(path))
}

fn parse_color(text: &str) -> Option<[u8; 3]> {
    if text.len() != 6 || !text.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&text[i..i + 2], 16).ok();
    Some([byte(0)?, byte(2)?, byte(4)?])
}

/// Parses an extended terrain table.
pub fn parse_spec_table(content: &str, source: &str) -> Result<Vec<TerrainSpec>> {
    let mut specs = Vec::new();
    for (line, text) in significant_lines(content) {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if !(4..=5).contains(&fields.len()) {
            return Err(IoError::parse(
                source,
                line,
                format!("expected `code alpha max_feed live [rrggbb]`, found `{text}`"),
            ));
        }
        let mut code_chars = fields[0].chars();
        let (Some(code), None) = (code_chars.next(), code_chars.next()) else {
            return Err(IoError::parse(
                source,
                line,
                format!("terrain code must be one character: {}", fields[0]),
            ));
        };
        let number = |i: usize, what: &str| {
            fields[i].parse::<f64>().map_err(|_| {
                IoError::parse(source, line, format!("invalid {what}: {}", fields[i]))
            })
        };
        let alpha = number(1, "alpha")?;
        let max_feed = number(2, "max feed")?;
        let live = match fields[3] {
            "0" | "false" => false,
            "1" | "true" => true,
            other => {
                return Err(IoError::parse(
                    source,
                    line,
                    format!("invalid live flag: {other}"),
                ))
            }
        };
        let mut spec = TerrainSpec::new(code, alpha, max_feed, live);
        if let Some(color) = fields.get(4) {
            let rgb = parse_color(color).ok_or_else(|| {
                IoError::parse(source, line, format!("malformed colour: {color}"))
            })?;
            spec = spec.with_color(rgb);
        }
        specs.push(spec);
    }
    if specs.is_empty() {
        return Err(IoError::parse(source, 0, "terrain table is empty"));
    }
    Ok(specs)
}

pub fn read_spec_table(path: impl AsRef<Path>) -> Result<Vec<TerrainSpec>> {
    let path = path.as_ref();
    parse_spec_table(&read_text(path)?, &source_name(path))
}

/// Reads classic catalog parameters (`alpha`, `fmax_sav`, `fmax_jngl`).
pub fn read_classic_params(path: impl AsRef<Path>) -> Result<ClassicTerrain> {
    classic_from_params(&ParamFile::read(path)?)
}

pub fn classic_from_params(params: &ParamFile) -> Result<ClassicTerrain> {
    Ok(ClassicTerrain {
        alpha: params.require("alpha")?,
        fmax_savannah: params.require("fmax_sav")?,
        fmax_jungle: params.require("fmax_jngl")?,
    })
}

/// The terrain catalog named by the map section.
pub fn load_terrains(map: &MapConfig) -> Result<Vec<TerrainSpec>> {
    if let Some(classic) = &map.classic {
        return Ok(classic.specs());
    }
    if let Some(path) = &map.classic_file {
        return Ok(read_classic_params(path)?.specs());
    }
    if let Some(path) = &map.spec {
        return read_spec_table(path);
    }
    if !map.terrain.is_empty() {
        return Ok(map.terrain.clone());
    }
    Err(IoError::validation("no terrain catalog configured"))
}

/// Loads the terrain catalog and the `.geo` grid of a map section.
pub fn load_grid(map: &MapConfig) -> Result<Grid> {
    let terrains = load_terrains(map)?;
    read_geo(&map.geography, terrains)
}
