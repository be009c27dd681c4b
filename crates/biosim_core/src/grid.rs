//! Terrain catalog and cell grid.
//!
//! The grid owns every cell; animals are referenced by [`AnimalId`] only.
//! Cells are created once by a [`GridBuilder`] and never move. Their four
//! neighbour slots are computed once when the builder finishes.

use crate::error::{Result, SimError};
use crate::population::AnimalId;
use crate::rng::{shuffle, RandomSource};
use biosim_data::TerrainSpec;
use std::collections::{BTreeSet, HashMap};

/// Packs a coordinate into a lookup key: `x` in the high half, `y` in the low half.
#[must_use]
pub fn pack_coord(x: u32, y: u32) -> u32 {
    (x << 16) + y
}

#[must_use]
pub fn unpack_coord(coord: u32) -> (u32, u32) {
    (coord >> 16, coord & 0xFFFF)
}

/// Largest coordinate that survives packing.
pub const MAX_COORD: u32 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerrainId(pub(crate) usize);

impl TerrainId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub(crate) usize);

impl CellId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Immutable terrain descriptor shared by every cell of that kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainKind {
    code: char,
    alpha: f64,
    max_feed: f64,
    live: bool,
    color: Option<[u8; 3]>,
}

impl TerrainKind {
    /// Validates a raw terrain description.
    pub fn from_spec(spec: &TerrainSpec) -> Result<Self> {
        if !(0.0..=1.0).contains(&spec.alpha) {
            return Err(SimError::config(format!(
                "terrain '{}': regrowth coefficient {} outside [0, 1]",
                spec.code, spec.alpha
            )));
        }
        if !spec.max_feed.is_finite() || spec.max_feed < 0.0 {
            return Err(SimError::config(format!(
                "terrain '{}': maximum feed {} must be a non-negative number",
                spec.code, spec.max_feed
            )));
        }
        Ok(Self {
            code: spec.code,
            alpha: spec.alpha,
            max_feed: spec.max_feed,
            live: spec.live,
            color: spec.color,
        })
    }

    #[must_use]
    pub fn code(&self) -> char {
        self.code
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[must_use]
    pub fn max_feed(&self) -> f64 {
        self.max_feed
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    #[must_use]
    pub fn color(&self) -> Option<[u8; 3]> {
        self.color
    }
}

/// Neighbour slot order used by [`Cell::neighbours`].
pub const WEST: usize = 0;
pub const NORTH: usize = 1;
pub const EAST: usize = 2;
pub const SOUTH: usize = 3;

/// One grid location.
#[derive(Debug, Clone)]
pub struct Cell {
    terrain: TerrainId,
    feed: f64,
    x: u32,
    y: u32,
    residents: BTreeSet<AnimalId>,
    neighbours: [Option<CellId>; 4],
}

impl Cell {
    #[must_use]
    pub fn terrain(&self) -> TerrainId {
        self.terrain
    }

    #[must_use]
    pub fn feed(&self) -> f64 {
        self.feed
    }

    #[must_use]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[must_use]
    pub fn residents(&self) -> &BTreeSet<AnimalId> {
        &self.residents
    }

    #[must_use]
    pub fn resident_count(&self) -> usize {
        self.residents.len()
    }

    #[must_use]
    pub fn contains(&self, animal: AnimalId) -> bool {
        self.residents.contains(&animal)
    }

    /// West, north, east and south slots. An empty slot has no cell behind it.
    #[must_use]
    pub fn neighbours(&self) -> [Option<CellId>; 4] {
        self.neighbours
    }
}

/// Assembles a grid cell by cell, then freezes its topology.
#[derive(Debug, Default)]
pub struct GridBuilder {
    terrains: Vec<TerrainKind>,
    codes: HashMap<char, TerrainId>,
    cells: Vec<Cell>,
    index: HashMap<u32, CellId>,
}

impl GridBuilder {
    /// Registers the terrain catalog. Duplicate codes are rejected.
    pub fn new<I>(terrains: I) -> Result<Self>
    where
        I: IntoIterator<Item = TerrainSpec>,
    {
        let mut builder = Self::default();
        for spec in terrains {
            let kind = TerrainKind::from_spec(&spec)?;
            if builder.codes.contains_key(&kind.code) {
                return Err(SimError::config(format!(
                    "terrain code '{}' registered twice",
                    kind.code
                )));
            }
            let id = TerrainId(builder.terrains.len());
            builder.codes.insert(kind.code, id);
            builder.terrains.push(kind);
        }
        Ok(builder)
    }

    /// Creates the cell at `(x, y)` with a full feed stock.
    pub fn build_cell(&mut self, x: u32, y: u32, code: char) -> Result<CellId> {
        let terrain = *self
            .codes
            .get(&code)
            .ok_or_else(|| SimError::config(format!("undefined terrain type: {code}")))?;
        if x > MAX_COORD || y > MAX_COORD {
            return Err(SimError::config(format!(
                "coordinate ({x}, {y}) exceeds the addressable grid"
            )));
        }
        let key = pack_coord(x, y);
        if self.index.contains_key(&key) {
            return Err(SimError::config(format!("cell ({x}, {y}) built twice")));
        }
        let id = CellId(self.cells.len());
        self.cells.push(Cell {
            terrain,
            feed: self.terrains[terrain.0].max_feed,
            x,
            y,
            residents: BTreeSet::new(),
            neighbours: [None; 4],
        });
        self.index.insert(key, id);
        Ok(id)
    }

    /// Freezes the grid. The built cells must cover a full rectangle.
    pub fn finish(mut self) -> Result<Grid> {
        if self.cells.is_empty() {
            return Err(SimError::config("map has no cells"));
        }
        let cols = self.cells.iter().map(|c| c.x).max().unwrap_or(0) + 1;
        let rows = self.cells.iter().map(|c| c.y).max().unwrap_or(0) + 1;
        if self.cells.len() != (rows as usize) * (cols as usize) {
            return Err(SimError::config(format!(
                "map is not rectangular: {} cells for {rows} rows x {cols} columns",
                self.cells.len()
            )));
        }

        let lookup = |x: u32, y: u32| -> Option<CellId> {
            if x >= cols || y >= rows {
                return None;
            }
            self.index.get(&pack_coord(x, y)).copied()
        };

        // The east/south tests compare against the count, not count - 1, so
        // the high edges fall through to an off-grid lookup and stay empty.
        let mut neighbours = Vec::with_capacity(self.cells.len());
        for (idx, cell) in self.cells.iter().enumerate() {
            let (x, y) = (cell.x, cell.y);
            let own = Some(CellId(idx));
            let west = if x == 0 { own } else { lookup(x - 1, y) };
            let north = if y == 0 { own } else { lookup(x, y - 1) };
            let east = if x == cols { own } else { lookup(x + 1, y) };
            let south = if y == rows { own } else { lookup(x, y + 1) };
            neighbours.push([west, north, east, south]);
        }
        for (cell, slots) in self.cells.iter_mut().zip(neighbours) {
            cell.neighbours = slots;
        }

        let mut all_order: Vec<CellId> = (0..self.cells.len()).map(CellId).collect();
        all_order.sort_by_key(|id| {
            let c = &self.cells[id.0];
            (c.y, c.x)
        });
        let live_order: Vec<CellId> = all_order
            .iter()
            .copied()
            .filter(|id| self.terrains[self.cells[id.0].terrain.0].live)
            .collect();

        tracing::debug!(
            rows,
            cols,
            live_cells = live_order.len(),
            "Grid built"
        );

        Ok(Grid {
            terrains: self.terrains,
            codes: self.codes,
            cells: self.cells,
            index: self.index,
            rows,
            cols,
            all_order,
            live_order,
        })
    }
}

/// The simulation map.
#[derive(Debug, Clone)]
pub struct Grid {
    terrains: Vec<TerrainKind>,
    codes: HashMap<char, TerrainId>,
    cells: Vec<Cell>,
    index: HashMap<u32, CellId>,
    rows: u32,
    cols: u32,
    all_order: Vec<CellId>,
    live_order: Vec<CellId>,
}

impl Grid {
    /// Builds a grid from rows of terrain characters. Whitespace is ignored.
    ///
    /// ```
    /// use biosim_core::grid::Grid;
    /// use biosim_data::TerrainSpec;
    ///
    /// let grid = Grid::from_rows(TerrainSpec::classic(0.3, 300.0, 800.0), &["HHH", "HJH", "HHH"]).unwrap();
    /// assert_eq!(grid.live_count(), 1);
    /// ```
    pub fn from_rows<I, S>(terrains: I, rows: &[S]) -> Result<Self>
    where
        I: IntoIterator<Item = TerrainSpec>,
        S: AsRef<str>,
    {
        let mut builder = GridBuilder::new(terrains)?;
        let mut width = None;
        for (y, row) in rows.iter().enumerate() {
            let codes: Vec<char> = row
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            match width {
                None => width = Some(codes.len()),
                Some(w) if w != codes.len() => {
                    return Err(SimError::config(format!(
                        "row {y} has {} cells, expected {w}",
                        codes.len()
                    )))
                }
                Some(_) => {}
            }
            for (x, code) in codes.into_iter().enumerate() {
                builder.build_cell(x as u32, y as u32, code)?;
            }
        }
        builder.finish()
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn terrains(&self) -> &[TerrainKind] {
        &self.terrains
    }

    #[must_use]
    pub fn terrain(&self, id: TerrainId) -> &TerrainKind {
        &self.terrains[id.0]
    }

    #[must_use]
    pub fn terrain_by_code(&self, code: char) -> Option<&TerrainKind> {
        self.codes.get(&code).map(|id| &self.terrains[id.0])
    }

    #[must_use]
    pub fn terrain_of(&self, cell: CellId) -> &TerrainKind {
        &self.terrains[self.cells[cell.0].terrain.0]
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_order.len()
    }

    /// The cell at `(x, y)`, if it exists.
    #[must_use]
    pub fn at(&self, x: u32, y: u32) -> Option<CellId> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.index.get(&pack_coord(x, y)).copied()
    }

    #[must_use]
    pub fn neighbours_of(&self, cell: CellId) -> [Option<CellId>; 4] {
        self.cells[cell.0].neighbours
    }

    /// Whether animals may enter the cell.
    #[must_use]
    pub fn accepts_animals(&self, cell: CellId) -> bool {
        self.terrain_of(cell).live
    }

    /// Participating cells in a freshly shuffled order.
    pub fn live_cells<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Vec<CellId> {
        shuffle(&mut self.live_order, rng);
        self.live_order.clone()
    }

    /// Every cell, rows outer and columns inner.
    #[must_use]
    pub fn all_cells(&self) -> &[CellId] {
        &self.all_order
    }

    /// Logistic regrowth towards the terrain's maximum feed.
    pub fn regrow(&mut self, cell: CellId) {
        let (alpha, max_feed) = {
            let kind = self.terrain_of(cell);
            (kind.alpha, kind.max_feed)
        };
        let c = &mut self.cells[cell.0];
        c.feed += alpha * (max_feed - c.feed);
    }

    /// Hands out at most `amount` feed and returns what was granted.
    pub fn graze(&mut self, cell: CellId, amount: f64) -> f64 {
        let c = &mut self.cells[cell.0];
        let granted = amount.max(0.0).min(c.feed);
        c.feed -= granted;
        granted
    }

    /// Overrides the feed stock, clamped to `[0, max_feed]`.
    pub fn set_feed(&mut self, cell: CellId, feed: f64) {
        let max_feed = self.terrain_of(cell).max_feed;
        self.cells[cell.0].feed = feed.clamp(0.0, max_feed);
    }

    pub(crate) fn insert_resident(&mut self, cell: CellId, animal: AnimalId) -> bool {
        if !self.accepts_animals(cell) {
            return false;
        }
        self.cells[cell.0].residents.insert(animal);
        true
    }

    pub(crate) fn remove_resident(&mut self, cell: CellId, animal: AnimalId) -> bool {
        self.cells[cell.0].residents.remove(&animal)
    }
}
