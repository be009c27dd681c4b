pub mod macros;

use biosim_core::{ChaChaSource, Grid, RandomSource, SpeciesCatalog, World};
use biosim_data::{SpeciesParams, TerrainSpec};

/// Small island: water ring around savannah, jungle and desert.
#[allow(dead_code)]
pub const ISLAND: [&str; 5] = ["HHHHH", "HJJSH", "HJSOH", "HSSJH", "HHHHH"];

/// Herbivore parameters of the classic island setup.
#[allow(dead_code)]
pub fn herbivore() -> SpeciesParams {
    SpeciesParams {
        name: Some("Herbivore".to_string()),
        birth_weight: Some(6.0),
        beta: Some(0.75),
        sigma: Some(0.05),
        min_weight: Some(2.0),
        age_midpoint: Some(40.0),
        phi_age: Some(0.2),
        under_midpoint: Some(6.0),
        phi_under: Some(1.0),
        over_midpoint: Some(40.0),
        phi_over: Some(0.2),
        mu: Some(0.5),
        gamma: Some(0.3),
        zeta: Some(0.75),
        omega: Some(0.4),
        feed_desire: Some(10.0),
        delta_phi_max: None,
    }
}

/// Predator parameters of the classic island setup.
#[allow(dead_code)]
pub fn predator() -> SpeciesParams {
    SpeciesParams {
        name: Some("Predator".to_string()),
        birth_weight: Some(6.0),
        beta: Some(0.9),
        sigma: Some(0.02),
        min_weight: Some(2.0),
        age_midpoint: Some(60.0),
        phi_age: Some(0.4),
        under_midpoint: Some(4.0),
        phi_under: Some(0.4),
        over_midpoint: Some(60.0),
        phi_over: Some(0.05),
        mu: Some(0.3),
        gamma: Some(0.2),
        zeta: Some(1.0),
        omega: Some(0.4),
        feed_desire: None,
        delta_phi_max: Some(10.0),
    }
}

#[allow(dead_code)]
pub struct WorldBuilder {
    terrains: Vec<TerrainSpec>,
    rows: Vec<String>,
    species: Vec<SpeciesParams>,
    animals: Vec<(String, u32, u32, u32, f64)>,
    seed: u64,
    start_year: u32,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            terrains: TerrainSpec::classic(0.3, 300.0, 800.0),
            rows: ISLAND.iter().map(|r| r.to_string()).collect(),
            species: vec![herbivore(), predator()],
            animals: Vec::new(),
            seed: 0,
            start_year: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_rows(mut self, rows: &[&str]) -> Self {
        self.rows = rows.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn with_terrains(mut self, terrains: Vec<TerrainSpec>) -> Self {
        self.terrains = terrains;
        self
    }

    pub fn with_start_year(mut self, year: u32) -> Self {
        self.start_year = year;
        self
    }

    /// Edits the parameters of the named species.
    pub fn with_species<F>(mut self, name: &str, modifier: F) -> Self
    where
        F: FnOnce(&mut SpeciesParams),
    {
        if let Some(params) = self
            .species
            .iter_mut()
            .find(|p| p.name.as_deref() == Some(name))
        {
            modifier(params);
        }
        self
    }

    pub fn with_animal(mut self, species: &str, x: u32, y: u32, age: u32, weight: f64) -> Self {
        self.animals
            .push((species.to_string(), x, y, age, weight));
        self
    }

    /// Adds `count` identical animals at one location.
    pub fn with_herd(
        mut self,
        species: &str,
        x: u32,
        y: u32,
        count: usize,
        age: u32,
        weight: f64,
    ) -> Self {
        for _ in 0..count {
            self = self.with_animal(species, x, y, age, weight);
        }
        self
    }

    pub fn build(self) -> World {
        let rng = ChaChaSource::new(self.seed);
        self.build_with(rng)
    }

    pub fn build_with<R: RandomSource>(self, rng: R) -> World<R> {
        let grid = Grid::from_rows(self.terrains, &self.rows).expect("Failed to build test grid");
        let mut catalog = SpeciesCatalog::new();
        for params in &self.species {
            catalog
                .register(params)
                .expect("Failed to register test species");
        }
        let mut world = World::new(grid, catalog, rng).with_start_year(self.start_year);
        for (species, x, y, age, weight) in self.animals {
            world
                .insert_animal(&species, x, y, age, weight)
                .expect("Unknown test species")
                .expect("Test animal placed on a refusing cell");
        }
        world
    }
}
