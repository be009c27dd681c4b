//! Read-only queries used by the report writers.

use std::collections::BTreeMap;

use biosim_data::{AnimalRecord, DietKind, PopulationRecord};

use super::World;
use crate::grid::CellId;
use crate::rng::RandomSource;
use crate::species::SpeciesId;

/// Resident counts of one cell split by diet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellCensus {
    pub herbivores: usize,
    pub predators: usize,
}

impl<R: RandomSource> World<R> {
    /// Living animals per diet and terrain code.
    #[must_use]
    pub fn counts_by_diet_and_terrain(&self) -> BTreeMap<(DietKind, char), usize> {
        let mut counts = BTreeMap::new();
        for (_, animal) in self.population.animals() {
            let Some(cell) = animal.cell() else { continue };
            let kind = self.catalog.get(animal.species()).kind();
            let code = self.grid.terrain_of(cell).code();
            *counts.entry((kind, code)).or_insert(0) += 1;
        }
        counts
    }

    /// Age and weight of each resident, grouped by species in catalog order.
    /// Species without residents are left out.
    #[must_use]
    pub fn cell_occupants(&self, cell: CellId) -> Vec<(SpeciesId, Vec<AnimalRecord>)> {
        let mut groups: BTreeMap<SpeciesId, Vec<AnimalRecord>> = BTreeMap::new();
        for &id in self.grid.cell(cell).residents() {
            if let Ok(animal) = self.population.animal(id) {
                groups
                    .entry(animal.species())
                    .or_default()
                    .push(AnimalRecord {
                        age: animal.age(),
                        weight: animal.weight(),
                    });
            }
        }
        groups.into_iter().collect()
    }

    /// Feed stock of every cell in row-major order.
    #[must_use]
    pub fn feed_levels(&self) -> Vec<(CellId, f64)> {
        self.grid
            .all_cells()
            .iter()
            .map(|&cell| (cell, self.grid.cell(cell).feed()))
            .collect()
    }

    #[must_use]
    pub fn density(&self, cell: CellId) -> usize {
        self.grid.cell(cell).resident_count()
    }

    #[must_use]
    pub fn cell_census(&self, cell: CellId) -> CellCensus {
        let mut census = CellCensus::default();
        for &id in self.grid.cell(cell).residents() {
            match self.population.species_of(id) {
                Ok(species) if self.catalog.get(species).is_predator() => census.predators += 1,
                Ok(_) => census.herbivores += 1,
                Err(_) => {}
            }
        }
        census
    }

    /// `(herbivores, predators)` across the whole world.
    #[must_use]
    pub fn diet_counts(&self) -> (usize, usize) {
        self.population
            .animals()
            .iter()
            .fold((0, 0), |(h, p), (_, animal)| {
                if self.catalog.get(animal.species()).is_predator() {
                    (h, p + 1)
                } else {
                    (h + 1, p)
                }
            })
    }

    /// The population as re-loadable records: cells in row-major order,
    /// species in catalog order.
    #[must_use]
    pub fn population_records(&self) -> Vec<PopulationRecord> {
        let mut records = Vec::new();
        for &cell in self.grid.all_cells() {
            let (x, y) = {
                let c = self.grid.cell(cell);
                (c.x(), c.y())
            };
            for (species, animals) in self.cell_occupants(cell) {
                records.push(PopulationRecord {
                    species: self.catalog.get(species).name().to_string(),
                    x,
                    y,
                    animals,
                });
            }
        }
        records
    }

    /// Mean fitness per species, read without touching the fitness caches.
    #[must_use]
    pub fn mean_fitness(&self) -> BTreeMap<SpeciesId, f64> {
        let mut sums: BTreeMap<SpeciesId, (f64, usize)> = BTreeMap::new();
        for (_, animal) in self.population.animals() {
            let species = self.catalog.get(animal.species());
            let entry = sums.entry(animal.species()).or_insert((0.0, 0));
            entry.0 += animal.current_fitness(species);
            entry.1 += 1;
        }
        sums.into_iter()
            .map(|(id, (sum, n))| (id, sum / n as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::rng::ChaChaSource;
    use crate::species::presets::{herbivore, predator};
    use crate::species::SpeciesCatalog;
    use biosim_data::TerrainSpec;

    fn populated() -> World {
        let grid = Grid::from_rows(
            TerrainSpec::classic(0.3, 300.0, 800.0),
            &["HHHH", "HJSH", "HOJH", "HHHH"],
        )
        .unwrap();
        let mut catalog = SpeciesCatalog::new();
        catalog.register(&herbivore()).unwrap();
        catalog.register(&predator()).unwrap();
        let mut w = World::new(grid, catalog, ChaChaSource::new(5));
        w.insert_animal("Herbivore", 1, 1, 4, 20.0).unwrap().unwrap();
        w.insert_animal("Herbivore", 1, 1, 2, 12.0).unwrap().unwrap();
        w.insert_animal("Predator", 1, 1, 3, 25.0).unwrap().unwrap();
        w.insert_animal("Herbivore", 2, 1, 1, 9.0).unwrap().unwrap();
        w.insert_animal("Predator", 1, 2, 6, 30.0).unwrap().unwrap();
        w
    }

    #[test]
    fn test_counts_by_diet_and_terrain() {
        let w = populated();
        let counts = w.counts_by_diet_and_terrain();
        assert_eq!(counts.get(&(DietKind::Herbivore, 'J')), Some(&2));
        assert_eq!(counts.get(&(DietKind::Predator, 'J')), Some(&1));
        assert_eq!(counts.get(&(DietKind::Herbivore, 'S')), Some(&1));
        assert_eq!(counts.get(&(DietKind::Predator, 'O')), Some(&1));
        assert_eq!(counts.get(&(DietKind::Predator, 'S')), None);
        assert_eq!(w.diet_counts(), (3, 2));
    }

    #[test]
    fn test_cell_queries() {
        let w = populated();
        let cell = w.grid().at(1, 1).unwrap();
        assert_eq!(w.density(cell), 3);
        assert_eq!(
            w.cell_census(cell),
            CellCensus {
                herbivores: 2,
                predators: 1
            }
        );
        let groups = w.cell_occupants(cell);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1, vec![AnimalRecord { age: 3, weight: 25.0 }]);
    }

    #[test]
    fn test_population_records_are_row_major() {
        let w = populated();
        let records = w.population_records();
        let keys: Vec<(u32, u32, &str)> = records
            .iter()
            .map(|r| (r.x, r.y, r.species.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (1, 1, "Herbivore"),
                (1, 1, "Predator"),
                (2, 1, "Herbivore"),
                (1, 2, "Predator"),
            ]
        );
    }

    #[test]
    fn test_census_does_not_mutate() {
        let w = populated();
        let before = w.population().animals();
        let _ = w.mean_fitness();
        let _ = w.feed_levels();
        assert_eq!(w.population().animals(), before);
    }
}
