//! Animal arena and per-animal behaviours.
//!
//! Animals live in a `hecs::World` owned by [`Population`]; an [`AnimalId`] is
//! the generational entity handle. Every behaviour that changes where an
//! animal lives updates the animal and its cell together, so an animal has a
//! cell exactly while it is registered here.

use crate::error::{Result, SimError};
use crate::grid::{CellId, Grid};
use crate::rng::RandomSource;
use crate::species::{capture_chance, Diet, Species, SpeciesCatalog, SpeciesId};

/// Handle of a living animal.
pub type AnimalId = hecs::Entity;

#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    species: SpeciesId,
    weight: f64,
    age: u32,
    cell: Option<CellId>,
    fitness: Option<f64>,
}

impl Animal {
    #[must_use]
    pub fn species(&self) -> SpeciesId {
        self.species
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[must_use]
    pub fn cell(&self) -> Option<CellId> {
        self.cell
    }

    /// Fitness, computed once per change of weight or age.
    pub fn fitness(&mut self, species: &Species) -> f64 {
        *self
            .fitness
            .get_or_insert_with(|| species.fitness(self.weight, self.age))
    }

    /// Fitness without touching the cache.
    #[must_use]
    pub fn current_fitness(&self, species: &Species) -> f64 {
        self.fitness
            .unwrap_or_else(|| species.fitness(self.weight, self.age))
    }

    fn fatten(&mut self, delta: f64) {
        self.weight += delta;
        self.fitness = None;
    }
}

/// Offspring produced during a breeding pass, not yet placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingBirth {
    pub species: SpeciesId,
    pub cell: CellId,
}

/// Result of one feeding turn.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome {
    /// Feed units granted by the cell.
    Grazed(f64),
    /// Prey removed from the population.
    Hunted(Vec<AnimalId>),
}

/// The authoritative store of living animals.
#[derive(Default)]
pub struct Population {
    ecs: hecs::World,
}

impl std::fmt::Debug for Population {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Population")
            .field("len", &self.len())
            .finish()
    }
}

impl Population {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ecs.len() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ecs.len() == 0
    }

    #[must_use]
    pub fn contains(&self, id: AnimalId) -> bool {
        self.ecs.contains(id)
    }

    /// A copy of the animal's current state.
    pub fn animal(&self, id: AnimalId) -> Result<Animal> {
        self.ecs
            .get::<&Animal>(id)
            .map(|a| (*a).clone())
            .map_err(|_| unregistered(id))
    }

    pub fn species_of(&self, id: AnimalId) -> Result<SpeciesId> {
        self.ecs
            .get::<&Animal>(id)
            .map(|a| a.species)
            .map_err(|_| unregistered(id))
    }

    /// Handles of all living animals in a stable order.
    #[must_use]
    pub fn ids(&self) -> Vec<AnimalId> {
        let mut ids: Vec<AnimalId> = self
            .ecs
            .query::<&Animal>()
            .iter()
            .map(|(id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Snapshot of all living animals in a stable order.
    #[must_use]
    pub fn animals(&self) -> Vec<(AnimalId, Animal)> {
        let mut all: Vec<(AnimalId, Animal)> = self
            .ecs
            .query::<&Animal>()
            .iter()
            .map(|(id, a)| (id, a.clone()))
            .collect();
        all.sort_unstable_by_key(|(id, _)| *id);
        all
    }

    fn animal_mut(&mut self, id: AnimalId) -> Result<&mut Animal> {
        self.ecs
            .query_one_mut::<&mut Animal>(id)
            .map_err(|_| unregistered(id))
    }

    /// Places an animal in `cell`. Returns `None` if the cell refuses animals.
    pub fn place(
        &mut self,
        grid: &mut Grid,
        species: SpeciesId,
        cell: CellId,
        age: u32,
        weight: f64,
    ) -> Option<AnimalId> {
        if !grid.accepts_animals(cell) {
            return None;
        }
        let id = self.ecs.spawn((Animal {
            species,
            weight,
            age,
            cell: Some(cell),
            fitness: None,
        },));
        grid.insert_resident(cell, id);
        Some(id)
    }

    /// Places an animal of the named species at `(x, y)`.
    ///
    /// Unknown species are a lookup error; a missing or refusing cell yields
    /// `Ok(None)`.
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &mut self,
        grid: &mut Grid,
        catalog: &SpeciesCatalog,
        species: &str,
        x: u32,
        y: u32,
        age: u32,
        weight: f64,
    ) -> Result<Option<AnimalId>> {
        let species = catalog.lookup(species)?;
        Ok(grid
            .at(x, y)
            .and_then(|cell| self.place(grid, species, cell, age, weight)))
    }

    /// Places a newborn: age 0 at the species' birth weight.
    pub fn spawn_newborn(
        &mut self,
        grid: &mut Grid,
        catalog: &SpeciesCatalog,
        birth: PendingBirth,
    ) -> Option<AnimalId> {
        let weight = catalog.get(birth.species).birth_weight();
        self.place(grid, birth.species, birth.cell, 0, weight)
    }

    /// Unregisters the animal from its cell (if any) and from the store.
    pub fn remove(&mut self, grid: &mut Grid, id: AnimalId) -> Result<Animal> {
        let animal = self.animal(id)?;
        if let Some(cell) = animal.cell {
            grid.remove_resident(cell, id);
        }
        self.ecs.despawn(id).map_err(|_| unregistered(id))?;
        Ok(animal)
    }

    /// Overwrites age and weight.
    pub fn adjust(&mut self, id: AnimalId, age: u32, weight: f64) -> Result<()> {
        let animal = self.animal_mut(id)?;
        animal.age = age;
        animal.weight = weight;
        animal.fitness = None;
        Ok(())
    }

    pub fn fitness(&mut self, id: AnimalId, catalog: &SpeciesCatalog) -> Result<f64> {
        let animal = self.animal_mut(id)?;
        Ok(animal.fitness(catalog.get(animal.species)))
    }

    /// One year older and lighter by the species' yearly weight loss.
    pub fn age(&mut self, id: AnimalId, catalog: &SpeciesCatalog) -> Result<()> {
        let animal = self.animal_mut(id)?;
        let loss = catalog.get(animal.species).weight_loss(animal.weight);
        animal.age += 1;
        animal.weight -= loss;
        animal.fitness = None;
        Ok(())
    }

    /// Evaluates death. A dead animal leaves its cell at once; the caller
    /// removes it from the store with [`Population::remove`].
    ///
    /// Weightless or unfit animals die without consuming a draw.
    pub fn die<R: RandomSource + ?Sized>(
        &mut self,
        id: AnimalId,
        grid: &mut Grid,
        catalog: &SpeciesCatalog,
        rng: &mut R,
    ) -> Result<bool> {
        let animal = self.animal_mut(id)?;
        let cell = animal.cell.ok_or_else(|| homeless(id))?;
        let species = catalog.get(animal.species);
        let dead = if animal.weight <= 0.0 {
            true
        } else {
            let fitness = animal.fitness(species);
            fitness <= 0.0 || rng.uniform() < species.death_probability(fitness)
        };
        if dead {
            animal.cell = None;
            grid.remove_resident(cell, id);
        }
        Ok(dead)
    }

    /// Moves the animal, keeping both sides of the cell membership in step.
    ///
    /// Returns `false` without any change if the destination refuses animals.
    pub fn move_to(&mut self, id: AnimalId, grid: &mut Grid, destination: CellId) -> Result<bool> {
        let animal = self.animal_mut(id)?;
        let origin = animal.cell.ok_or_else(|| homeless(id))?;
        if origin == destination {
            return Ok(true);
        }
        if !grid.insert_resident(destination, id) {
            return Ok(false);
        }
        grid.remove_resident(origin, id);
        animal.cell = Some(destination);
        Ok(true)
    }

    /// Attempts a random step to one of the four neighbour slots.
    ///
    /// Returns `true` only if the animal ended up in a different cell.
    pub fn wander<R: RandomSource + ?Sized>(
        &mut self,
        id: AnimalId,
        grid: &mut Grid,
        catalog: &SpeciesCatalog,
        rng: &mut R,
    ) -> Result<bool> {
        let (origin, probability) = {
            let animal = self.animal_mut(id)?;
            let origin = animal.cell.ok_or_else(|| homeless(id))?;
            let species = catalog.get(animal.species);
            (origin, species.wander_probability(animal.fitness(species)))
        };
        if rng.uniform() >= probability {
            return Ok(false);
        }
        match grid.neighbours_of(origin)[rng.below(4)] {
            Some(destination) if destination != origin => self.move_to(id, grid, destination),
            _ => Ok(false),
        }
    }

    /// Breeding attempt with `same_species` animals of the parent's kind in
    /// the cell. The draw is taken before the age and weight checks.
    pub fn breed<R: RandomSource + ?Sized>(
        &mut self,
        id: AnimalId,
        same_species: usize,
        catalog: &SpeciesCatalog,
        rng: &mut R,
    ) -> Result<Option<PendingBirth>> {
        let animal = self.animal_mut(id)?;
        let cell = animal.cell.ok_or_else(|| homeless(id))?;
        let species = catalog.get(animal.species);
        let chance = species.birth_chance(animal.fitness(species), same_species);
        if rng.uniform() >= chance {
            return Ok(None);
        }
        if animal.age < 1 || !species.can_breed(animal.weight) {
            return Ok(None);
        }
        animal.weight -= species.birth_loss();
        animal.fitness = None;
        Ok(Some(PendingBirth {
            species: animal.species,
            cell,
        }))
    }

    /// Grazes up to the species' feed desire from the animal's cell.
    pub fn feed_herbivore(
        &mut self,
        id: AnimalId,
        grid: &mut Grid,
        catalog: &SpeciesCatalog,
    ) -> Result<f64> {
        let animal = self.animal_mut(id)?;
        let cell = animal.cell.ok_or_else(|| homeless(id))?;
        let species = catalog.get(animal.species);
        let Diet::Herbivore { feed_desire } = species.diet() else {
            return Err(SimError::invariant(format!(
                "predator {id:?} asked to graze"
            )));
        };
        let granted = grid.graze(cell, feed_desire);
        animal.fatten(species.beta() * granted);
        Ok(granted)
    }

    /// Tries to catch every cellmate of another species with nonzero weight.
    ///
    /// One draw per candidate. Caught prey is removed from its cell and from
    /// the store before the next candidate is considered.
    pub fn feed_predator<R: RandomSource + ?Sized>(
        &mut self,
        id: AnimalId,
        grid: &mut Grid,
        catalog: &SpeciesCatalog,
        rng: &mut R,
    ) -> Result<Vec<AnimalId>> {
        let (cell, species_id) = {
            let animal = self.animal_mut(id)?;
            (animal.cell.ok_or_else(|| homeless(id))?, animal.species)
        };
        let predator = catalog.get(species_id);
        let Diet::Predator { delta_phi_max } = predator.diet() else {
            return Err(SimError::invariant(format!(
                "herbivore {id:?} asked to hunt"
            )));
        };

        let cellmates: Vec<AnimalId> = grid.cell(cell).residents().iter().copied().collect();
        let mut eaten = Vec::new();
        for prey_id in cellmates {
            if prey_id == id {
                continue;
            }
            let (prey_weight, prey_fitness) = {
                let prey = self.animal_mut(prey_id)?;
                if prey.species == species_id || prey.weight <= 0.0 {
                    continue;
                }
                let prey_species = catalog.get(prey.species);
                (prey.weight, prey.fitness(prey_species))
            };
            let predator_fitness = self.animal_mut(id)?.fitness(predator);
            let chance = capture_chance(predator_fitness, prey_fitness, delta_phi_max);
            if rng.uniform() < chance {
                self.remove(grid, prey_id)?;
                self.animal_mut(id)?.fatten(predator.beta() * prey_weight);
                eaten.push(prey_id);
            }
        }
        Ok(eaten)
    }

    /// Feeds the animal according to its species' diet.
    pub fn feed<R: RandomSource + ?Sized>(
        &mut self,
        id: AnimalId,
        grid: &mut Grid,
        catalog: &SpeciesCatalog,
        rng: &mut R,
    ) -> Result<FeedOutcome> {
        let species = self.animal(id)?.species;
        if catalog.get(species).is_predator() {
            self.feed_predator(id, grid, catalog, rng)
                .map(FeedOutcome::Hunted)
        } else {
            self.feed_herbivore(id, grid, catalog)
                .map(FeedOutcome::Grazed)
        }
    }
}

fn unregistered(id: AnimalId) -> SimError {
    SimError::invariant(format!("animal {id:?} is not registered"))
}

fn homeless(id: AnimalId) -> SimError {
    SimError::invariant(format!("animal {id:?} has no cell"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ReplaySource;
    use crate::species::presets::{herbivore, predator};
    use biosim_data::TerrainSpec;

    fn setup() -> (Grid, SpeciesCatalog, Population) {
        let grid = Grid::from_rows(
            TerrainSpec::classic(0.3, 300.0, 800.0),
            &["HHHH", "HJJH", "HJSH", "HHHH"],
        )
        .unwrap();
        let mut catalog = SpeciesCatalog::new();
        catalog.register(&herbivore()).unwrap();
        catalog.register(&predator()).unwrap();
        (grid, catalog, Population::new())
    }

    #[test]
    fn test_insert_registers_both_sides() {
        let (mut grid, catalog, mut pop) = setup();
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 3, 20.0)
            .unwrap()
            .expect("jungle accepts animals");
        let cell = grid.at(1, 1).unwrap();
        assert!(grid.cell(cell).contains(id));
        assert_eq!(pop.animal(id).unwrap().cell(), Some(cell));
        assert_eq!(pop.len(), 1);
    }

    #[test]
    fn test_insert_rejections() {
        let (mut grid, catalog, mut pop) = setup();
        assert_eq!(
            pop.insert(&mut grid, &catalog, "Herbivore", 0, 0, 3, 20.0)
                .unwrap(),
            None
        );
        assert_eq!(
            pop.insert(&mut grid, &catalog, "Herbivore", 9, 9, 3, 20.0)
                .unwrap(),
            None
        );
        assert!(matches!(
            pop.insert(&mut grid, &catalog, "Wolf", 1, 1, 3, 20.0),
            Err(SimError::Lookup(_))
        ));
        assert!(pop.is_empty());
    }

    #[test]
    fn test_age_increments_and_loses_weight() {
        let (mut grid, catalog, mut pop) = setup();
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 3, 20.0)
            .unwrap()
            .unwrap();
        pop.age(id, &catalog).unwrap();
        let a = pop.animal(id).unwrap();
        assert_eq!(a.age(), 4);
        assert!((a.weight() - 19.0).abs() < 1e-12);
    }

    #[test]
    fn test_weightless_animal_dies_without_draw() {
        let (mut grid, catalog, mut pop) = setup();
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 3, 0.0)
            .unwrap()
            .unwrap();
        let mut rng = ReplaySource::constant(0.999);
        assert!(pop.die(id, &mut grid, &catalog, &mut rng).unwrap());
        assert_eq!(rng.uniform_draws(), 0);
        assert_eq!(pop.animal(id).unwrap().cell(), None);
        assert_eq!(grid.cell(grid.at(1, 1).unwrap()).resident_count(), 0);
        pop.remove(&mut grid, id).unwrap();
        assert!(!pop.contains(id));
    }

    #[test]
    fn test_fit_animal_survives_high_draw() {
        let (mut grid, catalog, mut pop) = setup();
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 3, 20.0)
            .unwrap()
            .unwrap();
        let mut rng = ReplaySource::constant(0.999);
        assert!(!pop.die(id, &mut grid, &catalog, &mut rng).unwrap());
        assert_eq!(rng.uniform_draws(), 1);
    }

    #[test]
    fn test_move_and_back_restores_membership() {
        let (mut grid, catalog, mut pop) = setup();
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 3, 20.0)
            .unwrap()
            .unwrap();
        let origin = grid.at(1, 1).unwrap();
        let east = grid.at(2, 1).unwrap();
        assert!(pop.move_to(id, &mut grid, east).unwrap());
        assert!(!grid.cell(origin).contains(id));
        assert!(grid.cell(east).contains(id));
        assert!(pop.move_to(id, &mut grid, origin).unwrap());
        assert!(grid.cell(origin).contains(id));
        assert!(!grid.cell(east).contains(id));
    }

    #[test]
    fn test_move_into_water_fails_silently() {
        let (mut grid, catalog, mut pop) = setup();
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 3, 20.0)
            .unwrap()
            .unwrap();
        let water = grid.at(0, 1).unwrap();
        assert!(!pop.move_to(id, &mut grid, water).unwrap());
        assert_eq!(pop.animal(id).unwrap().cell(), grid.at(1, 1));
        assert!(grid.cell(grid.at(1, 1).unwrap()).contains(id));
    }

    #[test]
    fn test_breed_requires_age_and_weight() {
        let (mut grid, catalog, mut pop) = setup();
        let juvenile = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 0, 30.0)
            .unwrap()
            .unwrap();
        let adult = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 5, 30.0)
            .unwrap()
            .unwrap();
        let mut rng = ReplaySource::constant(0.0);
        assert_eq!(pop.breed(juvenile, 2, &catalog, &mut rng).unwrap(), None);
        let birth = pop
            .breed(adult, 2, &catalog, &mut rng)
            .unwrap()
            .expect("adult breeds on a zero draw");
        assert_eq!(birth.cell, grid.at(1, 1).unwrap());
        assert!((pop.animal(adult).unwrap().weight() - 25.5).abs() < 1e-12);
        // Both attempts consumed a draw, the juvenile's included.
        assert_eq!(rng.uniform_draws(), 2);
    }

    #[test]
    fn test_lone_animal_never_breeds() {
        let (mut grid, catalog, mut pop) = setup();
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 5, 30.0)
            .unwrap()
            .unwrap();
        let mut rng = ReplaySource::constant(0.0);
        assert_eq!(pop.breed(id, 1, &catalog, &mut rng).unwrap(), None);
    }

    #[test]
    fn test_herbivore_grazes_what_is_left() {
        let (mut grid, catalog, mut pop) = setup();
        let cell = grid.at(1, 1).unwrap();
        grid.set_feed(cell, 6.0);
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 5, 20.0)
            .unwrap()
            .unwrap();
        let granted = pop.feed_herbivore(id, &mut grid, &catalog).unwrap();
        assert_eq!(granted, 6.0);
        assert_eq!(grid.cell(cell).feed(), 0.0);
        assert!((pop.animal(id).unwrap().weight() - (20.0 + 0.75 * 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_predator_eats_weaker_prey() {
        let (mut grid, catalog, mut pop) = setup();
        let hunter = pop
            .insert(&mut grid, &catalog, "Predator", 1, 1, 5, 30.0)
            .unwrap()
            .unwrap();
        let prey = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 90, 3.0)
            .unwrap()
            .unwrap();
        let mut rng = ReplaySource::constant(0.0);
        let eaten = pop
            .feed_predator(hunter, &mut grid, &catalog, &mut rng)
            .unwrap();
        assert_eq!(eaten, vec![prey]);
        assert!(!pop.contains(prey));
        assert!(!grid.cell(grid.at(1, 1).unwrap()).contains(prey));
        assert!((pop.animal(hunter).unwrap().weight() - (30.0 + 0.9 * 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_predator_ignores_own_species() {
        let (mut grid, catalog, mut pop) = setup();
        let hunter = pop
            .insert(&mut grid, &catalog, "Predator", 1, 1, 5, 30.0)
            .unwrap()
            .unwrap();
        let rival = pop
            .insert(&mut grid, &catalog, "Predator", 1, 1, 90, 3.0)
            .unwrap()
            .unwrap();
        let mut rng = ReplaySource::constant(0.0);
        let eaten = pop
            .feed_predator(hunter, &mut grid, &catalog, &mut rng)
            .unwrap();
        assert!(eaten.is_empty());
        assert!(pop.contains(rival));
        assert_eq!(rng.uniform_draws(), 0);
    }

    #[test]
    fn test_operations_on_removed_animal_are_invariant_violations() {
        let (mut grid, catalog, mut pop) = setup();
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 5, 20.0)
            .unwrap()
            .unwrap();
        pop.remove(&mut grid, id).unwrap();
        assert!(matches!(
            pop.age(id, &catalog),
            Err(SimError::InvariantViolation(_))
        ));
        assert!(matches!(
            pop.feed_herbivore(id, &mut grid, &catalog),
            Err(SimError::InvariantViolation(_))
        ));
    }

    fn open_field(rows: &[&str]) -> (Grid, SpeciesCatalog, Population) {
        let grid = Grid::from_rows(TerrainSpec::classic(0.3, 300.0, 800.0), rows).unwrap();
        let mut catalog = SpeciesCatalog::new();
        catalog.register(&herbivore()).unwrap();
        (grid, catalog, Population::new())
    }

    /// Wanders with a draw that always moves, towards neighbour `slot`.
    fn wander_towards(
        pop: &mut Population,
        grid: &mut Grid,
        catalog: &SpeciesCatalog,
        id: AnimalId,
        slot: usize,
    ) -> bool {
        let mut rng = ReplaySource::new(vec![0.0], vec![slot]);
        pop.wander(id, grid, catalog, &mut rng).unwrap()
    }

    #[test]
    fn test_wander_slot_directions() {
        // Slots are west, north, east, south.
        let expected = [(0, 1), (1, 0), (2, 1), (1, 2)];
        for (slot, (x, y)) in expected.into_iter().enumerate() {
            let (mut grid, catalog, mut pop) = open_field(&["JJJ", "JJJ", "JJJ"]);
            let id = pop
                .insert(&mut grid, &catalog, "Herbivore", 1, 1, 3, 20.0)
                .unwrap()
                .unwrap();
            assert!(wander_towards(&mut pop, &mut grid, &catalog, id, slot));

            let origin = grid.at(1, 1).unwrap();
            let destination = grid.at(x, y).unwrap();
            assert_eq!(pop.animal(id).unwrap().cell(), Some(destination), "slot {slot}");
            assert!(grid.cell(destination).contains(id));
            assert!(!grid.cell(origin).contains(id));
        }
    }

    #[test]
    fn test_wander_stays_at_low_edges() {
        for slot in [0, 1] {
            let (mut grid, catalog, mut pop) = open_field(&["JJJ", "JJJ", "JJJ"]);
            let id = pop
                .insert(&mut grid, &catalog, "Herbivore", 0, 0, 3, 20.0)
                .unwrap()
                .unwrap();
            assert!(!wander_towards(&mut pop, &mut grid, &catalog, id, slot));
            let corner = grid.at(0, 0).unwrap();
            assert_eq!(pop.animal(id).unwrap().cell(), Some(corner));
            assert!(grid.cell(corner).contains(id));
        }
    }

    #[test]
    fn test_wander_off_high_edges_is_refused() {
        for slot in [2, 3] {
            let (mut grid, catalog, mut pop) = open_field(&["JJJ", "JJJ", "JJJ"]);
            let id = pop
                .insert(&mut grid, &catalog, "Herbivore", 2, 2, 3, 20.0)
                .unwrap()
                .unwrap();
            assert!(!wander_towards(&mut pop, &mut grid, &catalog, id, slot));
            let corner = grid.at(2, 2).unwrap();
            assert_eq!(pop.animal(id).unwrap().cell(), Some(corner));
            assert_eq!(grid.cell(corner).resident_count(), 1);
        }
    }

    #[test]
    fn test_wander_into_water_is_refused() {
        let (mut grid, catalog, mut pop) = open_field(&["HJH"]);
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 0, 3, 20.0)
            .unwrap()
            .unwrap();
        for slot in [0, 2] {
            assert!(!wander_towards(&mut pop, &mut grid, &catalog, id, slot));
        }
        let land = grid.at(1, 0).unwrap();
        assert_eq!(pop.animal(id).unwrap().cell(), Some(land));
        assert_eq!(grid.cell(land).resident_count(), 1);
        assert_eq!(grid.cell(grid.at(0, 0).unwrap()).resident_count(), 0);
        assert_eq!(grid.cell(grid.at(2, 0).unwrap()).resident_count(), 0);
    }

    #[test]
    fn test_wander_draw_above_probability_stays() {
        let (mut grid, catalog, mut pop) = open_field(&["JJJ", "JJJ", "JJJ"]);
        let id = pop
            .insert(&mut grid, &catalog, "Herbivore", 1, 1, 3, 20.0)
            .unwrap()
            .unwrap();
        let mut rng = ReplaySource::new(vec![0.999], vec![2]);
        assert!(!pop.wander(id, &mut grid, &catalog, &mut rng).unwrap());
        assert_eq!(pop.animal(id).unwrap().cell(), grid.at(1, 1));
    }
}
