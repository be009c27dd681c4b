mod common;

use biosim_core::ReplaySource;
use biosim_data::TerrainSpec;
use common::WorldBuilder;

/// A single grassland cell that never regrows beyond its 6 units of feed.
fn meadow() -> WorldBuilder {
    WorldBuilder::new()
        .with_terrains(vec![TerrainSpec::new('G', 0.0, 6.0, true)])
        .with_rows(&["G"])
}

#[test]
fn test_herbivore_eats_what_is_left() {
    let mut world = meadow()
        .with_animal("Herbivore", 0, 0, 3, 20.0)
        .build_with(ReplaySource::constant(0.999_999));

    world.advance_year().unwrap();

    let cell = world.grid().at(0, 0).unwrap();
    assert_eq!(world.grid().cell(cell).feed(), 0.0);
    let (_, animal) = world.population().animals().remove(0);
    // 19 after aging, plus 0.75 * 6.
    assert!((animal.weight() - 23.5).abs() < 1e-9, "weight {}", animal.weight());
}

#[test]
fn test_fittest_herbivore_grazes_first() {
    let mut world = meadow()
        .with_animal("Herbivore", 0, 0, 80, 20.0)
        .with_animal("Herbivore", 0, 0, 3, 20.0)
        .build_with(ReplaySource::constant(0.999_999));

    world.advance_year().unwrap();

    let animals = world.population().animals();
    let old = animals.iter().find(|(_, a)| a.age() == 81).unwrap();
    let young = animals.iter().find(|(_, a)| a.age() == 4).unwrap();
    assert!((young.1.weight() - 23.5).abs() < 1e-9);
    assert!((old.1.weight() - 19.0).abs() < 1e-9);
}

#[test]
fn test_prey_is_eaten_once_by_two_predators() {
    let mut world = meadow()
        .with_species("Herbivore", |p| {
            p.gamma = Some(0.0);
            p.omega = Some(0.0);
        })
        .with_species("Predator", |p| {
            p.gamma = Some(0.0);
            p.omega = Some(0.0);
        })
        .with_animal("Herbivore", 0, 0, 60, 3.0)
        .with_animal("Predator", 0, 0, 5, 30.0)
        .with_animal("Predator", 0, 0, 5, 28.0)
        .build_with(ReplaySource::constant(0.0));

    let prey = world
        .population()
        .animals()
        .into_iter()
        .find(|(_, a)| a.age() == 60)
        .map(|(id, _)| id)
        .unwrap();

    let summary = world.advance_year().unwrap();
    assert_eq!(summary.eaten, 1);
    assert_eq!(summary.predators_fed, 2);
    assert_eq!(summary.herbivores, 0);
    assert_animal_gone!(world, prey);
    assert_population!(world, 2);
}

#[test]
fn test_unfit_predator_catches_nothing() {
    let mut world = meadow()
        .with_animal("Herbivore", 0, 0, 2, 30.0)
        .with_animal("Predator", 0, 0, 150, 3.0)
        .build_with(ReplaySource::constant(0.5));

    let summary = world.advance_year().unwrap();
    assert_eq!(summary.eaten, 0);
    assert_eq!(summary.herbivores, 1);
}
