/// Asserts that the world holds exactly the given number of animals.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!(
            $world.population().len(),
            $count,
            "Population count mismatch"
        );
    };
}

/// Asserts that an animal is neither in the store nor in any cell.
#[macro_export]
macro_rules! assert_animal_gone {
    ($world:expr, $id:expr) => {
        assert!(
            !$world.population().contains($id),
            "Animal {:?} should be gone but is still registered",
            $id
        );
        let listed = $world
            .grid()
            .all_cells()
            .iter()
            .any(|&cell| $world.grid().cell(cell).contains($id));
        assert!(!listed, "Animal {:?} is still listed in a cell", $id);
    };
}

/// Asserts that every cell lists exactly the animals that say they live there.
#[macro_export]
macro_rules! assert_membership_consistent {
    ($world:expr) => {
        let mut listed = 0usize;
        for &cell in $world.grid().all_cells() {
            for &id in $world.grid().cell(cell).residents() {
                let animal = $world
                    .population()
                    .animal(id)
                    .expect("Cell lists an unregistered animal");
                assert_eq!(animal.cell(), Some(cell), "Animal {:?} is in the wrong cell", id);
                listed += 1;
            }
        }
        assert_eq!(listed, $world.population().len(), "Animals missing from cells");
    };
}
