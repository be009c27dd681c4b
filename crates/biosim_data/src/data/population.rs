use serde::{Deserialize, Serialize};

/// Age and weight of one animal in a population file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub age: u32,
    pub weight: f64,
}

/// A block of same-species animals sharing one grid location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub species: String,
    pub x: u32,
    pub y: u32,
    pub animals: Vec<AnimalRecord>,
}

impl PopulationRecord {
    #[must_use]
    pub fn new(species: impl Into<String>, x: u32, y: u32) -> Self {
        Self {
            species: species.into(),
            x,
            y,
            animals: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_animal(mut self, age: u32, weight: f64) -> Self {
        self.animals.push(AnimalRecord { age, weight });
        self
    }

    #[must_use]
    pub fn headcount(&self) -> usize {
        self.animals.len()
    }
}
