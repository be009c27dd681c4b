//! Species descriptors and the fitness model.
//!
//! A species is an immutable parameter set shared by every animal of that
//! kind. Predators and herbivores share one descriptor type; the [`Diet`]
//! decides which feeding behaviour applies.

use crate::error::{Result, SimError};
use biosim_data::{DietKind, SpeciesParams};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeciesId(pub(crate) usize);

impl SpeciesId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Logistic curve `1 / (1 + exp(sign * steepness * (x - midpoint)))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigmoid {
    pub midpoint: f64,
    pub steepness: f64,
}

impl Sigmoid {
    #[must_use]
    pub fn new(midpoint: f64, steepness: f64) -> Self {
        Self {
            midpoint,
            steepness,
        }
    }

    /// Positive exponent sign.
    #[inline]
    #[must_use]
    pub fn positive(&self, x: f64) -> f64 {
        1.0 / (1.0 + (self.steepness * (x - self.midpoint)).exp())
    }

    /// Negative exponent sign.
    #[inline]
    #[must_use]
    pub fn negative(&self, x: f64) -> f64 {
        1.0 / (1.0 + (-self.steepness * (x - self.midpoint)).exp())
    }
}

/// Feeding behaviour and its single diet parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diet {
    /// Grazes up to `feed_desire` units from its cell each year.
    Herbivore { feed_desire: f64 },
    /// Hunts cellmates; a fitness gap of `delta_phi_max` guarantees a capture.
    Predator { delta_phi_max: f64 },
}

impl Diet {
    #[must_use]
    pub fn kind(&self) -> DietKind {
        match self {
            Diet::Herbivore { .. } => DietKind::Herbivore,
            Diet::Predator { .. } => DietKind::Predator,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    name: String,
    birth_weight: f64,
    beta: f64,
    sigma: f64,
    min_weight: f64,
    age_curve: Sigmoid,
    underweight_curve: Sigmoid,
    overweight_curve: Sigmoid,
    mu: f64,
    gamma: f64,
    zeta: f64,
    omega: f64,
    diet: Diet,
}

impl Species {
    /// Validates a parameter table.
    ///
    /// `feed_desire` classifies the species as a herbivore and takes
    /// precedence; otherwise `delta_phi_max` makes it a predator. An unnamed
    /// species is called `B` (herbivore) or `R` (predator).
    pub fn from_params(params: &SpeciesParams) -> Result<Self> {
        let label = params.name.clone().unwrap_or_default();
        let missing = params.missing_fields();
        if !missing.is_empty() {
            return Err(SimError::config(format!(
                "species '{label}' is missing parameters: {}",
                missing.join(", ")
            )));
        }

        let diet = match (params.feed_desire, params.delta_phi_max) {
            (Some(feed_desire), other) => {
                if other.is_some() {
                    tracing::warn!(
                        species = %label,
                        "both feed_desire and delta_phi_max given; treating as herbivore"
                    );
                }
                Diet::Herbivore { feed_desire }
            }
            (None, Some(delta_phi_max)) => {
                if delta_phi_max <= 0.0 {
                    return Err(SimError::config(format!(
                        "species '{label}': delta_phi_max must be positive"
                    )));
                }
                Diet::Predator { delta_phi_max }
            }
            (None, None) => {
                return Err(SimError::config(format!(
                    "species '{label}' defines neither feed_desire nor delta_phi_max"
                )))
            }
        };

        let name = match params.name.as_deref() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => match diet {
                Diet::Herbivore { .. } => "B".to_string(),
                Diet::Predator { .. } => "R".to_string(),
            },
        };

        // missing_fields() is empty, so every shared parameter is present.
        let get = |v: Option<f64>| v.unwrap_or_default();
        let species = Self {
            name,
            birth_weight: get(params.birth_weight),
            beta: get(params.beta),
            sigma: get(params.sigma),
            min_weight: get(params.min_weight),
            age_curve: Sigmoid::new(get(params.age_midpoint), get(params.phi_age)),
            underweight_curve: Sigmoid::new(get(params.under_midpoint), get(params.phi_under)),
            overweight_curve: Sigmoid::new(get(params.over_midpoint), get(params.phi_over)),
            mu: get(params.mu),
            gamma: get(params.gamma),
            zeta: get(params.zeta),
            omega: get(params.omega),
            diet,
        };

        let numbers = [
            species.birth_weight,
            species.beta,
            species.sigma,
            species.min_weight,
            species.mu,
            species.gamma,
            species.zeta,
            species.omega,
        ];
        if numbers.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SimError::config(format!(
                "species '{}' has negative or non-finite parameters",
                species.name
            )));
        }
        let diet_value = match species.diet {
            Diet::Herbivore { feed_desire } => feed_desire,
            Diet::Predator { delta_phi_max } => delta_phi_max,
        };
        let curves = [
            species.age_curve,
            species.underweight_curve,
            species.overweight_curve,
        ];
        let curves_finite = curves
            .iter()
            .all(|c| c.midpoint.is_finite() && c.steepness.is_finite());
        if !curves_finite || !diet_value.is_finite() || diet_value < 0.0 {
            return Err(SimError::config(format!(
                "species '{}' has negative or non-finite parameters",
                species.name
            )));
        }
        Ok(species)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn diet(&self) -> Diet {
        self.diet
    }

    #[must_use]
    pub fn kind(&self) -> DietKind {
        self.diet.kind()
    }

    #[must_use]
    pub fn is_predator(&self) -> bool {
        matches!(self.diet, Diet::Predator { .. })
    }

    #[must_use]
    pub fn birth_weight(&self) -> f64 {
        self.birth_weight
    }

    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[must_use]
    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    /// Fitness in `[0, 1]` from weight and age.
    ///
    /// Zero below the minimum viable weight; otherwise the product of an age
    /// term (positive sign), an underweight term (negative sign) and an
    /// overweight term (positive sign). With positive steepness the age term
    /// falls with age and the weight terms make fitness rise and then fall.
    #[must_use]
    pub fn fitness(&self, weight: f64, age: u32) -> f64 {
        if weight < self.min_weight {
            return 0.0;
        }
        self.age_curve.positive(f64::from(age))
            * self.underweight_curve.negative(weight)
            * self.overweight_curve.positive(weight)
    }

    #[must_use]
    pub fn wander_probability(&self, fitness: f64) -> f64 {
        self.mu * fitness
    }

    #[must_use]
    pub fn death_probability(&self, fitness: f64) -> f64 {
        if fitness <= 0.0 {
            return 1.0;
        }
        self.omega * (1.0 - fitness)
    }

    /// Breeding chance with `same_species` animals (the breeder included) in the cell.
    #[must_use]
    pub fn birth_chance(&self, fitness: f64, same_species: usize) -> f64 {
        fitness * self.gamma * (same_species as f64 - 1.0)
    }

    #[must_use]
    pub fn birth_loss(&self) -> f64 {
        self.zeta * self.birth_weight
    }

    #[must_use]
    pub fn can_breed(&self, weight: f64) -> bool {
        weight >= self.min_weight + self.birth_loss()
    }

    /// Yearly weight loss from aging.
    #[must_use]
    pub fn weight_loss(&self, weight: f64) -> f64 {
        self.sigma * weight
    }
}

/// Probability that a predator of fitness `predator` catches prey of fitness `prey`.
#[must_use]
pub fn capture_chance(predator: f64, prey: f64, delta_phi_max: f64) -> f64 {
    if predator <= prey {
        return 0.0;
    }
    let delta = predator - prey;
    if delta < delta_phi_max {
        delta / delta_phi_max
    } else {
        1.0
    }
}

/// Registry of the species taking part in a run.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    species: Vec<Species>,
    by_name: HashMap<String, SpeciesId>,
}

impl SpeciesCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers one species. Names must be unique.
    pub fn register(&mut self, params: &SpeciesParams) -> Result<SpeciesId> {
        let species = Species::from_params(params)?;
        if self.by_name.contains_key(species.name()) {
            return Err(SimError::config(format!(
                "species '{}' registered twice",
                species.name()
            )));
        }
        let id = SpeciesId(self.species.len());
        tracing::debug!(species = species.name(), diet = %species.kind(), "Species registered");
        self.by_name.insert(species.name().to_string(), id);
        self.species.push(species);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Result<SpeciesId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SimError::lookup(format!("unknown species '{name}'")))
    }

    #[must_use]
    pub fn get(&self, id: SpeciesId) -> &Species {
        &self.species[id.0]
    }

    /// Species ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        (0..self.species.len()).map(SpeciesId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &Species)> {
        self.species
            .iter()
            .enumerate()
            .map(|(i, s)| (SpeciesId(i), s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

/// Parameter tables for unit tests and downstream test suites.
#[cfg(any(test, feature = "test-fixtures"))]
pub mod presets {
    use biosim_data::SpeciesParams;

    /// Herbivore parameters of the classic island setup.
    #[must_use]
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
    #[must_use]
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
}

#[cfg(test)]
mod tests {
    use super::presets::{herbivore, predator};
    use super::*;

    #[test]
    fn test_fitness_zero_below_min_weight() {
        let s = Species::from_params(&herbivore()).unwrap();
        assert_eq!(s.fitness(1.99, 0), 0.0);
        assert_eq!(s.fitness(0.0, 50), 0.0);
        assert!(s.fitness(2.0, 0) > 0.0);
    }

    #[test]
    fn test_fitness_bounded() {
        let s = Species::from_params(&herbivore()).unwrap();
        for w in [2.0, 6.0, 20.0, 40.0, 200.0] {
            for a in [0, 10, 40, 100] {
                let f = s.fitness(w, a);
                assert!((0.0..=1.0).contains(&f), "fitness {f} out of range");
            }
        }
    }

    #[test]
    fn test_fitness_unimodal_in_weight() {
        let s = Species::from_params(&herbivore()).unwrap();
        let low = s.fitness(3.0, 5);
        let mid = s.fitness(20.0, 5);
        let high = s.fitness(200.0, 5);
        assert!(mid > low);
        assert!(mid > high);
    }

    #[test]
    fn test_death_probability() {
        let s = Species::from_params(&herbivore()).unwrap();
        assert_eq!(s.death_probability(0.0), 1.0);
        assert_eq!(s.death_probability(-0.1), 1.0);
        assert!((s.death_probability(0.5) - 0.2).abs() < 1e-12);
        assert_eq!(s.death_probability(1.0), 0.0);
    }

    #[test]
    fn test_wander_and_birth_chance() {
        let s = Species::from_params(&herbivore()).unwrap();
        assert!((s.wander_probability(0.8) - 0.4).abs() < 1e-12);
        assert_eq!(s.birth_chance(0.9, 1), 0.0);
        assert!((s.birth_chance(0.5, 3) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_can_breed_leaves_parent_above_min_weight() {
        let s = Species::from_params(&herbivore()).unwrap();
        // min_weight 2.0 + zeta 0.75 * birth weight 6.0
        assert!((s.birth_loss() - 4.5).abs() < 1e-12);
        assert!(s.can_breed(6.5));
        assert!(!s.can_breed(6.49));
    }

    #[test]
    fn test_capture_chance_rules() {
        assert_eq!(capture_chance(0.9, 0.9, 10.0), 0.0);
        assert_eq!(capture_chance(0.2, 0.9, 10.0), 0.0);
        assert!((capture_chance(0.9, 0.4, 1.0) - 0.5).abs() < 1e-12);
        assert_eq!(capture_chance(0.9, 0.1, 0.5), 1.0);
        assert_eq!(capture_chance(0.6, 0.1, 0.5), 1.0);
    }

    #[test]
    fn test_classification() {
        let h = Species::from_params(&herbivore()).unwrap();
        let p = Species::from_params(&predator()).unwrap();
        assert_eq!(h.kind(), DietKind::Herbivore);
        assert!(p.is_predator());
        assert_eq!(p.diet(), Diet::Predator { delta_phi_max: 10.0 });
    }

    #[test]
    fn test_feed_desire_wins_over_delta_phi_max() {
        let mut params = herbivore();
        params.delta_phi_max = Some(5.0);
        let s = Species::from_params(&params).unwrap();
        assert!(!s.is_predator());
    }

    #[test]
    fn test_unclassifiable_species_rejected() {
        let mut params = herbivore();
        params.feed_desire = None;
        let err = Species::from_params(&params).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_missing_parameter_rejected() {
        let mut params = predator();
        params.omega = None;
        let err = Species::from_params(&params).unwrap_err();
        assert!(err.to_string().contains("omega"));
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let edits: [fn(&mut SpeciesParams); 7] = [
            |p| p.phi_age = Some(f64::NAN),
            |p| p.age_midpoint = Some(f64::INFINITY),
            |p| p.phi_under = Some(f64::NAN),
            |p| p.under_midpoint = Some(f64::NEG_INFINITY),
            |p| p.phi_over = Some(f64::INFINITY),
            |p| p.over_midpoint = Some(f64::NAN),
            |p| p.sigma = Some(-0.1),
        ];
        for edit in edits {
            let mut params = herbivore();
            edit(&mut params);
            let err = Species::from_params(&params).unwrap_err();
            assert!(matches!(err, SimError::Config(_)), "{err}");
        }

        let mut params = herbivore();
        params.feed_desire = Some(f64::NAN);
        assert!(Species::from_params(&params).is_err());
        params.feed_desire = Some(-1.0);
        assert!(Species::from_params(&params).is_err());

        let mut params = predator();
        params.delta_phi_max = Some(f64::INFINITY);
        assert!(Species::from_params(&params).is_err());
        params.delta_phi_max = Some(f64::NAN);
        assert!(Species::from_params(&params).is_err());
    }

    #[test]
    fn test_default_names() {
        let mut h = herbivore();
        h.name = None;
        let mut p = predator();
        p.name = Some(String::new());
        assert_eq!(Species::from_params(&h).unwrap().name(), "B");
        assert_eq!(Species::from_params(&p).unwrap().name(), "R");
    }

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = SpeciesCatalog::new();
        let h = catalog.register(&herbivore()).unwrap();
        let p = catalog.register(&predator()).unwrap();
        assert_eq!(catalog.lookup("Herbivore").unwrap(), h);
        assert_eq!(catalog.lookup("Predator").unwrap(), p);
        assert!(matches!(
            catalog.lookup("Wolf").unwrap_err(),
            SimError::Lookup(_)
        ));
        assert!(catalog.register(&herbivore()).is_err());
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec![h, p]);
    }
}
