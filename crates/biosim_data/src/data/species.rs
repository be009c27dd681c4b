use serde::{Deserialize, Serialize};
use std::fmt;

/// Feeding strategy of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DietKind {
    Herbivore,
    Predator,
}

impl fmt::Display for DietKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietKind::Herbivore => write!(f, "herbivore"),
            DietKind::Predator => write!(f, "predator"),
        }
    }
}

/// Raw species parameter table.
///
/// Every field is optional so that a loader can report exactly which
/// parameters are missing. The aliases accept the short names used by the
/// classic parameter files (`v_fod`, `a_halv`, `F`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesParams {
    #[serde(alias = "Navn")]
    pub name: Option<String>,
    #[serde(alias = "v_fod")]
    pub birth_weight: Option<f64>,
    pub beta: Option<f64>,
    pub sigma: Option<f64>,
    #[serde(alias = "v_min")]
    pub min_weight: Option<f64>,
    #[serde(alias = "a_halv")]
    pub age_midpoint: Option<f64>,
    #[serde(alias = "phi_alder")]
    pub phi_age: Option<f64>,
    #[serde(alias = "v_halv_under")]
    pub under_midpoint: Option<f64>,
    pub phi_under: Option<f64>,
    #[serde(alias = "v_halv_over")]
    pub over_midpoint: Option<f64>,
    pub phi_over: Option<f64>,
    pub mu: Option<f64>,
    pub gamma: Option<f64>,
    pub zeta: Option<f64>,
    pub omega: Option<f64>,
    /// Herbivore feed desire `F`.
    #[serde(alias = "F")]
    pub feed_desire: Option<f64>,
    /// Predator fitness gap that guarantees a capture.
    #[serde(alias = "DeltaPhiMax")]
    pub delta_phi_max: Option<f64>,
}

impl SpeciesParams {
    /// Names of the shared (diet independent) parameters that are absent.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("birth_weight", self.birth_weight),
            ("beta", self.beta),
            ("sigma", self.sigma),
            ("min_weight", self.min_weight),
            ("age_midpoint", self.age_midpoint),
            ("phi_age", self.phi_age),
            ("under_midpoint", self.under_midpoint),
            ("phi_under", self.phi_under),
            ("over_midpoint", self.over_midpoint),
            ("phi_over", self.phi_over),
            ("mu", self.mu),
            ("gamma", self.gamma),
            ("zeta", self.zeta),
            ("omega", self.omega),
        ];
        fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect()
    }
}
