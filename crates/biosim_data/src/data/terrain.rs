use serde::{Deserialize, Serialize};

/// Description of one terrain kind, keyed by its single-character map code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSpec {
    /// Map character identifying the terrain.
    pub code: char,
    /// Regrowth coefficient in `[0, 1]`; 0 never regrows, 1 refills completely.
    pub alpha: f64,
    /// Feed available in a freshly built cell and the regrowth ceiling.
    pub max_feed: f64,
    /// Whether cells of this kind hold animals and take part in the year cycle.
    pub live: bool,
    /// Display colour, carried for report collaborators.
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

impl TerrainSpec {
    #[must_use]
    pub fn new(code: char, alpha: f64, max_feed: f64, live: bool) -> Self {
        Self {
            code,
            alpha,
            max_feed,
            live,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = Some(color);
        self
    }

    /// The classic five-kind island catalog.
    ///
    /// Water (`H`) and mountain (`F`) are dead terrain, desert (`O`) is live
    /// but barren, savannah (`S`) regrows logistically with `alpha` and jungle
    /// (`J`) refills completely every year.
    #[must_use]
    pub fn classic(alpha: f64, fmax_savannah: f64, fmax_jungle: f64) -> Vec<Self> {
        vec![
            Self::new('H', 0.0, 0.0, false).with_color([0x00, 0x00, 0xff]),
            Self::new('J', 1.0, fmax_jungle, true).with_color([0x00, 0x80, 0x00]),
            Self::new('S', alpha, fmax_savannah, true).with_color([0xad, 0xff, 0x2f]),
            Self::new('F', 0.0, 0.0, false).with_color([0x80, 0x80, 0x80]),
            Self::new('O', 0.0, 0.0, true).with_color([0xff, 0xd7, 0x00]),
        ]
    }
}
