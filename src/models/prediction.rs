use serde::{Deserialize, Serialize};

/// One linear congruential generator: `next = (a * prev + c) mod m`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcgParameters {
    pub name: String,
    pub a: u64,
    pub c: u64,
    pub m: u64,
}

impl LcgParameters {
    pub fn new(name: &str, a: u64, c: u64, m: u64) -> Self {
        Self { name: name.to_string(), a, c, m }
    }

    /// The built-in catalog in priority order: GCC, Microsoft, Park-Miller.
    pub fn catalog() -> Vec<LcgParameters> {
        vec![
            Self::new("gcc", 1_103_515_245, 12_345, 1 << 31),
            Self::new("microsoft", 214_013, 2_531_011, 1 << 32),
            Self::new("park_miller", 16_807, 0, (1 << 31) - 1),
        ]
    }
}

/// Where a prediction came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionSource {
    /// The observed sequence fits a catalog generator.
    LcgRecovery { generator: LcgParameters },
    /// No generator fit; values extend the last observed delta.
    LinearExtrapolation { delta: i64 },
    /// Too few observations to say anything.
    Insufficient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub source: PredictionSource,
    pub values: Vec<i64>,
}

impl Prediction {
    pub fn insufficient() -> Self {
        Self { source: PredictionSource::Insufficient, values: Vec::new() }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self.source, PredictionSource::LcgRecovery { .. })
    }
}
