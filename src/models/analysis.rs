use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weakness {
    /// Two or more identical 16-byte ciphertext blocks.
    EcbMode,
    /// Input length is a multiple of 8; a legacy 64-bit block cipher is possible.
    WeakPadding,
}

impl Weakness {
    pub fn description(&self) -> &'static str {
        match self {
            Weakness::EcbMode => "Possible ECB mode encryption",
            Weakness::WeakPadding => "Possible weak padding (8-byte blocks)",
        }
    }
}

/// Report produced by the block-cipher mode analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockAnalysis {
    pub weaknesses: Vec<Weakness>,
    pub recommendations: Vec<String>,
    /// Divisibility-based hints only; they do not establish the key size.
    pub key_size_hints: Vec<String>,
    pub decoded_len: usize,
    pub block_count: usize,
    /// Number of blocks that duplicate an earlier block.
    pub repeated_blocks: usize,
}

impl BlockAnalysis {
    pub fn ecb_suspected(&self) -> bool {
        self.weaknesses.contains(&Weakness::EcbMode)
    }
}
