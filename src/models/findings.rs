use serde::Serialize;
use super::analysis::BlockAnalysis;
use super::candidate::Candidate;
use super::prediction::Prediction;

/// Result of running the matching attack for one artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "artifact", rename_all = "snake_case")]
pub enum Findings {
    Digest { preimage: Option<Candidate> },
    Ciphertext { candidates: Vec<Candidate>, blocks: Option<BlockAnalysis> },
    ObservedSequence { prediction: Prediction },
    Token { secret: Option<Candidate> },
}

impl Findings {
    /// The strongest candidate, if any. Ties keep the earliest one.
    pub fn best(&self) -> Option<&Candidate> {
        match self {
            Findings::Digest { preimage } => preimage.as_ref(),
            Findings::Token { secret } => secret.as_ref(),
            Findings::Ciphertext { candidates, .. } => candidates
                .iter()
                .enumerate()
                .min_by_key(|(i, c)| (c.confidence.rank(), *i))
                .map(|(_, c)| c),
            Findings::ObservedSequence { .. } => None,
        }
    }
}
