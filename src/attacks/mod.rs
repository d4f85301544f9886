pub mod hash;
pub mod classical;
pub mod blocks;
pub mod lcg;
pub mod token;
pub mod timing;
pub mod challenge;

pub use hash::{crack, crack_with_cancel, compute_digest, hash_hex};
pub use classical::{
    break_cipher, break_cipher_as, caesar_decode, caesar_encode, rot13, xor_decode, xor_decode_as, xor_encode_hex,
    CipherStrategy,
};
pub use blocks::{analyze, analyze_as};
pub use lcg::{recover_and_predict, recover_and_predict_with};
pub use token::{crack_secret, decode_token, forge_none_algorithm, sign_token, TokenAlgorithm};
pub use timing::{probe, ProbeReport, TimingProbe};
pub use challenge::solve_challenge;

use tracing::info;
use crate::config::AttackConfig;
use crate::errors::CrackError;
use crate::models::{Artifact, Findings};

/// Run the attack that matches the artifact's type.
///
/// Configuration problems are reported before any work starts. A search that
/// finds nothing is a normal `Ok` result.
pub fn attack(artifact: &Artifact, config: &AttackConfig) -> Result<Findings, CrackError> {
    config.validate()?;
    info!(artifact = artifact.kind(), "Running attack");

    let findings = match artifact {
        Artifact::Digest(digest) => Findings::Digest { preimage: crack(digest, config)? },
        Artifact::Ciphertext(ciphertext) => Findings::Ciphertext {
            candidates: break_cipher_as(ciphertext.text(), ciphertext.hint(), config)?,
            blocks: config
                .analyze_blocks
                .then(|| analyze_as(ciphertext.text(), ciphertext.hint())),
        },
        Artifact::ObservedSequence(values) => Findings::ObservedSequence {
            prediction: recover_and_predict_with(values, config.prediction_count, &config.lcg_catalog),
        },
        Artifact::Token(token) => Findings::Token {
            secret: crack_secret(&token.to_string(), &config.secrets),
        },
    };
    Ok(findings)
}
