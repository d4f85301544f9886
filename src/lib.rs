//! Weak-cryptography analysis and cracking engine.
//!
//! Given a captured artifact (a digest, an encoded or enciphered string, an
//! observed number sequence or a signed token) the engine recovers the
//! plaintext, key or future outputs where the protection is weak.

pub mod attacks;
pub mod config;
pub mod errors;
pub mod models;
pub mod reporting;
pub mod scoring;
pub mod search;
pub mod wordlist;
