pub mod types;
pub mod classification;

pub use types::CrackError;
pub use classification::ErrorClassification;
