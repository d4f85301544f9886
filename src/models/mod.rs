pub mod artifact;
pub mod candidate;
pub mod score;
pub mod analysis;
pub mod prediction;
pub mod findings;

pub use artifact::*;
pub use candidate::*;
pub use score::*;
pub use analysis::*;
pub use prediction::*;
pub use findings::*;
