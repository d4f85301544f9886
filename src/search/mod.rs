pub mod pool;

pub use pool::{SearchOutcome, SearchPool};
