pub mod attack;
pub mod parser;
pub mod schema;
pub mod types;

pub use attack::{AttackConfig, TimingConfig};
pub use types::*;
pub use parser::parse_config;
