pub mod plausibility;

pub use plausibility::{score, is_printable, printable_ratio, COMMON_WORDS, HINT_WORDS, MIN_PRINTABLE_RATIO};
