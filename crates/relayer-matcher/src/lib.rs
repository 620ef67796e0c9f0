pub mod engine;
pub mod submitter;

pub use engine::{ExhaustionFlags, MatchSubmitter, MatchingEngine};
pub use submitter::ChainSubmitter;
