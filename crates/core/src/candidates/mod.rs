#![forbid(unsafe_code)]

mod generate;
mod matches;
mod types;

pub use generate::generate_candidates;
pub use matches::{FieldMatch, MatchReport, find_matches};
pub use types::*;

#[cfg(test)]
mod tests;
