#![forbid(unsafe_code)]

pub mod candidates;
pub mod model;

pub use candidates::{
    CandidateError, ChangeCandidate, ChangeTarget, Field, FieldChange, FieldMatch, MatchReport,
    ReplacePair, ReplacePairError, TargetKind, find_matches, generate_candidates,
};
pub use model::{HierarchyNode, NodeType, Step, TestCase};
