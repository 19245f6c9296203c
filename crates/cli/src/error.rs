#![forbid(unsafe_code)]

use thiserror::Error;
use tlr_storage::{ApplyError, StoreError};

pub const USAGE_EXIT_CODE: u8 = 1;

/// Failure of one run stage. Each stage exits with its own code.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot open database: {0}")]
    Connection(#[source] StoreError),

    #[error("{0}")]
    ProjectNotFound(#[source] StoreError),

    #[error("failed to fetch test case nodes: {0}")]
    NodeFetch(#[source] StoreError),

    #[error("failed to fetch test cases: {0}")]
    TestcaseFetch(#[source] StoreError),

    #[error("{0}")]
    Apply(#[from] ApplyError),

    #[error("aborted, nothing was written")]
    Aborted,

    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => USAGE_EXIT_CODE,
            Self::Connection(_) => 2,
            Self::ProjectNotFound(_) => 3,
            Self::NodeFetch(_) => 4,
            Self::TestcaseFetch(_) => 5,
            Self::Apply(_) => 6,
            Self::Aborted => 7,
            Self::Io(_) => 8,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::Connection(_) => "connection",
            Self::ProjectNotFound(_) => "not_found",
            Self::NodeFetch(_) | Self::TestcaseFetch(_) => "query",
            Self::Apply(_) => "apply",
            Self::Aborted => "aborted",
            Self::Io(_) => "io",
        }
    }
}
