#![forbid(unsafe_code)]

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod preview;

pub use args::CliArgs;
pub use config::{ReplaceConfig, USAGE};
pub use error::RunError;

use std::io::{BufRead, Write};
use tlr_core::{find_matches, generate_candidates};
use tlr_storage::{ApplyReport, SqliteStore};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub testcases: usize,
    pub candidates: usize,
    /// `None` when nothing was written (dry run or nothing to replace).
    pub applied: Option<ApplyReport>,
}

/// One replacement run: confirm, resolve, walk, load, diff, preview, apply.
///
/// Storage is not opened before the operator confirms. The connection is
/// closed when this returns, on every path.
pub fn run<R: BufRead, W: Write>(
    config: &ReplaceConfig,
    input: &mut R,
    out: &mut W,
) -> Result<RunSummary, RunError> {
    preview::write_banner(out, config)?;
    if !config.assume_yes {
        preview::write_confirm_prompt(out)?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(RunError::Aborted);
        }
    }

    let mut store = SqliteStore::open(&config.connection).map_err(RunError::Connection)?;
    tracing::info!(
        database = %config.connection.database,
        user = %config.connection.user,
        "connected"
    );

    let summary = replace_in_store(&mut store, config, out);
    if let Err(err) = store.close() {
        tracing::warn!(error = %err, "closing database failed");
    }
    summary
}

fn replace_in_store<W: Write>(
    store: &mut SqliteStore,
    config: &ReplaceConfig,
    out: &mut W,
) -> Result<RunSummary, RunError> {
    let project = store
        .find_project(&config.project)
        .map_err(RunError::ProjectNotFound)?;
    tracing::info!(project = %project.name, id = project.id, "resolved project");

    let leaves = store
        .collect_testcase_nodes(project.id)
        .map_err(RunError::NodeFetch)?;
    let testcases = store
        .load_testcases(&leaves)
        .map_err(RunError::TestcaseFetch)?;
    tracing::info!(
        leaves = leaves.len(),
        testcases = testcases.len(),
        "loaded project test cases"
    );

    let reports = find_matches(&testcases, config.pair.search());
    let candidates = generate_candidates(&testcases, &config.pair);
    let mut summary = RunSummary {
        testcases: testcases.len(),
        candidates: candidates.len(),
        applied: None,
    };

    preview::write_match_summary(out, &reports)?;
    preview::write_preview(out, &candidates, &config.pair)?;

    if candidates.is_empty() {
        // Search equals replace, or the text would not change: show where it occurs.
        preview::write_matches(out, &reports, config.pair.search())?;
        writeln!(out, "Nothing to replace.")?;
        return Ok(summary);
    }
    if config.dry_run {
        writeln!(
            out,
            "Dry run: {} change(s) not written.",
            candidates.len()
        )?;
        return Ok(summary);
    }

    let report = store.apply_candidates(&candidates)?;
    tracing::info!(
        candidates = report.candidates,
        fields = report.fields,
        "applied changes"
    );
    writeln!(
        out,
        "Applied {} change(s) ({} field(s)).",
        report.candidates, report.fields
    )?;
    summary.applied = Some(report);
    Ok(summary)
}
