#![forbid(unsafe_code)]

use crate::config::ReplaceConfig;
use colored::{Color, Colorize};
use std::io::{self, Write};
use tlr_core::{ChangeCandidate, ChangeTarget, FieldChange, MatchReport, ReplacePair};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

/// Splits `text` around non-overlapping occurrences of `needle`.
pub fn segments<'a>(text: &'a str, needle: &str) -> Vec<Segment<'a>> {
    if needle.is_empty() {
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![Segment::Plain(text)]
        };
    }

    let mut out = Vec::new();
    let mut cursor = 0;
    for (start, matched) in text.match_indices(needle) {
        if start > cursor {
            out.push(Segment::Plain(&text[cursor..start]));
        }
        out.push(Segment::Match(matched));
        cursor = start + matched.len();
    }
    if cursor < text.len() {
        out.push(Segment::Plain(&text[cursor..]));
    }
    out
}

/// Writes `text` with every `needle` coloured, always ending the line.
pub fn write_highlighted<W: Write>(
    out: &mut W,
    text: &str,
    needle: &str,
    color: Color,
) -> io::Result<()> {
    for segment in segments(text, needle) {
        match segment {
            Segment::Plain(plain) => write!(out, "{plain}")?,
            Segment::Match(matched) => write!(out, "{}", matched.color(color))?,
        }
    }
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_banner<W: Write>(out: &mut W, config: &ReplaceConfig) -> io::Result<()> {
    writeln!(out, "+==================================")?;
    writeln!(out, "|        Database     : {}", config.connection.database)?;
    writeln!(out, "| Target Project Name : {}", config.project)?;
    writeln!(out, "|      Search  String : {}", config.pair.search())?;
    writeln!(out, "|      Replace String : {}", config.pair.replace())?;
    if config.dry_run {
        writeln!(out, "|      Mode           : dry run (no writes)")?;
    }
    writeln!(out, "+==================================")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_confirm_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        " * Are these settings OK? ( YES : Press Enter / NO : Press CTRL+C )"
    )?;
    out.flush()
}

pub fn write_match_summary<W: Write>(out: &mut W, reports: &[MatchReport]) -> io::Result<()> {
    let occurrences: usize = reports.iter().map(MatchReport::occurrences).sum();
    writeln!(
        out,
        " * {occurrences} occurrence(s) in {} test case(s)",
        reports.len()
    )?;
    writeln!(out)
}

/// Every field holding `search`, highlighted, grouped by test case.
pub fn write_matches<W: Write>(
    out: &mut W,
    reports: &[MatchReport],
    search: &str,
) -> io::Result<()> {
    for report in reports {
        let header = format!(
            "=== Test Case ID : {} (Internal : {}) ===",
            report.external_id, report.testcase_id
        );
        writeln!(out, "{}", header.green())?;

        let mut step = None;
        for found in &report.matches {
            let indent = match found.step {
                None => " ",
                Some(number) => {
                    if step != Some(number) {
                        writeln!(out, " Step No.: {number}")?;
                        step = Some(number);
                    }
                    "  "
                }
            };
            write!(out, "{indent}{}: ", found.field.label())?;
            write_highlighted(out, &found.text, search, Color::Red)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Old/new text of every pending change, grouped by test case.
pub fn write_preview<W: Write>(
    out: &mut W,
    candidates: &[ChangeCandidate],
    pair: &ReplacePair,
) -> io::Result<()> {
    let mut current: Option<i64> = None;
    for candidate in candidates {
        let target = candidate.target();
        if current != Some(target.testcase_id()) {
            if current.is_some() {
                writeln!(out)?;
            }
            current = Some(target.testcase_id());
            let header = format!(
                "=== Test Case ID : {} (Internal : {}) ===",
                target.external_id(),
                target.testcase_id()
            );
            writeln!(out, "{}", header.green())?;
        }

        let indent = match target {
            ChangeTarget::TestCase { .. } => " ",
            ChangeTarget::Step { number, .. } => {
                writeln!(out, " Step No.: {number}")?;
                "  "
            }
        };
        for change in candidate.changes() {
            write_change(out, indent, change, pair)?;
        }
    }
    if current.is_some() {
        writeln!(out)?;
    }
    Ok(())
}

fn write_change<W: Write>(
    out: &mut W,
    indent: &str,
    change: &FieldChange,
    pair: &ReplacePair,
) -> io::Result<()> {
    writeln!(out, "{indent}{}: ", change.field.label())?;
    write!(out, "   old: ")?;
    write_highlighted(out, &change.old, pair.search(), Color::Red)?;
    write!(out, "   new: ")?;
    write_highlighted(out, &change.new, pair.replace(), Color::BrightBlue)
}
