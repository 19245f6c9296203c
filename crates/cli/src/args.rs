#![forbid(unsafe_code)]

use clap::Parser;
use std::ffi::OsString;
use tlr_storage::{DEFAULT_DATABASE, DEFAULT_USER};

/// Long flags that are also accepted with a single dash (`-project=Demo`).
const LONG_FLAGS: &[&str] = &[
    "db",
    "project",
    "search",
    "replace",
    "user",
    "password",
    "dry-run",
    "yes",
    "no-color",
    "log-level",
    "help",
    "version",
];

/// Flags whose value may follow as the next argument.
const VALUE_FLAGS: &[&str] = &[
    "db",
    "project",
    "search",
    "replace",
    "user",
    "password",
    "log-level",
];

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "tl_replace",
    version,
    about = "Bulk find-and-replace across a TestLink project's test cases"
)]
pub struct CliArgs {
    /// TestLink database file
    #[arg(long, allow_hyphen_values = true, default_value = DEFAULT_DATABASE)]
    pub db: String,

    /// Name of the project node to operate on
    #[arg(long, allow_hyphen_values = true)]
    pub project: Option<String>,

    /// Literal text to find
    #[arg(long, allow_hyphen_values = true)]
    pub search: Option<String>,

    /// Literal text to substitute
    #[arg(long, allow_hyphen_values = true)]
    pub replace: Option<String>,

    /// User name for the database
    #[arg(short = 'u', long = "user", allow_hyphen_values = true, default_value = DEFAULT_USER)]
    pub user: String,

    /// Password for the database
    #[arg(
        short = 'P',
        long = "password",
        allow_hyphen_values = true,
        default_value = "",
        hide_default_value = true
    )]
    pub password: String,

    /// Show the preview without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Log filter, e.g. `info` or `tlr_storage=debug` (defaults to RUST_LOG, then `warn`)
    #[arg(long, allow_hyphen_values = true)]
    pub log_level: Option<String>,
}

impl CliArgs {
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrites single-dash long flags (`-db`, `-search=x`) to their `--` form.
/// The argument after a value flag given without `=` is its value and is kept
/// as is, even when it starts with `-`. Everything after a bare `--` is left
/// alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    let mut value_next = false;
    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || passthrough || value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        value_next = takes_separate_value(text);
        match text.strip_prefix('-') {
            Some(rest) if !rest.starts_with('-') && is_long_flag(rest) => {
                out.push(OsString::from(format!("--{rest}")));
            }
            _ => out.push(arg),
        }
    }
    out
}

fn takes_separate_value(text: &str) -> bool {
    if text == "-u" || text == "-P" {
        return true;
    }
    let name = text.strip_prefix("--").or_else(|| text.strip_prefix('-'));
    name.is_some_and(|name| VALUE_FLAGS.contains(&name))
}

fn is_long_flag(rest: &str) -> bool {
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
