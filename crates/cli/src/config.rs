#![forbid(unsafe_code)]

use crate::args::CliArgs;
use tlr_core::ReplacePair;
use tlr_storage::ConnectionSettings;

pub const USAGE: &str = "tl_replace -db=<dbname> -project=<projectname> -search=<search string> -replace=<replace string> [-u=<user>] [-P=<password>]";

/// Everything a run needs, built once from the command line.
#[derive(Clone, Debug)]
pub struct ReplaceConfig {
    pub connection: ConnectionSettings,
    pub project: String,
    pub pair: ReplacePair,
    pub dry_run: bool,
    pub assume_yes: bool,
    pub color: bool,
    pub log_filter: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingFlags(pub Vec<&'static str>);

impl std::fmt::Display for MissingFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flags = self
            .0
            .iter()
            .map(|name| format!("-{name}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "missing required flag(s): {flags}")
    }
}

impl ReplaceConfig {
    pub fn from_args(args: CliArgs) -> Result<Self, MissingFlags> {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        let project = present(args.project);
        let search = present(args.search);
        let replace = present(args.replace);

        let mut missing = Vec::new();
        if project.is_none() {
            missing.push("project");
        }
        if search.is_none() {
            missing.push("search");
        }
        if replace.is_none() {
            missing.push("replace");
        }
        let (Some(project), Some(search), Some(replace)) = (project, search, replace) else {
            return Err(MissingFlags(missing));
        };
        let pair = ReplacePair::try_new(search, replace).map_err(|_| MissingFlags(vec!["search"]))?;

        Ok(Self {
            connection: ConnectionSettings {
                database: args.db,
                user: args.user,
                password: args.password,
            },
            project,
            pair,
            dry_run: args.dry_run,
            assume_yes: args.yes,
            color: !args.no_color,
            log_filter: args.log_level.filter(|v| !v.trim().is_empty()),
        })
    }
}
