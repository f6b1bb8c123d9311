//! Implementation of the `nanointl check` command.

use std::path::PathBuf;

use miette::{IntoDiagnostic, Report};
use nanointl::parser::{ParseOptions, parse_message};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::debug;

use super::{cli_registry, load_catalog};
use crate::output::MessageDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Catalog files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One problem found by the check command.
#[derive(Debug, Serialize)]
struct Problem {
    file: String,
    id: Option<String>,
    message: String,
    position: Option<usize>,
}

/// Run the check command.
///
/// Every message of every file is parsed, so one run reports all problems.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let registry = cli_registry()?;
    let options = ParseOptions::new(&registry);
    let mut problems = Vec::new();
    let mut checked = 0_usize;

    for path in &args.files {
        let catalog = match load_catalog(path) {
            Ok(catalog) => catalog,
            Err(report) => {
                if !args.json {
                    eprintln!("{report:?}");
                }
                problems.push(Problem {
                    file: path.display().to_string(),
                    id: None,
                    message: format!("{report}: {}", report.root_cause()),
                    position: None,
                });
                continue;
            }
        };
        debug!(file = %path.display(), messages = catalog.len(), "checking catalog");

        for (id, template) in &catalog {
            checked += 1;
            let Err(err) = parse_message(template, &options) else {
                continue;
            };
            if !args.json {
                let diagnostic = MessageDiagnostic::from_parse_error(path, id, template, &err);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            problems.push(Problem {
                file: path.display().to_string(),
                id: Some(id.clone()),
                message: err.to_string(),
                position: err.position(),
            });
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&problems).into_diagnostic()?);
    } else if problems.is_empty() {
        println!(
            "{} {checked} messages in {} file(s)",
            "ok:".if_supports_color(Stream::Stdout, |s| s.green()),
            args.files.len()
        );
    } else {
        println!(
            "{} {} problem(s) in {checked} messages",
            "error:".if_supports_color(Stream::Stdout, |s| s.red()),
            problems.len()
        );
    }

    if problems.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
