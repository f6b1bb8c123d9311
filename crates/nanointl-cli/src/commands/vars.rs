//! Implementation of the `nanointl vars` command.

use std::collections::BTreeSet;
use std::path::PathBuf;

use miette::{IntoDiagnostic, miette};
use nanointl::inspect::{render_callbacks, required_variables};
use nanointl::{IntlOptions, build_intl};
use serde::Serialize;

use super::{cli_plugins, load_catalog};
use crate::output::table::{MessageVars, format_vars_table};

/// Arguments for the vars command.
#[derive(Debug, clap::Args)]
pub struct VarsArgs {
    /// Catalog file (.json)
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// Only show this message
    #[arg(long)]
    pub id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct VarsJson<'a> {
    id: &'a str,
    variables: &'a [String],
    callbacks: &'a [String],
}

/// Run the vars command.
pub fn run_vars(args: VarsArgs) -> miette::Result<i32> {
    let catalog = load_catalog(&args.catalog)?;
    let options = IntlOptions::builder().plugins(cli_plugins()).build();
    let intl = build_intl("en", catalog, options).into_diagnostic()?;

    let ids: Vec<&str> = match &args.id {
        Some(id) if intl.ast(id).is_some() => vec![id.as_str()],
        Some(id) => return Err(miette!("message '{id}' is not in {}", args.catalog.display())),
        None => intl.message_ids().collect(),
    };

    let messages: Vec<MessageVars> = ids
        .into_iter()
        .filter_map(|id| {
            let nodes = intl.ast(id)?;
            Some(MessageVars {
                id: id.to_string(),
                variables: required_variables(nodes).into_iter().collect(),
                callbacks: render_callbacks(nodes)
                    .into_iter()
                    .map(|(_, name)| name)
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect(),
            })
        })
        .collect();

    if args.json {
        let json: Vec<VarsJson<'_>> = messages
            .iter()
            .map(|message| VarsJson {
                id: &message.id,
                variables: &message.variables,
                callbacks: &message.callbacks,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
    } else {
        println!("{}", format_vars_table(&messages));
    }
    Ok(exitcode::OK)
}
