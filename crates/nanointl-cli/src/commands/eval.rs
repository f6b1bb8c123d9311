//! Implementation of the `nanointl eval` command.

use std::path::PathBuf;

use miette::{IntoDiagnostic, miette};
use nanointl::{IntlOptions, Value, Values, build_intl};
use serde::Serialize;
use serde_json::json;

use super::{cli_plugins, load_catalog};

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Locale to format in (e.g., en, de, ru)
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Catalog file (.json)
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// Id of the message to format
    #[arg(long, required = true)]
    pub id: String,

    /// Arguments in name=value format (repeatable)
    #[arg(short = 'a', long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, Value)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub id: String,
    pub result: String,
}

/// Parse a `name=value` argument. Numbers and booleans are typed, anything
/// else is a string.
fn parse_key_val(s: &str) -> Result<(String, Value), String> {
    let (name, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid argument '{s}': expected name=value"))?;
    let value = if let Ok(n) = raw.parse::<i64>() {
        Value::Int(n)
    } else if let Some(n) = raw.parse::<f64>().ok().filter(|n| n.is_finite()) {
        Value::Float(n)
    } else if let Ok(b) = raw.parse::<bool>() {
        Value::Bool(b)
    } else {
        Value::from(raw)
    };
    Ok((name.to_string(), value))
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let catalog = load_catalog(&args.catalog)?;
    if !catalog.contains(&args.id) {
        return Err(miette!(
            "message '{}' is not in {}",
            args.id,
            args.catalog.display()
        ));
    }

    let options = IntlOptions::builder().plugins(cli_plugins()).build();
    let intl = build_intl(&args.locale, catalog, options).into_diagnostic()?;
    let values: Values = args.vars.into_iter().collect();

    match intl.format_message_string(&args.id, &values) {
        Ok(result) => {
            if args.json {
                let output = EvalResult {
                    id: args.id,
                    result,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = json!({ "error": e.to_string() });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Format error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_val_types_values() {
        assert_eq!(parse_key_val("n=3"), Ok(("n".to_string(), Value::Int(3))));
        assert_eq!(parse_key_val("r=0.5"), Ok(("r".to_string(), Value::Float(0.5))));
        assert_eq!(parse_key_val("on=true"), Ok(("on".to_string(), Value::Bool(true))));
        assert_eq!(
            parse_key_val("name=Ada=Lovelace"),
            Ok(("name".to_string(), Value::from("Ada=Lovelace")))
        );
        assert!(parse_key_val("oops").is_err());
    }
}
