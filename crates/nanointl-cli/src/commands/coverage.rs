//! Coverage command implementation.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::Args;
use miette::{IntoDiagnostic, Report, Result, miette};
use nanointl::inspect::required_variables;
use nanointl::{BuildError, Catalog, Intl, IntlOptions, LocaleContext, build_intl};
use serde::Serialize;
use tracing::debug;

use super::{cli_plugins, load_catalog};
use crate::output::MessageDiagnostic;
use crate::output::table::{LocaleCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source locale catalog (e.g., en.json).
    #[arg(long)]
    pub source: PathBuf,

    /// Locales to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Directory containing translation catalogs. Defaults to the source file directory.
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson<'a> {
    locale: &'a str,
    translated: usize,
    total: usize,
    missing: &'a [String],
    mismatched: &'a [String],
}

/// Build a catalog, reporting the first bad message against its template.
fn build(path: &Path, locale: &str, catalog: Catalog) -> Result<Intl> {
    let templates = catalog.clone();
    let options = IntlOptions::builder().plugins(cli_plugins()).build();
    build_intl(locale, catalog, options).map_err(|err| match err {
        BuildError::Parse { id, source } => {
            let template = templates.get(&id).unwrap_or_default();
            Report::new(MessageDiagnostic::from_parse_error(path, &id, template, &source))
        }
        other => miette!("{other}"),
    })
}

/// Source locale from a file name such as `en.json`, else English.
fn locale_of(path: &Path) -> &str {
    path.file_stem()
        .and_then(OsStr::to_str)
        .filter(|stem| LocaleContext::new(stem).is_ok())
        .unwrap_or("en")
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let source = build(
        &args.source,
        locale_of(&args.source),
        load_catalog(&args.source)?,
    )?;
    let source_count = source.message_ids().count();

    let base_dir = args
        .translations
        .clone()
        .or_else(|| args.source.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut coverage_data = Vec::with_capacity(args.lang.len());
    for lang in &args.lang {
        let lang_file = base_dir.join(format!("{lang}.json"));
        let translation = if lang_file.exists() {
            Some(build(&lang_file, lang, load_catalog(&lang_file)?)?)
        } else {
            debug!(file = %lang_file.display(), "no translation file");
            None
        };

        let mut missing = Vec::new();
        let mut mismatched = Vec::new();
        for id in source.message_ids() {
            let translated = translation.as_ref().and_then(|intl| intl.ast(id));
            match (translated, source.ast(id)) {
                (Some(theirs), Some(ours)) => {
                    if required_variables(theirs) != required_variables(ours) {
                        mismatched.push(id.to_string());
                    }
                }
                _ => missing.push(id.to_string()),
            }
        }

        coverage_data.push(LocaleCoverage {
            locale: lang.clone(),
            translated: source_count - missing.len(),
            missing,
            mismatched,
        });
    }

    let any_incomplete = coverage_data
        .iter()
        .any(|c| !c.missing.is_empty() || !c.mismatched.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson<'_>> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: &c.locale,
                translated: c.translated,
                total: source_count,
                missing: &c.missing,
                mismatched: &c.mismatched,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_data).into_diagnostic()?);
    } else {
        println!("{}", format_coverage_table(source_count, &coverage_data));
        for coverage in &coverage_data {
            if !coverage.missing.is_empty() {
                println!("\nMissing in {}:", coverage.locale);
                for id in &coverage.missing {
                    println!("  - {id}");
                }
            }
            if !coverage.mismatched.is_empty() {
                println!("\nArguments differ in {}:", coverage.locale);
                for id in &coverage.mismatched {
                    println!("  - {id}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
