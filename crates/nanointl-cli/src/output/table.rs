//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// Coverage data for a single locale.
pub struct LocaleCoverage {
    /// Locale tag (e.g., "de", "fr").
    pub locale: String,
    /// Number of source messages translated.
    pub translated: usize,
    /// Ids of missing messages.
    pub missing: Vec<String>,
    /// Ids whose translation reads different arguments than the source.
    pub mismatched: Vec<String>,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LocaleCoverage]) -> Table {
    let mut table = new_table(vec!["Locale", "Coverage", "Missing", "Mismatched"]);
    for locale in coverage {
        table.add_row(vec![
            locale.locale.clone(),
            format!("{}/{}", locale.translated, source_count),
            locale.missing.len().to_string(),
            locale.mismatched.len().to_string(),
        ]);
    }
    table
}

/// Arguments read by one message.
pub struct MessageVars {
    pub id: String,
    pub variables: Vec<String>,
    pub callbacks: Vec<String>,
}

pub fn format_vars_table(messages: &[MessageVars]) -> Table {
    let mut table = new_table(vec!["Message", "Variables", "Render callbacks"]);
    for message in messages {
        table.add_row(vec![
            message.id.clone(),
            message.variables.join(", "),
            message.callbacks.join(", "),
        ]);
    }
    table
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}
