//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain uses the command's own text.

use std::io::{self, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a single serializable value.
///
/// Table and plain formats use the pre-formatted `text_fn` output.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    text_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table | OutputFormat::Plain => Ok(text_fn(data)),
        structured => render_structured(structured, data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_structured<T: Serialize + ?Sized>(
    format: &OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        _ => serde_json::to_string_pretty(data)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Item {
        name: &'static str,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "Name")]
        name: String,
    }

    fn render(format: &OutputFormat) -> String {
        render_single(format, &[Item { name: "a" }, Item { name: "b" }], |items| {
            items.iter().map(|i| i.name).collect::<Vec<_>>().join("\n")
        })
        .unwrap()
    }

    #[test]
    fn plain_uses_text_fn() {
        assert_eq!(render(&OutputFormat::Plain), "a\nb");
    }

    #[test]
    fn compact_json_is_single_line() {
        assert_eq!(
            render(&OutputFormat::JsonCompact),
            r#"[{"name":"a"},{"name":"b"}]"#
        );
    }

    #[test]
    fn yaml_lists_items() {
        assert!(render(&OutputFormat::Yaml).contains("- name: a"));
    }

    #[test]
    fn table_uses_renamed_header() {
        let table = render_table(&[ItemRow { name: "a".into() }]);
        assert!(table.contains("Name"));
        assert!(table.contains('╭'));
    }
}
