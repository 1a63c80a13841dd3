//! Hub command handlers.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tabled::Tabled;

use hubkit_core::{Hub, HubCollection, Reassignment, SerialPlan, reassign_value};

use crate::cli::{AssignArgs, GlobalOpts, HubsArgs, HubsCommand, OutputFormat, Show};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct HubRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Serial Number")]
    serial_number: String,
    #[tabled(rename = "Previous Serial")]
    previous: String,
}

fn rows(hubs: &HubCollection, previous: Option<&HubCollection>) -> Vec<HubRow> {
    let before: HashMap<&str, &str> = previous
        .map(|c| {
            c.hubs
                .iter()
                .map(|h| (h.id.as_str(), h.serial_number.as_str()))
                .collect()
        })
        .unwrap_or_default();

    hubs.hubs
        .iter()
        .map(|h| HubRow {
            id: h.id.clone(),
            serial_number: h.serial_number.clone(),
            previous: before.get(h.id.as_str()).copied().unwrap_or("-").to_owned(),
        })
        .collect()
}

fn plain(hubs: &HubCollection) -> String {
    hubs.hubs
        .iter()
        .map(|h: &Hub| format!("{}\t{}", h.id, h.serial_number))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Read the payload from a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Configured plan with per-invocation flag overrides.
fn plan(base: &SerialPlan, args: &AssignArgs) -> SerialPlan {
    SerialPlan {
        prefix: args.prefix.clone().unwrap_or_else(|| base.prefix.clone()),
        start: args.start.unwrap_or(base.start),
        sentinel: args.sentinel.clone().unwrap_or_else(|| base.sentinel.clone()),
        strict: args.strict || base.strict,
    }
}

fn render(format: &OutputFormat, result: &Reassignment, show: Show) -> Result<String, CliError> {
    match (format, show) {
        (OutputFormat::Table, Show::Both) => Ok(output::render_table(&rows(
            &result.updated,
            Some(&result.original),
        ))),
        (OutputFormat::Table, Show::Original) => {
            Ok(output::render_table(&rows(&result.original, None)))
        }
        (OutputFormat::Table, Show::Updated) => {
            Ok(output::render_table(&rows(&result.updated, None)))
        }
        (_, Show::Both) => output::render_single(format, result, |r| plain(&r.updated)),
        (_, Show::Original) => output::render_single(format, &result.original, plain),
        (_, Show::Updated) => output::render_single(format, &result.updated, plain),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: HubsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        HubsCommand::Assign(assign) => {
            let cfg = config::load(global)?;
            let plan = plan(&cfg.serial, &assign);

            let payload: Value = serde_json::from_str(&read_input(&assign.input)?)?;
            let result = reassign_value(&payload, &plan)?;
            tracing::debug!(hubs = result.updated.hubs.len(), "hubs reassigned");

            let out = render(&global.output, &result, assign.show)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> AssignArgs {
        AssignArgs {
            input: PathBuf::from("-"),
            prefix: None,
            start: Some(10),
            sentinel: None,
            strict: false,
            show: Show::Both,
        }
    }

    #[test]
    fn flags_override_configured_plan() {
        let base = SerialPlan {
            prefix: "CFG".into(),
            ..SerialPlan::default()
        };
        let merged = plan(&base, &args());
        assert_eq!(merged.prefix, "CFG");
        assert_eq!(merged.start, 10);
        assert_eq!(merged.sentinel, "men1");
    }

    #[test]
    fn table_pairs_new_and_previous_serials() {
        let original = HubCollection::new(vec![Hub::new("b2", "old-b"), Hub::new("a1", "old-a")]);
        let result = hubkit_core::reassign(original, &plan(&SerialPlan::default(), &args())).unwrap();

        let table = rows(&result.updated, Some(&result.original));
        assert_eq!(table[0].id, "a1");
        assert_eq!(table[0].previous, "old-a");
        assert!(table[0].serial_number.ends_with("10"));
    }

    #[test]
    fn plain_lists_updated_order() {
        let original = HubCollection::new(vec![Hub::new("b2", ""), Hub::new("a1", "")]);
        let result = hubkit_core::reassign(original, &plan(&SerialPlan::default(), &args())).unwrap();

        let text = render(&OutputFormat::Plain, &result, Show::Both).unwrap();
        assert_eq!(text, "a1\tC25CTW000000000010\nb2\tC25CTW00000000009");
    }
}
