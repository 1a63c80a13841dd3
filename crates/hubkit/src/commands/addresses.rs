//! Customer address command handlers.

use tabled::Tabled;

use hubkit_core::{Address, CoreError, ExportSummary, api::InventoryClient, export_customer_addresses};

use crate::cli::{AddressesArgs, AddressesCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AddressRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "First Name")]
    first_name: String,
    #[tabled(rename = "Last Name")]
    last_name: String,
    #[tabled(rename = "Street")]
    street: String,
    #[tabled(rename = "Postcode")]
    postcode: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Latitude")]
    lat: String,
    #[tabled(rename = "Longitude")]
    lon: String,
}

impl From<&Address> for AddressRow {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id.to_string(),
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            street: a.street.clone(),
            postcode: a.postcode.clone(),
            state: a.state.clone(),
            country: a.country.clone(),
            lat: a.lat.to_string(),
            lon: a.lon.to_string(),
        }
    }
}

fn render_export(format: &OutputFormat, summary: &ExportSummary) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<AddressRow> = summary.addresses.iter().map(AddressRow::from).collect();
            Ok(format!(
                "CSV file saved to: {}\n{}",
                summary.path.display(),
                output::render_table(&rows)
            ))
        }
        _ => output::render_single(format, summary, |s| s.path.display().to_string()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AddressesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let client: InventoryClient = config::inventory_config(&cfg, global)?.connect()?;

    match args.command {
        AddressesCommand::Export(export) => {
            let path = export.out.unwrap_or(cfg.export_path);
            let summary = export_customer_addresses(&client, &path).await?;
            let out = render_export(&global.output, &summary)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AddressesCommand::Count => {
            let count = client
                .customer_count()
                .await
                .map_err(|e| CoreError::transport(e, None))?;
            let out = output::render_single(&global.output, &count, u64::to_string)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
