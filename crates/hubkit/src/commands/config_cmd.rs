//! Config command handlers.

use hubkit_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::redacted(&config::load(global)?);
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)
                    .map_err(|e| CliError::Config {
                        message: e.to_string(),
                    })?,
                ref structured => output::render_single(structured, &cfg, |_| String::new())?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let path = config::active_path(global);
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::active_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let cfg = Config {
                base_url: global.base_url.clone(),
                ..Config::default()
            };
            config::save_config(&cfg, &path)?;
            tracing::info!(path = %path.display(), "config written");
            output::print_output(
                &format!("Config written to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}
