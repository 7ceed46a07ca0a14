mod analyze;
mod cli;
mod config;
mod error;
mod logging;
mod report;
mod systems;
mod types;

use crate::analyze::themes::{self, Theme};
use crate::error::ReachError;
use crate::report::{OutputFormat, Report};
use crate::systems::catalog::Catalog;
use crate::types::config::FormatSetting;
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const NOT_PERMITTED: i32 = 1;
    pub const UNKNOWN_SELECTOR: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn output_format(
    flag: Option<cli::ReportFormat>,
    configured: Option<FormatSetting>,
) -> OutputFormat {
    match (flag, configured) {
        (Some(cli::ReportFormat::Json), _) => OutputFormat::Json,
        (Some(cli::ReportFormat::Md), _) => OutputFormat::Md,
        (None, Some(FormatSetting::Json)) => OutputFormat::Json,
        (None, Some(FormatSetting::Md)) | (None, None) => OutputFormat::Md,
    }
}

fn run(cli: cli::Cli) -> Result<i32, ReachError> {
    tracing::info!("powerreach v{}", env!("CARGO_PKG_VERSION"));
    let loaded = config::load_config(&cli.config_dir)?;
    let catalog = Catalog::with_config(loaded.as_ref())?;
    let format = output_format(
        cli.command.format(),
        loaded.as_ref().and_then(|cfg| cfg.format()),
    );

    let report = match cli.command {
        cli::Commands::List => {
            for (key, system) in catalog.iter() {
                println!("{key:<22} {}", system.name());
            }
            return Ok(exit_code::SUCCESS);
        }
        cli::Commands::Check(cmd) => {
            let system = catalog.get(&cmd.system)?;
            if system.can_perform(&cmd.action) {
                println!("{} can perform {}", system.name(), cmd.action);
                return Ok(exit_code::SUCCESS);
            }
            println!("{} cannot perform {}", system.name(), cmd.action);
            return Ok(exit_code::NOT_PERMITTED);
        }
        cli::Commands::Analyze(cmd) => {
            let system = catalog.get(&cmd.system)?;
            Report::Analysis(analyze::analyze(system)?)
        }
        cli::Commands::Compare(cmd) => {
            let first = catalog.get(&cmd.first)?;
            let second = catalog.get(&cmd.second)?;
            Report::Comparison(analyze::compare(first, second)?)
        }
        cli::Commands::Summary(cmd) => {
            let systems = catalog.select(&cmd.systems)?;
            Report::Summary(analyze::summarize(&systems)?)
        }
        cli::Commands::Demo(cmd) => {
            let system = catalog.get(&cmd.system)?;
            Report::Demonstration(analyze::demonstrate_concept(system)?)
        }
        cli::Commands::Themes(cmd) => {
            let system = catalog.get(&cmd.system)?;
            let selected = match &cmd.theme {
                Some(key) => vec![Theme::from_key(key)?],
                None => Theme::ALL.to_vec(),
            };
            Report::Themes(themes::thematic_breakdown(system, &selected))
        }
    };

    let rendered = report::render(&report, format)?;
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_unknown_selector() {
                std::process::exit(exit_code::UNKNOWN_SELECTOR);
            }
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_configured_format() {
        assert_eq!(
            output_format(Some(cli::ReportFormat::Md), Some(FormatSetting::Json)),
            OutputFormat::Md
        );
        assert_eq!(
            output_format(None, Some(FormatSetting::Json)),
            OutputFormat::Json
        );
        assert_eq!(output_format(None, None), OutputFormat::Md);
    }
}
