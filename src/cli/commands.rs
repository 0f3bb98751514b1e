use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{DemoReport, DemoService, TaxService, TreeService};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Entities) => _entities(),
        Some(Commands::Tree) => _tree(),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, try `polyfold --help`".to_string(),
        )),
    }
}

fn demo_service() -> CliResult<DemoService> {
    let settings = Settings::load()?;
    debug!("settings: {:?}", settings);
    Ok(DemoService::new(
        TaxService::from_settings(&settings)?,
        TreeService::from_settings(&settings),
    ))
}

#[instrument]
fn _entities() -> CliResult<()> {
    let report = demo_service()?.run_entities()?;
    print_report("Taxable entities", &report);
    report.into_result()?;
    Ok(())
}

#[instrument]
fn _tree() -> CliResult<()> {
    let report = demo_service()?.run_tree()?;
    print_report("Tree visitors", &report);
    report.into_result()?;
    Ok(())
}

fn print_report(title: &str, report: &DemoReport) {
    output::header(title);
    if let Some(picture) = &report.picture {
        output::info(picture.trim_end());
    }
    for check in &report.checks {
        if check.passed() {
            output::success_detail(&format!("{}: {}", check.name, check.actual));
        } else {
            output::failure(&format!(
                "{}: expected {}, got {}",
                check.name, check.expected, check.actual
            ));
        }
    }
}
