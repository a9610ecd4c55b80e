//! Cellsheet - a small spreadsheet with a terminal UI

mod config;
mod logging;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Context;
use cellsheet_core::Workbook;
use cellsheet_engine::engine::evaluate_formula;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "cellsheet", version, about = "Terminal spreadsheet with sheets, styles and SUM formulas")]
struct Cli {
    /// CSV file to import into the first sheet
    file: Option<PathBuf>,

    /// Evaluate a formula against the loaded sheet, print the result and exit
    #[arg(short = 'c', long = "command", value_name = "FORMULA", allow_hyphen_values = true)]
    command: Option<String>,

    /// Export the first sheet to CSV (non-interactive)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Select keybindings (vim or emacs)
    #[arg(long, value_name = "NAME")]
    keymap: Option<String>,

    /// Read configuration from this file instead of the user config dir
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Append tracing output to this file
    #[arg(long, value_name = "PATH", env = "CELLSHEET_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (config, warnings) = config::load_config(cli.config.as_deref());
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
    logging::init(log_file.as_deref())?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting cellsheet");

    let mut workbook = Workbook::new();
    if let Some(path) = &cli.file {
        workbook
            .import_csv_file(path)
            .with_context(|| format!("failed to import {}", path.display()))?;
    }

    if let Some(formula) = &cli.command {
        let formula = formula.trim();
        let source = formula.strip_prefix('=').unwrap_or(formula);
        let result = evaluate_formula(source, workbook.current_sheet());
        println!("{}", result.display());
        return Ok(if result.is_error() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    if let Some(output) = &cli.output {
        let written = workbook
            .export_csv_file(Some(output))
            .with_context(|| format!("failed to export {}", output.display()))?;
        println!("Exported to {}", written.display());
        return Ok(ExitCode::SUCCESS);
    }

    run_interactive(workbook, &cli, &config)
}

#[cfg(feature = "tui")]
fn run_interactive(workbook: Workbook, cli: &Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let requested = cli.keymap.as_deref().or(config.keymap.as_deref());
    let (keymap, warnings) = tui::load_keymap(requested);
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut app = tui::App::with_workbook(workbook, keymap, config.col_width());
    if let Some(path) = &cli.file {
        app.status_message = format!("Imported {}", path.display());
    } else if let Some(warning) = warnings.first() {
        app.status_message = warning.clone();
    }
    tui::run(&mut app).context("terminal UI failed")?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_workbook: Workbook, _cli: &Cli, _config: &Config) -> anyhow::Result<ExitCode> {
    anyhow::bail!("built without the `tui` feature; use --command or --output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_options() {
        let cli = Cli::try_parse_from([
            "cellsheet",
            "data.csv",
            "-c",
            "=SUM(A1:B2)",
            "--keymap",
            "emacs",
            "--log-file",
            "/tmp/cellsheet.log",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("data.csv")));
        assert_eq!(cli.command.as_deref(), Some("=SUM(A1:B2)"));
        assert_eq!(cli.keymap.as_deref(), Some("emacs"));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/cellsheet.log")));
    }

    #[test]
    fn cli_accepts_leading_minus_formula() {
        let cli = Cli::try_parse_from(["cellsheet", "-c", "-5+3"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("-5+3"));
    }

    #[test]
    fn cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
