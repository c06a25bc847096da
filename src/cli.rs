//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_result_writer::CsvResultWriter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::ini_strategy_loader::{IniStrategyLoader, load_strategy_file};
use crate::domain::config_validation::validate_screener_config;
use crate::domain::error::ScreenerError;
use crate::domain::financial_data::Metric;
use crate::domain::result::ResultRowSet;
use crate::domain::screening::ScreeningService;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::FinancialDataPort;
use crate::ports::result_port::ResultSinkPort;
use crate::ports::screening_port::ScreeningUseCase;
use crate::ports::strategy_port::StrategyLoaderPort;

#[derive(Parser, Debug)]
#[command(name = "quantscreen", about = "Quarterly fundamentals stock screener")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every active strategy and print/save the results
    Screen {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        strategies: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print results without writing CSV files
        #[arg(long)]
        no_save: bool,
        /// Print only the passing stock names
        #[arg(long)]
        names_only: bool,
    },
    /// Parse a single strategy file
    Validate {
        #[arg(short, long)]
        strategy: PathBuf,
    },
    /// List the active strategies
    ListStrategies {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        strategies: Option<PathBuf>,
    },
    /// Show the stocks and periods available per metric
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Screen {
            config,
            data,
            strategies,
            output,
            no_save,
            names_only,
        } => run_screen(
            &config,
            data.as_ref(),
            strategies.as_ref(),
            output.as_ref(),
            no_save,
            names_only,
        ),
        Command::Validate { strategy } => run_validate(&strategy),
        Command::ListStrategies { config, strategies } => {
            run_list_strategies(&config, strategies.as_ref())
        }
        Command::Info { config, data } => run_info(&config, data.as_ref()),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ScreenerError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Data source from `--data` or the `[data]` section.
pub fn build_data_port(
    config: &dyn ConfigPort,
    data_override: Option<&PathBuf>,
) -> Result<CsvAdapter, ScreenerError> {
    match data_override {
        Some(dir) => Ok(CsvAdapter::new(dir)),
        None => CsvAdapter::from_config(config),
    }
}

/// Strategy loader from `--strategies` or `[strategies] active_dir`.
pub fn build_strategy_port(
    config: &dyn ConfigPort,
    strategies_override: Option<&PathBuf>,
) -> Result<IniStrategyLoader, ScreenerError> {
    let dir = match strategies_override {
        Some(dir) => dir.clone(),
        None => config.get_path("strategies", "active_dir").ok_or_else(|| {
            ScreenerError::ConfigMissing {
                section: "strategies".into(),
                key: "active_dir".into(),
            }
        })?,
    };
    Ok(IniStrategyLoader::new(dir))
}

/// Result writer unless saving is disabled by flag or `[output] write_csv`.
pub fn build_result_sink(
    config: &dyn ConfigPort,
    output_override: Option<&PathBuf>,
    no_save: bool,
) -> Option<CsvResultWriter> {
    if no_save || !config.get_bool("output", "write_csv", true) {
        return None;
    }
    let dir = output_override
        .cloned()
        .or_else(|| config.get_path("output", "dir"))
        .unwrap_or_else(|| PathBuf::from("output"));
    Some(CsvResultWriter::new(dir))
}

fn run_screen(
    config_path: &Path,
    data_override: Option<&PathBuf>,
    strategies_override: Option<&PathBuf>,
    output_override: Option<&PathBuf>,
    no_save: bool,
    names_only: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if data_override.is_none() && strategies_override.is_none() {
        if let Err(e) = validate_screener_config(&config) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let ports = build_data_port(&config, data_override).and_then(|data| {
        build_strategy_port(&config, strategies_override).map(|strategies| (data, strategies))
    });
    let (data_port, strategy_port) = match ports {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let sink = build_result_sink(&config, output_override, no_save);

    match run_screen_pipeline(
        &data_port,
        &strategy_port,
        sink.as_ref().map(|s| s as &dyn ResultSinkPort),
    ) {
        Ok(results) => {
            print!("{}", format_results(&results, names_only));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load, evaluate every active strategy, then persist when a sink is given.
///
/// Only startup failures are returned; per-strategy failures are carried
/// inside the returned result sets.
pub fn run_screen_pipeline(
    data_port: &dyn FinancialDataPort,
    strategy_port: &dyn StrategyLoaderPort,
    sink: Option<&dyn ResultSinkPort>,
) -> Result<BTreeMap<String, ResultRowSet>, ScreenerError> {
    let service = ScreeningService::new(data_port, strategy_port)?;

    eprintln!(
        "Running {} strategies over {} stocks",
        service.criteria().len(),
        service.financial_data().sales.len()
    );
    let results = service.run_all_active_strategies();

    if let Some(sink) = sink {
        let written = sink.save_results(&results)?;
        eprintln!("Saved {} result files", written.len());
    }
    Ok(results)
}

/// Console rendering of a screening run.
pub fn format_results(results: &BTreeMap<String, ResultRowSet>, names_only: bool) -> String {
    let mut out = String::new();
    if results.is_empty() {
        out.push_str("No active strategies.\n");
        return out;
    }

    for (name, set) in results {
        let _ = writeln!(out, "\n--- [{name}] ---");
        if let Some(reason) = &set.failure {
            let _ = writeln!(out, "  -> failed: {reason}");
            continue;
        }
        if set.is_empty() {
            out.push_str("  -> no passing stocks\n");
            continue;
        }
        let _ = writeln!(out, "  -> {} stocks passed:", set.len());
        for (i, row) in set.rows.iter().enumerate() {
            if names_only {
                let _ = writeln!(out, "    {}. {}", i + 1, row.stock);
            } else {
                let _ = writeln!(
                    out,
                    "    {:>3}. {:<12} {:>16.2} {:>16.2} {:>10}%",
                    i + 1,
                    row.stock,
                    row.base,
                    row.target,
                    row.growth_pct.to_string()
                );
            }
        }
    }
    out
}

fn run_validate(strategy_path: &Path) -> ExitCode {
    eprintln!("Validating strategy: {}", strategy_path.display());
    match load_strategy_file(strategy_path) {
        Ok(criterion) => {
            eprintln!("  Parsed: {}", criterion);
            eprintln!("\nStrategy configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_strategies(config_path: &Path, strategies_override: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let loader = match build_strategy_port(&config, strategies_override) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    match loader.load_active_criteria() {
        Ok(criteria) => {
            if criteria.is_empty() {
                eprintln!("No active strategies in {}", loader.active_dir().display());
            }
            for (name, criterion) in &criteria {
                println!("{name}: {criterion}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &Path, data_override: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let data = match build_data_port(&config, data_override).and_then(|p| p.load_financial_data())
    {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    for metric in Metric::ALL {
        let table = data.table(metric);
        println!(
            "{}: {} stocks, periods [{}]",
            metric,
            table.len(),
            table.periods().join(", ")
        );
    }
    ExitCode::SUCCESS
}
