//! CLI definition and dispatch.
//!
//! The command line is a bootstrap collaborator, not part of the signal
//! core: it loads bars, builds the registry, runs the strategy, and hands
//! the annotated series to the report adapter.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::BandsqueezeError;
use crate::domain::params::StrategyParams;
use crate::domain::portfolio::Portfolio;
use crate::domain::runner::StrategyRunner;
use crate::domain::ticker_data::TickerData;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "bandsqueeze", about = "Bollinger-squeeze signal generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate signals for a directory of per-ticker CSV bar files
    Run {
        /// Directory containing {TICKER}.csv files
        #[arg(short, long)]
        data: PathBuf,
        /// INI file with a [strategy] section; defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory for annotated {TICKER}_signals.csv output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Comma-separated ticker subset; all files when omitted
        #[arg(long)]
        tickers: Option<String>,
    },
    /// Validate a strategy configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            data,
            config,
            output,
            tickers,
        } => run_strategy(&data, config.as_ref(), output.as_ref(), tickers.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

fn load_params(config: Option<&PathBuf>) -> Result<StrategyParams, ExitCode> {
    let Some(path) = config else {
        return Ok(StrategyParams::default());
    };
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| {
        report(&BandsqueezeError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
    })?;
    StrategyParams::from_config(&adapter).map_err(|e| report(&e))
}

fn report(err: &BandsqueezeError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

fn run_strategy(
    data_dir: &PathBuf,
    config: Option<&PathBuf>,
    output: Option<&PathBuf>,
    tickers: Option<&str>,
) -> ExitCode {
    let params = match load_params(config) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let adapter = CsvAdapter::new(data_dir.clone());
    let tickers: Vec<String> = match tickers {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => match adapter.list_tickers() {
            Ok(t) => t,
            Err(e) => return report(&e),
        },
    };
    if tickers.is_empty() {
        eprintln!("error: no tickers to process in {}", data_dir.display());
        return ExitCode::FAILURE;
    }

    let mut portfolio = Portfolio::new();
    for ticker in &tickers {
        match adapter.fetch_ohlcv(ticker) {
            Ok(bars) => portfolio.insert(TickerData::new(ticker.clone(), bars)),
            Err(e) => return report(&e),
        }
    }

    let summary = StrategyRunner::new(params).run(&mut portfolio);

    for data in portfolio.iter() {
        let signals = data.signals.as_ref().expect("runner annotates every instrument");
        let opens = signals.open_signal.iter().filter(|v| **v != 0.0).count();
        let closes = signals.close_signal.iter().filter(|v| **v != 0.0).count();
        println!(
            "{}: {} bars, {} opens, {} closes",
            data.ticker,
            data.bar_count(),
            opens,
            closes
        );
    }
    for ticker in &summary.open_at_end {
        println!("{}: ended with open position", ticker);
    }

    if let Some(output_dir) = output {
        if let Err(e) = fs::create_dir_all(output_dir) {
            return report(&BandsqueezeError::Io(e));
        }
        let writer = CsvReportAdapter;
        for data in portfolio.iter() {
            if let Err(e) = writer.write(data, output_dir) {
                return report(&e);
            }
        }
        println!(
            "wrote {} annotated series to {}",
            portfolio.len(),
            output_dir.display()
        );
    }

    ExitCode::SUCCESS
}

fn run_validate(config: &PathBuf) -> ExitCode {
    match load_params(Some(config)) {
        Ok(params) => {
            println!(
                "ok: window={} width={} bandwidth_window={} prep_buy_window={}",
                params.window, params.width, params.bandwidth_window, params.prep_buy_window
            );
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
