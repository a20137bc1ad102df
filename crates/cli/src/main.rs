//! # salescast
//!
//! Command-line interface for scoring store rows, forecasting total sales
//! and running the web front-end.

use clap::{Parser, Subcommand};
use forecast_facade::{ForecastConfigBuilder, ForecastRecord, Frequency, SalesForecaster};
use predictor_facade::{PredictionRecord, RegressorConfig, SalesPredictor};
use server::{tabular, telemetry, ServerConfig};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "salescast")]
#[command(about = "Store sales prediction and forecasting CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict sales for every row of a CSV file
    Predict {
        /// Input CSV with raw store columns
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Regressor artifact
        #[arg(short, long, default_value = predictor_facade::DEFAULT_REGRESSOR_PATH)]
        model: PathBuf,
    },

    /// Forecast total sales over future periods
    Forecast {
        /// Number of future periods
        #[arg(short, long, default_value_t = forecast_facade::DEFAULT_PERIODS)]
        periods: usize,

        /// Period length (daily, weekly, monthly)
        #[arg(short, long, default_value = "weekly")]
        frequency: Frequency,

        /// Output JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Forecaster artifact
        #[arg(short, long, default_value = forecast_facade::DEFAULT_FORECASTER_PATH)]
        model: PathBuf,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides HOST)
        #[arg(long)]
        host: Option<String>,
    },
}

/// Open `output` or fall back to stdout
fn sink(output: Option<&PathBuf>) -> CliResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file =
                File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Write records as CSV: input columns followed by `Predicted_Sales`
fn write_predictions<W: Write>(records: &[PredictionRecord], out: W) -> CliResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    if let Some(first) = records.first() {
        writer
            .write_record(first.columns())
            .map_err(|e| format!("Failed to write CSV: {}", e))?;
    }
    for record in records {
        writer
            .write_record(record.values())
            .map_err(|e| format!("Failed to write CSV: {}", e))?;
    }
    writer.flush().map_err(|e| format!("Failed to write CSV: {}", e))
}

fn write_forecast<W: Write>(records: &[ForecastRecord], mut out: W) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut out, records)
        .map_err(|e| format!("Failed to write JSON: {}", e))?;
    writeln!(out).map_err(|e| format!("Failed to write JSON: {}", e))
}

/// Run predict command
fn run_predict(input: PathBuf, output: Option<PathBuf>, model: PathBuf) -> CliResult<()> {
    let file = File::open(&input).map_err(|e| format!("Failed to open file: {}", e))?;
    let rows = tabular::read_rows(BufReader::new(file))
        .map_err(|e| format!("Failed to read CSV: {}", e))?;
    eprintln!(
        "Loaded {} rows from {:?}",
        rows.len(),
        input.file_name().unwrap_or_default()
    );

    let predictor =
        SalesPredictor::from_config(&RegressorConfig::new(model)).map_err(|e| e.to_string())?;
    let records = predictor.predict(rows).map_err(|e| e.to_string())?;

    write_predictions(&records, sink(output.as_ref())?)?;
    if let Some(path) = output {
        eprintln!("Predictions written to {:?}", path);
    }
    Ok(())
}

/// Run forecast command
fn run_forecast(
    periods: usize,
    frequency: Frequency,
    output: Option<PathBuf>,
    model: PathBuf,
) -> CliResult<()> {
    let config = ForecastConfigBuilder::new()
        .model_path(model)
        .periods(periods)
        .frequency(frequency)
        .build()?;
    let forecaster = SalesForecaster::from_config(&config).map_err(|e| e.to_string())?;
    let records = forecaster.forecast().map_err(|e| e.to_string())?;

    eprintln!(
        "Forecast {} {} periods after {}",
        records.len(),
        frequency,
        forecaster.last_observed()
    );

    write_forecast(&records, sink(output.as_ref())?)?;
    if let Some(path) = output {
        eprintln!("Forecast written to {:?}", path);
    }
    Ok(())
}

/// Run serve command
fn run_serve(host: Option<String>, port: Option<u16>) -> CliResult<()> {
    dotenvy::dotenv().ok();
    telemetry::init(telemetry::DEFAULT_FILTER);

    let mut config = ServerConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;
    runtime.block_on(server::serve(config)).map_err(|e| {
        tracing::error!("{e}");
        e.to_string()
    })
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Predict {
            input,
            output,
            model,
        } => run_predict(input, output, model),

        Commands::Forecast {
            periods,
            frequency,
            output,
            model,
        } => run_forecast(periods, frequency, output, model),

        Commands::Serve { port, host } => run_serve(host, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
