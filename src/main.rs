use anyhow::Context;
use clap::Parser;
use station_aging_index::config::{Command, ReportFormat};
use station_aging_index::utils::{logger, validation::Validate};
use station_aging_index::{
    CliConfig, IndexOutcome, IndexReport, IndicatorCalculator, IndicatorError, StationLookup,
    TomlConfig,
};

fn main() {
    let args = CliConfig::parse();

    // Config first: the log level may come from it.
    let loaded = TomlConfig::from_file(&args.config);
    let (level, json) = match &loaded {
        Ok(config) => (config.log_level().map(str::to_string), config.json_logs()),
        Err(_) => (None, false),
    };
    if args.json_logs || json {
        logger::init_json_logger(level.as_deref());
    } else {
        logger::init_cli_logger(args.verbose, level.as_deref());
    }

    tracing::info!("Starting aging-index CLI");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if let Err(e) = run(&args, loaded) {
        let suggestion = e
            .downcast_ref::<IndicatorError>()
            .map(IndicatorError::recovery_suggestion);
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        if let Some(suggestion) = suggestion {
            eprintln!("💡 Suggestion: {}", suggestion);
        }

        // Corrupt data exits 2, every other failure 1.
        let data_error = e
            .downcast_ref::<IndicatorError>()
            .map(IndicatorError::is_data_error)
            .unwrap_or(false);
        std::process::exit(if data_error { 2 } else { 1 });
    }
}

fn run(args: &CliConfig, loaded: station_aging_index::Result<TomlConfig>) -> anyhow::Result<()> {
    let config = loaded.with_context(|| format!("failed to load config file '{}'", args.config))?;
    config.validate()?;
    tracing::info!("📁 Loaded {} stations from {}", config.dataset().len(), args.config);

    let dataset = config.dataset();

    match &args.command {
        Command::Compute { station, mode } => {
            let mode = mode.unwrap_or_else(|| config.default_mode());
            let calc = IndicatorCalculator::new(dataset);
            let outcome = calc.compute_index(station, mode)?;

            match outcome {
                IndexOutcome::Value(value) => println!("{:.2}", value),
                other => {
                    tracing::warn!("Station {} mode {}: {}", station, mode, other.describe());
                    eprintln!("{}: {}", station, other.describe());
                    println!("NaN");
                }
            }
        }

        Command::Report { format } => {
            let report = IndexReport::build(dataset)?;
            let output = match format {
                ReportFormat::Csv => report.to_csv()?,
                ReportFormat::Json => report.to_json()?,
            };
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }

        Command::Stations => {
            for station in dataset.station_ids() {
                println!("{}", station);
            }
        }
    }

    Ok(())
}
