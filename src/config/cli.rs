use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "aging-index")]
#[command(about = "Age-structure indicators for the population around monitoring stations")]
pub struct CliConfig {
    /// Path to the TOML file holding the station population table
    #[arg(short, long, global = true, default_value = "aging-index.toml")]
    pub config: String,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines instead of the compact format
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute one indicator for a station
    Compute {
        /// Station code (e.g. 08101001)
        station: String,

        /// 0 = share aged 65+, 1 = dependent share, 2 = aging index.
        /// Defaults to `indicator.default_mode` from the config file.
        #[arg(short, long, allow_negative_numbers = true)]
        mode: Option<i64>,
    },

    /// Compute every indicator for every station
    Report {
        #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,
    },

    /// List the stations in the dataset
    Stations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
}
