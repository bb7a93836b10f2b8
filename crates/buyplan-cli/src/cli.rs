use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

use buyplan_viz::ChartKind;

#[derive(Parser, Debug)]
#[command(author, version, about = "Total buy with lifespan adjustment", long_about = None)]
pub struct Cli {
    /// Set the logging level (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Config file (defaults to ~/.buyplan/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Lifespan and store count, as set by the two dashboard sliders.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PlanArgs {
    /// Product lifespan in weeks (4-16)
    #[arg(long, value_parser = clap::value_parser!(u32).range(4..=16))]
    pub lifespan: Option<u32>,

    /// Number of stores (1-50)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub stores: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the model summary: lifespan, stores, PLM ROS and total buy
    Estimate {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show the reference table next to its lifespan-adjusted version
    Profile {
        /// Product lifespan in weeks (4-16)
        #[arg(long, value_parser = clap::value_parser!(u32).range(4..=16))]
        lifespan: Option<u32>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Render one of the two lifecycle charts
    Chart {
        /// Which chart to render
        #[arg(value_enum)]
        kind: ChartArg,
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long, value_enum, default_value_t = ChartFormat::Ascii)]
        format: ChartFormat,
        /// Write the chart to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Samples per reference curve (overrides the config file)
        #[arg(long, value_parser = clap::value_parser!(u64).range(2..))]
        samples: Option<u64>,
    },
    /// Tabulate total buy across a range of lifespans
    Sweep {
        /// First lifespan in weeks
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(4..=16))]
        from: u32,
        /// Last lifespan in weeks (inclusive)
        #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(4..=16))]
        to: u32,
        /// Number of stores (1-50)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
        stores: Option<u32>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Output format for summaries and tables.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartFormat {
    /// Character-grid plot for the terminal
    #[default]
    Ascii,
    /// Standalone SVG document
    Svg,
    /// Chart description as JSON
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartArg {
    /// Phase-average ROS with the overall average line
    Ros,
    /// Reference products against the PLM curve
    Comparison,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Ros => ChartKind::Ros,
            ChartArg::Comparison => ChartKind::Comparison,
        }
    }
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
