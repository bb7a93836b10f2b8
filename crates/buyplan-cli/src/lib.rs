pub mod cli;
pub mod common;
pub mod config;

pub use cli::{
    build_cli_command, ChartArg, ChartFormat, Cli, Commands, ConfigCommands, OutputFormat,
    PlanArgs,
};
