use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use buyplan_cli::config::{load_config, BuyPlanConfig};
use buyplan_cli::{Cli, Commands, ConfigCommands};

mod commands;

fn run(cli: &Cli, config: anyhow::Result<BuyPlanConfig>) -> anyhow::Result<()> {
    match &cli.command {
        // init must work even when the existing file does not parse
        Commands::Config {
            command: ConfigCommands::Init { force },
        } => commands::config::init(cli.config.as_deref(), *force),
        Commands::Config {
            command: ConfigCommands::Show,
        } => commands::config::show(&config?),
        Commands::Estimate { plan, format } => commands::estimate::handle(&config?, plan, *format),
        Commands::Profile { lifespan, format } => {
            commands::profile::handle(&config?, *lifespan, *format)
        }
        Commands::Chart {
            kind,
            plan,
            format,
            output,
            samples,
        } => commands::chart::handle(
            &config?,
            *kind,
            plan,
            *format,
            output.as_deref(),
            *samples,
        ),
        Commands::Sweep {
            from,
            to,
            stores,
            format,
        } => commands::sweep::handle(&config?, *from, *to, *stores, *format),
        Commands::Completions { shell, out } => {
            commands::completions::handle(*shell, out.as_deref())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let level = cli
        .log_level
        .or_else(|| config.as_ref().ok().and_then(|c| c.log_level().ok()))
        .unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("buyplan-cli {} starting", env!("CARGO_PKG_VERSION"));

    match run(&cli, config) {
        Ok(()) => info!("Done."),
        Err(e) => {
            error!("Command failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
