use std::io::{self, Write};

use anyhow::Result;
use buyplan_cli::common::print_json;
use buyplan_cli::config::BuyPlanConfig;
use buyplan_cli::{OutputFormat, PlanArgs};
use buyplan_core::{BuyEstimator, PlanSummary};
use tabwriter::TabWriter;
use tracing::info;

pub fn handle(config: &BuyPlanConfig, plan: &PlanArgs, format: OutputFormat) -> Result<()> {
    let inputs = config.plan_inputs(plan.lifespan, plan.stores)?;
    let summary = BuyEstimator::builtin().summarize(inputs);
    info!(
        "Estimated total buy for {} weeks across {} stores",
        summary.lifespan_weeks, summary.store_count
    );
    match format {
        OutputFormat::Table => write_summary(io::stdout(), &summary),
        OutputFormat::Json => print_json(&summary),
    }
}

fn write_summary<W: Write>(out: W, summary: &PlanSummary) -> Result<()> {
    let mut writer = TabWriter::new(out);
    writeln!(writer, "Model Summary")?;
    writeln!(writer, "Lifespan:\t{} weeks", summary.lifespan_weeks)?;
    writeln!(writer, "Stores:\t{}", summary.store_count)?;
    writeln!(writer, "PLM ROS:\t{}", summary.overall_average.value())?;
    writeln!(writer, "Total Buy:\t{} units", summary.total_buy)?;
    writer.flush()?;
    Ok(())
}
