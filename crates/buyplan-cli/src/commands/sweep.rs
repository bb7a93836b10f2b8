use std::io::{self, Write};

use anyhow::{Context, Result};
use buyplan_cli::common::{fmt_rate, print_json};
use buyplan_cli::config::BuyPlanConfig;
use buyplan_cli::OutputFormat;
use buyplan_core::{BuyEstimator, PlanSummary};
use tabwriter::TabWriter;
use tracing::info;

pub fn handle(
    config: &BuyPlanConfig,
    from: u32,
    to: u32,
    stores: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let stores = stores.unwrap_or(config.defaults.stores);
    let rows = BuyEstimator::builtin()
        .sweep(from..=to, stores)
        .with_context(|| format!("sweeping lifespans {from}..={to}"))?;
    info!("Swept {} lifespans at {} stores", rows.len(), stores);
    match format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => print_json(&rows),
    }
}

fn print_table(rows: &[PlanSummary]) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "LIFESPAN\tSTORES\tPLM ROS\tTOTAL BUY")?;
    for row in rows {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            row.lifespan_weeks,
            row.store_count,
            fmt_rate(row.overall_average.value()),
            row.total_buy
        )?;
    }
    writer.flush()?;
    Ok(())
}
