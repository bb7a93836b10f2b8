use std::io::{self, Write};

use anyhow::Result;
use buyplan_cli::common::{fmt_rate, print_json};
use buyplan_cli::config::BuyPlanConfig;
use buyplan_cli::OutputFormat;
use buyplan_core::{
    compute_adjusted_profile, compute_overall_average, compute_phase_average, LifecyclePhase,
    PhaseRow, RateOfSales, ReferenceSet,
};
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::info;

#[derive(Debug, Serialize)]
struct ProductRow {
    product: usize,
    lifespan_weeks: u32,
    rates: PhaseRow,
    adjusted: PhaseRow,
}

#[derive(Debug, Serialize)]
struct ProfileReport {
    lifespan_weeks: u32,
    products: Vec<ProductRow>,
    phase_average: PhaseRow,
    overall_average: RateOfSales,
}

fn build_report(reference: &ReferenceSet, lifespan_weeks: u32) -> ProfileReport {
    let adjusted = compute_adjusted_profile(reference, lifespan_weeks);
    let phase_average = compute_phase_average(&adjusted);
    let products = reference
        .products()
        .zip(adjusted)
        .map(|(product, adjusted)| ProductRow {
            product: product.number,
            lifespan_weeks: product.lifespan_weeks,
            rates: *product.row,
            adjusted,
        })
        .collect();
    ProfileReport {
        lifespan_weeks,
        products,
        phase_average,
        overall_average: compute_overall_average(&phase_average),
    }
}

pub fn handle(config: &BuyPlanConfig, lifespan: Option<u32>, format: OutputFormat) -> Result<()> {
    let inputs = config.plan_inputs(lifespan, None)?;
    let report = build_report(ReferenceSet::builtin(), inputs.lifespan_weeks);
    info!(
        "Adjusted {} reference products to {} weeks",
        report.products.len(),
        report.lifespan_weeks
    );
    match format {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => print_json(&report),
    }
}

fn print_table(report: &ProfileReport) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    write!(writer, "PRODUCT\tLS")?;
    for phase in LifecyclePhase::ALL {
        write!(writer, "\t{}", phase.label().to_uppercase())?;
    }
    writeln!(writer, "\tDECLINE @ {}W", report.lifespan_weeks)?;

    for row in &report.products {
        write!(writer, "{}\t{}", row.product, row.lifespan_weeks)?;
        for value in row.rates.values() {
            write!(writer, "\t{}", fmt_rate(value))?;
        }
        writeln!(
            writer,
            "\t{}",
            fmt_rate(row.adjusted.get(LifecyclePhase::Decline).value())
        )?;
    }

    write!(writer, "PLM\t{}", report.lifespan_weeks)?;
    for value in report.phase_average.values() {
        write!(writer, "\t{}", fmt_rate(value))?;
    }
    writeln!(writer, "\t")?;
    writer.flush()?;
    println!(
        "Average ROS across phases: {}",
        fmt_rate(report.overall_average.value())
    );
    Ok(())
}
