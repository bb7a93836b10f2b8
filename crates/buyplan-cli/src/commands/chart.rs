use std::path::Path;

use anyhow::{Context, Result};
use buyplan_cli::common::emit;
use buyplan_cli::config::BuyPlanConfig;
use buyplan_cli::{ChartArg, ChartFormat, PlanArgs};
use buyplan_core::BuyEstimator;
use buyplan_viz::{build_chart, render_ascii, render_json, render_svg, ChartKind};
use tracing::info;

pub fn handle(
    config: &BuyPlanConfig,
    kind: ChartArg,
    plan: &PlanArgs,
    format: ChartFormat,
    output: Option<&Path>,
    samples: Option<u64>,
) -> Result<()> {
    let inputs = config.plan_inputs(plan.lifespan, plan.stores)?;
    let samples = match samples {
        Some(n) => usize::try_from(n).context("sample count does not fit in memory")?,
        None => config.chart.samples,
    };

    let estimator = BuyEstimator::builtin().with_curve_samples(samples)?;
    let buy_plan = estimator.evaluate(inputs)?;
    let kind = ChartKind::from(kind);
    let chart = build_chart(kind, &buy_plan);

    let rendered = match format {
        ChartFormat::Ascii => {
            render_ascii(&chart, config.chart.ascii_width, config.chart.ascii_height)?
        }
        ChartFormat::Svg => render_svg(&chart, config.chart.svg_width, config.chart.svg_height)?,
        ChartFormat::Json => render_json(&chart)?,
    };
    emit(&rendered, output)?;

    if let Some(path) = output {
        println!("Chart written to {}", path.display());
    }
    info!(
        "Rendered {:?} chart as {:?} (total buy {} units)",
        kind, format, buy_plan.total_buy
    );
    Ok(())
}
