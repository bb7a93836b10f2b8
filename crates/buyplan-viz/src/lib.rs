//! Chart building and rendering for buyplan estimates.
//!
//! [`chart`] turns a [`BuyPlan`] into renderer-independent [`ChartSpec`]s;
//! [`ascii`] and [`svg`] draw them, and [`render_json`] serializes them for
//! external plotting tools.

pub mod ascii;
pub mod chart;
pub mod svg;

use buyplan_core::{BuyPlan, BuyPlanResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use ascii::render_ascii;
pub use chart::{comparison_chart, ros_chart, ChartSpec};
pub use svg::render_svg;

/// The two standard figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Phase averages with the overall average line
    Ros,
    /// Reference products against the PLM curve
    Comparison,
}

pub fn build_chart(kind: ChartKind, plan: &BuyPlan) -> ChartSpec {
    let chart = match kind {
        ChartKind::Ros => ros_chart(plan),
        ChartKind::Comparison => comparison_chart(plan),
    };
    debug!(
        ?kind,
        series = chart.series.len(),
        title = chart.title.as_str(),
        "built chart"
    );
    chart
}

pub fn render_json(chart: &ChartSpec) -> BuyPlanResult<String> {
    Ok(serde_json::to_string_pretty(chart)?)
}
