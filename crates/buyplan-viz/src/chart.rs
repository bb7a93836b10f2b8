//! Renderer-independent chart descriptions.
//!
//! A [`ChartSpec`] carries everything needed to draw one figure: axes,
//! line series, reference lines and phase labels. The builders in this
//! module turn a [`BuyPlan`] into the two standard figures; the `ascii`
//! and `svg` modules draw them.

use buyplan_core::{BuyPlan, CurvePoint, LifecyclePhase, QUARTER_MARKS};
use serde::{Deserialize, Serialize};

/// Line colors for the reference products, in product order.
pub const REFERENCE_COLORS: [&str; 5] = ["#1f77b4", "#2ca02c", "#ff7f0e", "#d62728", "#9467bd"];
pub const PLM_COLOR: &str = "black";
pub const AVERAGE_COLOR: &str = "red";
pub const SEPARATOR_COLOR: &str = "gray";

const PLM_WIDTH: f64 = 2.5;
const REFERENCE_WIDTH: f64 = 1.8;
const AVERAGE_WIDTH: f64 = 2.0;
const SEPARATOR_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const UNIT: AxisRange = AxisRange { min: 0.0, max: 1.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` within the range, 0.0 at `min` and 1.0 at `max`.
    pub fn fraction(&self, value: f64) -> f64 {
        if self.span() == 0.0 {
            0.0
        } else {
            (value - self.min) / self.span()
        }
    }
}

/// Right-hand axis declared alongside the primary one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryAxis {
    pub label: String,
    pub range: AxisRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub width: f64,
    pub markers: bool,
    pub points: Vec<CurvePoint>,
}

/// Horizontal reference line spanning `[x_min, x_max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HLine {
    pub y: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub color: String,
    pub width: f64,
    pub style: LineStyle,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VLine {
    pub x: f64,
    pub color: String,
    pub width: f64,
    pub style: LineStyle,
}

/// Text placed under the x axis at a phase midpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseLabel {
    pub x: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub secondary_axis: Option<SecondaryAxis>,
    pub series: Vec<Series>,
    pub hlines: Vec<HLine>,
    pub vlines: Vec<VLine>,
    pub phase_labels: Vec<PhaseLabel>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            x_range: AxisRange::UNIT,
            y_range: AxisRange::UNIT,
            secondary_axis: None,
            series: Vec::new(),
            hlines: Vec::new(),
            vlines: Vec::new(),
            phase_labels: Vec::new(),
        }
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = AxisRange::new(min, max);
        self
    }

    pub fn with_secondary_axis(mut self, label: impl Into<String>, min: f64, max: f64) -> Self {
        self.secondary_axis = Some(SecondaryAxis {
            label: label.into(),
            range: AxisRange::new(min, max),
        });
        self
    }

    pub fn add_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn add_hline(mut self, line: HLine) -> Self {
        self.hlines.push(line);
        self
    }

    /// Dashed gray separators at the phase boundaries plus phase names.
    pub fn with_phase_guides(mut self) -> Self {
        self.vlines.extend(QUARTER_MARKS.iter().map(|&x| VLine {
            x,
            color: SEPARATOR_COLOR.to_string(),
            width: SEPARATOR_WIDTH,
            style: LineStyle::Dashed,
        }));
        self.phase_labels
            .extend(LifecyclePhase::ALL.iter().map(|phase| PhaseLabel {
                x: phase.midpoint(),
                text: phase.label().to_string(),
            }));
        self
    }

    /// Entries shown in the legend: series first, then labelled lines.
    pub fn legend(&self) -> Vec<(&str, &str)> {
        self.series
            .iter()
            .map(|s| (s.label.as_str(), s.color.as_str()))
            .chain(
                self.hlines
                    .iter()
                    .filter_map(|h| h.label.as_deref().map(|l| (l, h.color.as_str()))),
            )
            .collect()
    }
}

fn plm_series(label: String, plan: &BuyPlan) -> Series {
    Series {
        label,
        color: PLM_COLOR.to_string(),
        width: PLM_WIDTH,
        markers: true,
        points: plan.aggregated_curve.clone(),
    }
}

/// Phase-average curve with the overall average line and the store axis.
pub fn ros_chart(plan: &BuyPlan) -> ChartSpec {
    let average = plan.overall_average.value();
    let y_max = (plan.phase_average.peak().value() * 0.5).max(1.0);
    let store_max = f64::from(plan.inputs.store_count) * 1.1;

    ChartSpec::new("ROS for Total Buy ")
        .with_axes("Lifecycle (Normalized)", "ROS (per week)")
        .with_y_range(0.0, y_max)
        .with_secondary_axis(" Store count", 0.0, store_max)
        .add_series(plm_series("PLM".to_string(), plan))
        .add_hline(HLine {
            y: average,
            x_min: 0.0,
            x_max: 1.0,
            color: AVERAGE_COLOR.to_string(),
            width: AVERAGE_WIDTH,
            style: LineStyle::Dashed,
            label: Some(format!("Avg.ROS = {average}")),
        })
        .with_phase_guides()
}

/// Reference product curves overlaid with the PLM phase averages.
///
/// The y axis tops out half a unit above the larger of the PLM peak and the
/// plan's own reference peak, so every drawn curve stays inside the frame.
pub fn comparison_chart(plan: &BuyPlan) -> ChartSpec {
    let peak = plan.phase_average.peak().max(plan.reference_peak).value();

    let mut chart = ChartSpec::new("Lifecycle ROS Comparison: Similar vs PLM")
        .with_axes("Lifecycle Stages", "Rate of Sales (ROS)")
        .with_y_range(0.0, peak + 0.5);

    for (i, curve) in plan.reference_curves.iter().enumerate() {
        chart = chart.add_series(Series {
            label: curve.label.clone(),
            color: REFERENCE_COLORS[i % REFERENCE_COLORS.len()].to_string(),
            width: REFERENCE_WIDTH,
            markers: false,
            points: curve.points.clone(),
        });
    }

    chart
        .add_series(plm_series(
            format!("PLM, LS {}", plan.inputs.lifespan_weeks),
            plan,
        ))
        .with_phase_guides()
}

#[cfg(test)]
mod tests {
    use super::*;
    use buyplan_core::{BuyEstimator, PhaseRow, PlanInputs, ReferenceSet};

    fn default_plan() -> BuyPlan {
        BuyEstimator::builtin()
            .with_curve_samples(50)
            .unwrap()
            .evaluate(PlanInputs::default())
            .unwrap()
    }

    #[test]
    fn ros_chart_layout() {
        let plan = default_plan();
        let chart = ros_chart(&plan);
        assert_eq!(chart.y_range, AxisRange::new(0.0, 1.0));
        let store_axis = chart.secondary_axis.as_ref().unwrap();
        assert!((store_axis.range.max - 11.0).abs() < 1e-9);
        assert_eq!(chart.series.len(), 1);
        assert!(chart.series[0].markers);
        assert_eq!(chart.hlines.len(), 1);
        assert!((chart.hlines[0].y - 0.369).abs() < 1e-9);
        assert!(chart.hlines[0].label.as_ref().unwrap().starts_with("Avg.ROS = 0.36"));
        let marks: Vec<f64> = chart.vlines.iter().map(|v| v.x).collect();
        assert_eq!(marks, vec![0.25, 0.5, 0.75]);
        assert_eq!(chart.phase_labels.len(), 4);
    }

    #[test]
    fn comparison_chart_layout() {
        let plan = default_plan();
        let chart = comparison_chart(&plan);
        assert!((chart.y_range.max - 1.1).abs() < 1e-9);
        assert_eq!(chart.series.len(), 6);
        assert_eq!(chart.series[0].label, "Product 1, LS 10");
        assert_eq!(chart.series[0].color, "#1f77b4");
        assert_eq!(chart.series[5].label, "PLM, LS 12");
        assert!(chart.secondary_axis.is_none());
        assert!(chart.hlines.is_empty());
    }

    #[test]
    fn comparison_axis_covers_custom_reference_curves() {
        let custom = ReferenceSet::new(
            vec![
                PhaseRow::new(0.1, 3.0, 0.2, 0.1),
                PhaseRow::new(0.1, 0.1, 0.1, 0.1),
            ],
            vec![12, 12],
        )
        .unwrap();
        let plan = BuyEstimator::new(&custom)
            .with_curve_samples(200)
            .unwrap()
            .evaluate(PlanInputs::default())
            .unwrap();
        let chart = comparison_chart(&plan);
        assert!((chart.y_range.max - 3.5).abs() < 1e-9);
        let max_y = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.y))
            .fold(f64::MIN, f64::max);
        assert!(max_y > 2.0);
        assert!(max_y <= chart.y_range.max);
    }

    #[test]
    fn legend_includes_average_line() {
        let chart = ros_chart(&default_plan());
        let legend = chart.legend();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0], ("PLM", PLM_COLOR));
        assert_eq!(legend[1].1, AVERAGE_COLOR);
    }

    #[test]
    fn axis_fraction() {
        let range = AxisRange::new(0.0, 2.0);
        assert_eq!(range.fraction(1.0), 0.5);
        assert_eq!(AxisRange::new(1.0, 1.0).fraction(3.0), 0.0);
    }
}
