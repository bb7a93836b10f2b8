//! Total buy estimation.
//!
//! The chain runs in one direction and allocates fresh values at every
//! step, so evaluating the same inputs twice always yields the same plan:
//!
//! 1. [`compute_adjusted_profile`] rescales each reference product's Decline
//!    rate by `lifespan / reference lifespan` and caps it at the product's
//!    Intro rate.
//! 2. [`compute_phase_average`] averages the adjusted rows per phase.
//! 3. [`compute_overall_average`] averages the four phase values.
//! 4. [`compute_total_buy`] scales the overall rate by weeks and stores.
//!
//! [`BuyEstimator::evaluate`] runs the whole chain and also prepares the
//! curve data used by the charts.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{BuyPlanError, BuyPlanResult};
use crate::interp::{interp, linspace};
use crate::phase::{phase_midpoints, LifecyclePhase, PhaseRow, PHASE_COUNT};
use crate::reference::{ReferenceSet, SalesProfile};
use crate::units::RateOfSales;

/// Accepted product lifespans in weeks.
pub const LIFESPAN_RANGE: RangeInclusive<u32> = 4..=16;
/// Accepted store counts.
pub const STORE_RANGE: RangeInclusive<u32> = 1..=50;
pub const DEFAULT_LIFESPAN_WEEKS: u32 = 12;
pub const DEFAULT_STORE_COUNT: u32 = 10;
/// Samples per reference curve.
pub const DEFAULT_CURVE_SAMPLES: usize = 500;

/// Lifespan and store count for the product being planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInputs {
    pub lifespan_weeks: u32,
    pub store_count: u32,
}

impl PlanInputs {
    /// Validated inputs; both values must lie in their accepted ranges.
    pub fn new(lifespan_weeks: u32, store_count: u32) -> BuyPlanResult<Self> {
        if !LIFESPAN_RANGE.contains(&lifespan_weeks) {
            return Err(BuyPlanError::InvalidInput(format!(
                "lifespan {lifespan_weeks} weeks is outside {}..={}",
                LIFESPAN_RANGE.start(),
                LIFESPAN_RANGE.end()
            )));
        }
        if !STORE_RANGE.contains(&store_count) {
            return Err(BuyPlanError::InvalidInput(format!(
                "store count {store_count} is outside {}..={}",
                STORE_RANGE.start(),
                STORE_RANGE.end()
            )));
        }
        Ok(Self {
            lifespan_weeks,
            store_count,
        })
    }
}

impl Default for PlanInputs {
    fn default() -> Self {
        Self {
            lifespan_weeks: DEFAULT_LIFESPAN_WEEKS,
            store_count: DEFAULT_STORE_COUNT,
        }
    }
}

/// A point on the normalized lifecycle axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Densely sampled curve for one reference product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCurve {
    pub number: usize,
    pub label: String,
    pub lifespan_weeks: u32,
    pub points: Vec<CurvePoint>,
}

/// The text summary shown next to the charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub lifespan_weeks: u32,
    pub store_count: u32,
    pub overall_average: RateOfSales,
    pub total_buy: u64,
}

/// Everything derived from one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyPlan {
    pub inputs: PlanInputs,
    pub adjusted_profile: SalesProfile,
    pub phase_average: PhaseRow,
    pub overall_average: RateOfSales,
    pub total_buy: u64,
    pub aggregated_curve: Vec<CurvePoint>,
    pub reference_curves: Vec<ReferenceCurve>,
    /// Highest raw rate in the reference table behind `reference_curves`.
    pub reference_peak: RateOfSales,
}

impl BuyPlan {
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            lifespan_weeks: self.inputs.lifespan_weeks,
            store_count: self.inputs.store_count,
            overall_average: self.overall_average,
            total_buy: self.total_buy,
        }
    }
}

/// Rescale the Decline column to `lifespan_weeks` and cap it at Intro.
///
/// Intro, Growth and Maturity are copied unchanged.
pub fn compute_adjusted_profile(reference: &ReferenceSet, lifespan_weeks: u32) -> SalesProfile {
    reference
        .products()
        .map(|product| {
            let mut row = *product.row;
            let ratio = f64::from(lifespan_weeks) / f64::from(product.lifespan_weeks);
            let scaled = product.row.get(LifecyclePhase::Decline) * ratio;
            let capped = scaled.clamp(RateOfSales::ZERO, product.row.get(LifecyclePhase::Intro));
            trace!(
                product = product.number,
                ratio,
                scaled = scaled.value(),
                capped = capped.value(),
                "adjusted decline rate"
            );
            row.set(LifecyclePhase::Decline, capped);
            row
        })
        .collect()
}

/// Column-wise mean over the rows. An empty profile averages to zero.
pub fn compute_phase_average(adjusted: &[PhaseRow]) -> PhaseRow {
    let mut avg = PhaseRow::default();
    for phase in LifecyclePhase::ALL {
        let mean = RateOfSales::mean(adjusted.iter().map(|row| &row.0[phase.index()]))
            .unwrap_or(RateOfSales::ZERO);
        avg.set(phase, mean);
    }
    avg
}

/// Mean of the four phase averages.
pub fn compute_overall_average(phase_average: &PhaseRow) -> RateOfSales {
    phase_average.rates().iter().sum::<RateOfSales>() / PHASE_COUNT as f64
}

/// `overall_average * lifespan * stores`, truncated toward zero.
pub fn compute_total_buy(
    overall_average: RateOfSales,
    lifespan_weeks: u32,
    store_count: u32,
) -> u64 {
    overall_average.total_units(lifespan_weeks, store_count)
}

/// Pair each phase average with its phase midpoint.
pub fn build_aggregated_curve(phase_average: &PhaseRow) -> Vec<CurvePoint> {
    LifecyclePhase::ALL
        .iter()
        .map(|&phase| CurvePoint {
            x: phase.midpoint(),
            y: phase_average.get(phase).value(),
        })
        .collect()
}

/// Interpolate every raw reference row across `[0, 1]` with `samples` points.
pub fn build_reference_curves(
    reference: &ReferenceSet,
    samples: usize,
) -> BuyPlanResult<Vec<ReferenceCurve>> {
    if samples < 2 {
        return Err(BuyPlanError::InvalidInput(format!(
            "curve needs at least 2 samples, got {samples}"
        )));
    }
    let xs = linspace(0.0, 1.0, samples);
    let knots = phase_midpoints();

    reference
        .products()
        .map(|product| -> BuyPlanResult<ReferenceCurve> {
            let ys = product.row.values();
            let points = xs
                .iter()
                .map(|&x| {
                    interp(x, &knots, &ys)
                        .map(|y| CurvePoint { x, y })
                        .ok_or_else(|| {
                            BuyPlanError::InvalidReference(format!(
                                "product {} cannot be interpolated",
                                product.number
                            ))
                        })
                })
                .collect::<BuyPlanResult<Vec<_>>>()?;
            Ok(ReferenceCurve {
                number: product.number,
                label: product.label(),
                lifespan_weeks: product.lifespan_weeks,
                points,
            })
        })
        .collect()
}

/// Estimator bound to one reference set.
#[derive(Debug, Clone, Copy)]
pub struct BuyEstimator<'a> {
    reference: &'a ReferenceSet,
    curve_samples: usize,
}

impl BuyEstimator<'static> {
    /// Estimator over the built-in reference table.
    pub fn builtin() -> Self {
        Self::new(ReferenceSet::builtin())
    }
}

impl<'a> BuyEstimator<'a> {
    pub fn new(reference: &'a ReferenceSet) -> Self {
        Self {
            reference,
            curve_samples: DEFAULT_CURVE_SAMPLES,
        }
    }

    pub fn with_curve_samples(mut self, samples: usize) -> BuyPlanResult<Self> {
        if samples < 2 {
            return Err(BuyPlanError::InvalidInput(format!(
                "curve needs at least 2 samples, got {samples}"
            )));
        }
        self.curve_samples = samples;
        Ok(self)
    }

    /// Summary only, without the curve data.
    pub fn summarize(&self, inputs: PlanInputs) -> PlanSummary {
        let adjusted = compute_adjusted_profile(self.reference, inputs.lifespan_weeks);
        let phase_average = compute_phase_average(&adjusted);
        let overall_average = compute_overall_average(&phase_average);
        let total_buy =
            compute_total_buy(overall_average, inputs.lifespan_weeks, inputs.store_count);
        PlanSummary {
            lifespan_weeks: inputs.lifespan_weeks,
            store_count: inputs.store_count,
            overall_average,
            total_buy,
        }
    }

    /// Run the full chain for one set of inputs.
    pub fn evaluate(&self, inputs: PlanInputs) -> BuyPlanResult<BuyPlan> {
        let adjusted_profile = compute_adjusted_profile(self.reference, inputs.lifespan_weeks);
        let phase_average = compute_phase_average(&adjusted_profile);
        let overall_average = compute_overall_average(&phase_average);
        let total_buy =
            compute_total_buy(overall_average, inputs.lifespan_weeks, inputs.store_count);
        let aggregated_curve = build_aggregated_curve(&phase_average);
        let reference_curves = build_reference_curves(self.reference, self.curve_samples)?;

        debug!(
            lifespan = inputs.lifespan_weeks,
            stores = inputs.store_count,
            overall_average = overall_average.value(),
            total_buy,
            "evaluated buy plan"
        );

        Ok(BuyPlan {
            inputs,
            adjusted_profile,
            phase_average,
            overall_average,
            total_buy,
            aggregated_curve,
            reference_curves,
            reference_peak: self.reference.peak_rate(),
        })
    }

    /// Summaries for every lifespan in `lifespans` at a fixed store count.
    pub fn sweep(
        &self,
        lifespans: RangeInclusive<u32>,
        store_count: u32,
    ) -> BuyPlanResult<Vec<PlanSummary>> {
        if lifespans.is_empty() {
            return Err(BuyPlanError::InvalidInput(format!(
                "empty lifespan range {}..={}",
                lifespans.start(),
                lifespans.end()
            )));
        }
        lifespans
            .map(|weeks| PlanInputs::new(weeks, store_count).map(|inputs| self.summarize(inputs)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn decline_column(profile: &[PhaseRow]) -> Vec<f64> {
        profile
            .iter()
            .map(|row| row.get(LifecyclePhase::Decline).value())
            .collect()
    }

    #[test]
    fn adjusted_decline_matches_default_scenario() {
        let adjusted = compute_adjusted_profile(ReferenceSet::builtin(), 12);
        let expected = [0.2, 0.25, 0.25, 0.15, 0.28];
        for (got, want) in decline_column(&adjusted).iter().zip(expected) {
            assert!((got - want).abs() < EPS, "got {got}, want {want}");
        }
    }

    #[test]
    fn phase_average_and_total_for_defaults() {
        let summary = BuyEstimator::builtin().summarize(PlanInputs::default());
        assert!((summary.overall_average.value() - 0.369).abs() < EPS);
        assert_eq!(summary.total_buy, 44);
    }

    #[test]
    fn short_lifespan_shrinks_decline() {
        let adjusted = compute_adjusted_profile(ReferenceSet::builtin(), 4);
        let expected = [0.08, 0.25 / 3.0, 0.1, 0.05, 0.1];
        for (got, want) in decline_column(&adjusted).iter().zip(expected) {
            assert!((got - want).abs() < EPS, "got {got}, want {want}");
        }
    }

    #[test]
    fn overall_average_is_mean_of_phases() {
        let row = PhaseRow::new(0.1, 0.2, 0.3, 0.4);
        assert!((compute_overall_average(&row).value() - 0.25).abs() < EPS);
    }

    #[test]
    fn phase_average_of_empty_profile_is_zero() {
        assert_eq!(compute_phase_average(&[]), PhaseRow::default());
    }

    #[test]
    fn aggregated_curve_uses_midpoints() {
        let curve = build_aggregated_curve(&PhaseRow::new(0.1, 0.2, 0.3, 0.4));
        let xs: Vec<f64> = curve.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.125, 0.375, 0.625, 0.875]);
        assert_eq!(curve[3].y, 0.4);
    }

    #[test]
    fn plan_records_peak_of_its_own_reference() {
        let plan = BuyEstimator::builtin()
            .with_curve_samples(10)
            .unwrap()
            .evaluate(PlanInputs::default())
            .unwrap();
        assert_eq!(plan.reference_peak, RateOfSales(0.6));

        let custom = ReferenceSet::new(vec![PhaseRow::new(0.1, 3.0, 0.2, 0.1)], vec![12]).unwrap();
        let plan = BuyEstimator::new(&custom)
            .with_curve_samples(10)
            .unwrap()
            .evaluate(PlanInputs::default())
            .unwrap();
        assert_eq!(plan.reference_peak, RateOfSales(3.0));
    }

    #[test]
    fn reference_curves_need_two_samples() {
        assert!(build_reference_curves(ReferenceSet::builtin(), 1).is_err());
        assert!(BuyEstimator::builtin().with_curve_samples(0).is_err());
    }

    #[test]
    fn inputs_are_range_checked() {
        assert!(PlanInputs::new(3, 10).is_err());
        assert!(PlanInputs::new(17, 10).is_err());
        assert!(PlanInputs::new(12, 0).is_err());
        assert!(PlanInputs::new(12, 51).is_err());
        assert_eq!(PlanInputs::new(12, 10).unwrap(), PlanInputs::default());
    }

    #[test]
    fn sweep_rejects_out_of_range_lifespans() {
        let estimator = BuyEstimator::builtin();
        assert_eq!(estimator.sweep(4..=16, 10).unwrap().len(), 13);
        assert!(estimator.sweep(2..=6, 10).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let empty = 10..=4;
        assert!(estimator.sweep(empty, 10).is_err());
    }
}
