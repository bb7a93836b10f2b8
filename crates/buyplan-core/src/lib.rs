//! # buyplan-core: lifespan-adjusted total buy estimation
//!
//! Estimates how many units to procure for a new product (the "PLM"
//! product) from the rate-of-sales (ROS) profiles of five reference
//! products.
//!
//! ## Model
//!
//! Each reference product has a ROS value for four lifecycle phases
//! (Intro, Growth, Maturity, Decline) and the lifespan it sold over. For a
//! chosen lifespan:
//!
//! - only the Decline rate is rescaled, by `lifespan / reference lifespan`,
//!   and capped to `[0, intro rate]`;
//! - the adjusted rows are averaged per phase, then across phases;
//! - total buy is `average ROS * lifespan * stores`, truncated.
//!
//! ## Quick Start
//!
//! ```rust
//! use buyplan_core::{BuyEstimator, PlanInputs};
//!
//! let plan = BuyEstimator::builtin()
//!     .evaluate(PlanInputs::new(12, 10).unwrap())
//!     .unwrap();
//! assert_eq!(plan.total_buy, 44);
//! assert_eq!(plan.reference_curves.len(), 5);
//! ```

pub mod error;
pub mod estimator;
pub mod interp;
pub mod phase;
pub mod reference;
pub mod units;

pub use error::{BuyPlanError, BuyPlanResult};
pub use estimator::{
    build_aggregated_curve, build_reference_curves, compute_adjusted_profile,
    compute_overall_average, compute_phase_average, compute_total_buy, BuyEstimator, BuyPlan,
    CurvePoint, PlanInputs, PlanSummary, ReferenceCurve, DEFAULT_CURVE_SAMPLES,
    DEFAULT_LIFESPAN_WEEKS, DEFAULT_STORE_COUNT, LIFESPAN_RANGE, STORE_RANGE,
};
pub use phase::{phase_midpoints, LifecyclePhase, PhaseRow, PHASE_COUNT, QUARTER_MARKS};
pub use reference::{ReferenceProduct, ReferenceSet, SalesProfile};
pub use units::RateOfSales;
