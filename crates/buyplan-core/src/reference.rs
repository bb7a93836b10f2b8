//! Reference products: historical rate-of-sales profiles and lifespans.
//!
//! A [`ReferenceSet`] pairs each product's [`PhaseRow`] with the lifespan
//! (in weeks) it was observed over. The built-in set is exposed through
//! [`ReferenceSet::builtin`] and never changes during a run.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{BuyPlanError, BuyPlanResult};
use crate::phase::{LifecyclePhase, PhaseRow};
use crate::units::RateOfSales;

/// Rows of rates, one per reference product.
pub type SalesProfile = Vec<PhaseRow>;

const BUILTIN_PROFILE: [PhaseRow; 5] = [
    PhaseRow::new(0.2, 0.5, 0.4, 0.2),
    PhaseRow::new(0.3, 0.6, 0.45, 0.25),
    PhaseRow::new(0.25, 0.55, 0.5, 0.3),
    PhaseRow::new(0.22, 0.52, 0.42, 0.2),
    PhaseRow::new(0.28, 0.58, 0.48, 0.25),
];

const BUILTIN_LIFESPANS: [u32; 5] = [10, 12, 12, 16, 10];

static BUILTIN: Lazy<ReferenceSet> = Lazy::new(|| ReferenceSet {
    profile: BUILTIN_PROFILE.to_vec(),
    lifespans: BUILTIN_LIFESPANS.to_vec(),
});

/// A single reference product viewed through its set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceProduct<'a> {
    /// 1-based position in the set
    pub number: usize,
    pub row: &'a PhaseRow,
    pub lifespan_weeks: u32,
}

impl ReferenceProduct<'_> {
    /// Legend label, e.g. `Product 1, LS 10`.
    pub fn label(&self) -> String {
        format!("Product {}, LS {}", self.number, self.lifespan_weeks)
    }
}

/// Immutable table of reference products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceSet {
    profile: SalesProfile,
    lifespans: Vec<u32>,
}

impl ReferenceSet {
    /// Build a validated reference set.
    ///
    /// Rejects an empty table, a lifespan count that does not match the
    /// row count, zero lifespans (the decline rescaling divides by them),
    /// and negative or non-finite rates.
    pub fn new(profile: SalesProfile, lifespans: Vec<u32>) -> BuyPlanResult<Self> {
        if profile.is_empty() {
            return Err(BuyPlanError::InvalidReference(
                "reference set has no products".into(),
            ));
        }
        if profile.len() != lifespans.len() {
            return Err(BuyPlanError::InvalidReference(format!(
                "{} profile rows but {} lifespans",
                profile.len(),
                lifespans.len()
            )));
        }
        if let Some(pos) = lifespans.iter().position(|&ls| ls == 0) {
            return Err(BuyPlanError::InvalidReference(format!(
                "product {} has a zero lifespan",
                pos + 1
            )));
        }
        for (i, row) in profile.iter().enumerate() {
            for phase in LifecyclePhase::ALL {
                let rate = row.get(phase);
                if !rate.is_finite() || rate < RateOfSales::ZERO {
                    return Err(BuyPlanError::InvalidReference(format!(
                        "product {} has invalid {} rate {}",
                        i + 1,
                        phase,
                        rate.value()
                    )));
                }
            }
        }
        Ok(Self { profile, lifespans })
    }

    /// The built-in five-product reference table.
    pub fn builtin() -> &'static ReferenceSet {
        &BUILTIN
    }

    pub fn profile(&self) -> &[PhaseRow] {
        &self.profile
    }

    pub fn lifespans(&self) -> &[u32] {
        &self.lifespans
    }

    pub fn len(&self) -> usize {
        self.profile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_empty()
    }

    pub fn products(&self) -> impl Iterator<Item = ReferenceProduct<'_>> + '_ {
        self.profile
            .iter()
            .zip(self.lifespans.iter())
            .enumerate()
            .map(|(i, (row, &lifespan_weeks))| ReferenceProduct {
                number: i + 1,
                row,
                lifespan_weeks,
            })
    }

    /// Highest rate anywhere in the raw table.
    pub fn peak_rate(&self) -> RateOfSales {
        self.profile
            .iter()
            .map(PhaseRow::peak)
            .fold(RateOfSales::ZERO, RateOfSales::max)
    }
}
