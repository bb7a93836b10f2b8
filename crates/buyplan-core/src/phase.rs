//! Product lifecycle phases and their positions on the normalized axis.

use serde::{Deserialize, Serialize};

use crate::units::RateOfSales;

/// One of the four stages of a product's sales curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    Intro,
    Growth,
    Maturity,
    Decline,
}

/// Number of lifecycle phases per product row.
pub const PHASE_COUNT: usize = 4;

/// Phase boundaries at 25%, 50% and 75% of the lifecycle.
pub const QUARTER_MARKS: [f64; 3] = [0.25, 0.5, 0.75];

impl LifecyclePhase {
    pub const ALL: [LifecyclePhase; PHASE_COUNT] = [
        LifecyclePhase::Intro,
        LifecyclePhase::Growth,
        LifecyclePhase::Maturity,
        LifecyclePhase::Decline,
    ];

    /// Column index of this phase in a [`PhaseRow`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Midpoint of the phase on the [0, 1] lifecycle axis.
    #[inline]
    pub const fn midpoint(self) -> f64 {
        match self {
            LifecyclePhase::Intro => 0.125,
            LifecyclePhase::Growth => 0.375,
            LifecyclePhase::Maturity => 0.625,
            LifecyclePhase::Decline => 0.875,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LifecyclePhase::Intro => "Intro",
            LifecyclePhase::Growth => "Growth",
            LifecyclePhase::Maturity => "Maturity",
            LifecyclePhase::Decline => "Decline",
        }
    }
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Midpoints of all phases, in phase order.
pub fn phase_midpoints() -> [f64; PHASE_COUNT] {
    LifecyclePhase::ALL.map(LifecyclePhase::midpoint)
}

/// Rates for one product across the four phases.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseRow(pub [RateOfSales; PHASE_COUNT]);

impl PhaseRow {
    pub const fn new(intro: f64, growth: f64, maturity: f64, decline: f64) -> Self {
        Self([
            RateOfSales(intro),
            RateOfSales(growth),
            RateOfSales(maturity),
            RateOfSales(decline),
        ])
    }

    #[inline]
    pub fn get(&self, phase: LifecyclePhase) -> RateOfSales {
        self.0[phase.index()]
    }

    #[inline]
    pub fn set(&mut self, phase: LifecyclePhase, rate: RateOfSales) {
        self.0[phase.index()] = rate;
    }

    pub fn rates(&self) -> &[RateOfSales; PHASE_COUNT] {
        &self.0
    }

    /// Raw values, in phase order.
    pub fn values(&self) -> [f64; PHASE_COUNT] {
        self.0.map(RateOfSales::value)
    }

    /// Largest rate across the phases.
    pub fn peak(&self) -> RateOfSales {
        self.0
            .iter()
            .copied()
            .fold(RateOfSales::ZERO, RateOfSales::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoints_sit_between_quarter_marks() {
        let mids = phase_midpoints();
        assert_eq!(mids, [0.125, 0.375, 0.625, 0.875]);
        for (i, mark) in QUARTER_MARKS.iter().enumerate() {
            assert!(mids[i] < *mark && *mark < mids[i + 1]);
        }
    }

    #[test]
    fn index_follows_declaration_order() {
        for (i, phase) in LifecyclePhase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn row_accessors() {
        let mut row = PhaseRow::new(0.2, 0.5, 0.4, 0.2);
        assert_eq!(row.get(LifecyclePhase::Growth), RateOfSales(0.5));
        row.set(LifecyclePhase::Decline, RateOfSales(0.1));
        assert_eq!(row.values(), [0.2, 0.5, 0.4, 0.1]);
        assert_eq!(row.peak(), RateOfSales(0.5));
    }

    #[test]
    fn phase_serializes_lowercase() {
        let json = serde_json::to_string(&LifecyclePhase::Maturity).unwrap();
        assert_eq!(json, "\"maturity\"");
    }
}
