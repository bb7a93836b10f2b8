//! Unit newtypes for sales quantities.
//!
//! Rates of sales (units per store per week) and whole units to procure are
//! easy to mix up when everything is a bare `f64`. [`RateOfSales`] keeps the
//! per-store weekly rate distinct from plain scale factors, and converting a
//! rate into a procurement quantity goes through [`RateOfSales::total_units`].
//!
//! ```
//! use buyplan_core::units::RateOfSales;
//!
//! let intro = RateOfSales(0.2);
//! let scaled = intro * 1.2;
//! assert!((scaled.value() - 0.24).abs() < 1e-12);
//! assert_eq!(scaled.total_units(12, 10), 28);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

macro_rules! impl_unit_ops {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Maximum of two values
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }

            /// Clamp value to range
            #[inline]
            pub fn clamp(self, min: Self, max: Self) -> Self {
                Self(self.0.clamp(min.0, max.0))
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }

        impl<'a> std::iter::Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

/// Rate of sales: units sold per store per week.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct RateOfSales(pub f64);

impl_unit_ops!(RateOfSales);

impl RateOfSales {
    pub const ZERO: Self = Self(0.0);

    /// Units to procure when this rate holds for `weeks` across `stores`.
    ///
    /// The product is truncated toward zero; negative rates yield 0.
    #[inline]
    pub fn total_units(self, weeks: u32, stores: u32) -> u64 {
        let raw = self.0 * f64::from(weeks) * f64::from(stores);
        if raw.is_finite() && raw > 0.0 {
            raw.trunc() as u64
        } else {
            0
        }
    }

    /// Arithmetic mean of a set of rates; `None` when empty.
    pub fn mean<'a, I>(rates: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a RateOfSales>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        for rate in rates {
            count += 1;
            sum += rate.0;
        }
        (count > 0).then(|| Self(sum / count as f64))
    }
}
