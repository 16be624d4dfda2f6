//! Semantic unit types for greenhouse-gas quantities
//!
//! Newtype wrappers keep gas masses, fractions and percentages from being
//! mixed up in the calculation pipeline.
//!
//! # Design Philosophy
//! - All quantities use f64: inventory totals are audited to 3 decimal places
//! - Implements common traits (Add, Mul, Ord, Display, etc.)
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//! - Private inner fields with validated constructors
//!
//! # Usage
//! ```
//! use ghg_engine_core::core_types::units::{Fraction, Percent, Tonnes};
//!
//! let efficiency: Fraction = Percent::new(90.0).to_fraction();
//! assert!((*efficiency - 0.9).abs() < 1e-12);
//!
//! let ch4 = Tonnes::new(0.243);
//! assert_eq!(ch4.to_string(), "0.243 t");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Deref, Mul};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Round to the 3 decimal places every emitted figure is reported with.
#[inline]
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ============================================================================
// MASS
// ============================================================================

/// Mass in metric tonnes (of a gas, or of CO2-equivalent)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Tonnes(f64);

impl Eq for Tonnes {}

impl PartialOrd for Tonnes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tonnes {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Tonnes {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Tonnes {
    /// Zero mass
    pub const ZERO: Tonnes = Tonnes(0.0);

    /// Create a new mass in tonnes. Asserts value >= 0 (non-negative mass).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Tonnes::new: negative mass is invalid");
        Tonnes(value)
    }

    /// Same mass rounded to 3 decimal places
    #[inline]
    #[must_use]
    pub fn rounded(self) -> Self {
        Tonnes(round3(self.0))
    }
}

impl From<Tonnes> for f64 {
    fn from(t: Tonnes) -> f64 {
        t.0
    }
}

impl fmt::Display for Tonnes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} t", self.0)
    }
}

impl Add for Tonnes {
    type Output = Tonnes;
    fn add(self, rhs: Tonnes) -> Tonnes {
        Tonnes(self.0 + rhs.0)
    }
}

impl AddAssign for Tonnes {
    fn add_assign(&mut self, rhs: Tonnes) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for Tonnes {
    type Output = Tonnes;
    fn mul(self, rhs: f64) -> Tonnes {
        // Scalars are GWP constants or fractions, both non-negative
        Tonnes(self.0 * rhs)
    }
}

impl Mul<Fraction> for Tonnes {
    type Output = Tonnes;
    fn mul(self, rhs: Fraction) -> Tonnes {
        Tonnes(self.0 * rhs.0)
    }
}

impl Sum for Tonnes {
    fn sum<I: Iterator<Item = Tonnes>>(iter: I) -> Tonnes {
        iter.fold(Tonnes::ZERO, Add::add)
    }
}

// ============================================================================
// RATIOS
// ============================================================================

/// Dimensionless fraction in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fraction(f64);

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Fraction {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fraction {
    /// Nothing
    pub const ZERO: Fraction = Fraction(0.0);

    /// Create a new fraction. Asserts value is within [0, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0 && value <= 1.0,
            "Fraction::new: value must be within [0, 1]"
        );
        Fraction(value)
    }

    /// Fallible constructor for caller-supplied values.
    #[inline]
    #[must_use]
    pub fn checked(value: f64) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Fraction(value))
    }

    /// 1 - self
    #[inline]
    #[must_use]
    pub fn complement(self) -> Self {
        Fraction(1.0 - self.0)
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> f64 {
        f.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Percentage in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f64);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Percent {
    /// Create a new percentage. Asserts value is within [0, 100].
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= 0.0 && value <= 100.0,
            "Percent::new: value must be within [0, 100]"
        );
        Percent(value)
    }

    /// Fallible constructor for caller-supplied values.
    #[inline]
    #[must_use]
    pub fn checked(value: f64) -> Option<Self> {
        (0.0..=100.0).contains(&value).then_some(Percent(value))
    }

    /// Convert to a fraction (divide by 100)
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> Fraction {
        Fraction(self.0 / 100.0)
    }
}

impl From<Percent> for Fraction {
    fn from(p: Percent) -> Fraction {
        p.to_fraction()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
