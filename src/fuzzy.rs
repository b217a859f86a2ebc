//! Four-valued fuzzy logic over a Belnap-Lukasiewicz algebra.
//!
//! A [`Fuzzy`] value is a pair `(truth, falsity)` with both components in
//! `[0, 1]`. Unlike a classical fuzzy value there is no constraint that the
//! two components sum to one: a value can be simultaneously weakly true and
//! weakly false (partial evidence for both), fully unknown (no evidence for
//! either), or in outright conflict (full evidence for both).

use crate::error::{Error, Result};

/// A four-valued fuzzy truth value: a `(truth, falsity)` pair, each in
/// `[0, 1]`.
///
/// # Examples
///
/// ```
/// use needs_engine::fuzzy::Fuzzy;
///
/// let a = Fuzzy::TRUE;
/// let b = Fuzzy::UNKNOWN;
/// let conjunction = a.and(b);
/// assert_eq!(conjunction, Fuzzy::UNKNOWN);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fuzzy {
    t: f64,
    f: f64,
}

impl Fuzzy {
    /// The canonical `TRUE` value: `(1, 0)`.
    pub const TRUE: Self = Self { t: 1.0, f: 0.0 };

    /// The canonical `FALSE` value: `(0, 1)`.
    pub const FALSE: Self = Self { t: 0.0, f: 1.0 };

    /// The canonical `UNKNOWN` value: `(0, 0)` — no evidence either way.
    pub const UNKNOWN: Self = Self { t: 0.0, f: 0.0 };

    /// The canonical `CONFLICT` value: `(1, 1)` — full evidence both ways.
    pub const CONFLICT: Self = Self { t: 1.0, f: 1.0 };

    /// Constructs a fuzzy value from raw components, clamping to `[0, 1]`.
    ///
    /// Prefer this over `from_parts` when the caller trusts the inputs were
    /// already computed by this module's own primitives; use `from_parts`
    /// at boundaries where an out-of-range input is a caller error worth
    /// rejecting.
    #[must_use]
    pub fn new_clamped(t: f64, f: f64) -> Self {
        Self {
            t: t.clamp(0.0, 1.0),
            f: f.clamp(0.0, 1.0),
        }
    }

    /// Constructs a fuzzy value from raw components, rejecting anything
    /// outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] if either component lies outside
    /// `[0, 1]`.
    pub fn from_parts(t: f64, f: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&t) {
            return Err(Error::ValueOutOfRange {
                field: "truth".to_string(),
                value: t,
            });
        }
        if !(0.0..=1.0).contains(&f) {
            return Err(Error::ValueOutOfRange {
                field: "falsity".to_string(),
                value: f,
            });
        }
        Ok(Self { t, f })
    }

    /// The truth component.
    #[must_use]
    pub const fn truth(self) -> f64 {
        self.t
    }

    /// The falsity component.
    #[must_use]
    pub const fn falsity(self) -> f64 {
        self.f
    }

    /// Negation: swaps truth and falsity.
    #[must_use]
    pub const fn not(self) -> Self {
        Self {
            t: self.f,
            f: self.t,
        }
    }

    /// Lukasiewicz conjunction.
    ///
    /// `t' = max(0, t1 + t2 - 1)`, `f' = min(1, f1 + f2)`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::new_clamped((self.t + other.t - 1.0).max(0.0), (self.f + other.f).min(1.0))
    }

    /// Lukasiewicz disjunction.
    ///
    /// `t' = min(1, t1 + t2)`, `f' = max(0, f1 + f2 - 1)`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::new_clamped((self.t + other.t).min(1.0), (self.f + other.f - 1.0).max(0.0))
    }

    /// Material implication: `self implies other`, defined as
    /// `or(not(self), other)`.
    #[must_use]
    pub fn implies(self, other: Self) -> Self {
        self.not().or(other)
    }

    /// Biconditional: `self iff other`, defined as
    /// `and(implies(self, other), implies(other, self))`.
    #[must_use]
    pub fn iff(self, other: Self) -> Self {
        self.implies(other).and(other.implies(self))
    }

    /// Folds `and` across an iterator of values, starting from `TRUE`.
    ///
    /// An empty iterator yields `TRUE`, matching the identity of the CNF
    /// empty conjunction.
    #[must_use]
    pub fn and_all(values: impl IntoIterator<Item = Self>) -> Self {
        values.into_iter().fold(Self::TRUE, Self::and)
    }

    /// Folds `or` across an iterator of values, starting from `FALSE`.
    ///
    /// An empty iterator yields `FALSE`, matching the identity of the CNF
    /// empty disjunction.
    #[must_use]
    pub fn or_all(values: impl IntoIterator<Item = Self>) -> Self {
        values.into_iter().fold(Self::FALSE, Self::or)
    }
}
