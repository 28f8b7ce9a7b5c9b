//! Skewed Student-t noise (Azzalini–Capitanio construction).
//!
//! With `δ = α / √(1 + α²)`, `U₀, U₁ ~ N(0, 1)` and `V ~ χ²(ν)`:
//!
//! ```text
//! Z = δ|U₀| + √(1 − δ²) U₁        (skew-normal with shape α)
//! T = Z / √(V / ν)                (skew-t with ν degrees of freedom)
//! X = location + scale · T
//! ```
//!
//! Heavier tailed than the lognormal model, so it is the default model of
//! execution error when nothing has been fitted.

use rand::Rng;
use rand_distr::{ChiSquared, Distribution as _, StandardNormal};

use crate::error::{Error, Result};

/// Skew-t distribution.
#[derive(Debug, Clone)]
pub struct SkewT {
    location: f64,
    scale: f64,
    skew: f64,
    df: f64,
    delta: f64,
    chi2: ChiSquared<f64>,
}

impl SkewT {
    /// Create the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] unless `location` and `skew` are finite and
    /// `scale`, `df` are positive and finite.
    pub fn new(location: f64, scale: f64, skew: f64, df: f64) -> Result<Self> {
        if !location.is_finite() {
            return Err(Error::validation("location", format!("must be finite, got {location}")));
        }
        if !skew.is_finite() {
            return Err(Error::validation("skew", format!("must be finite, got {skew}")));
        }
        crate::error::ensure_positive("scale", scale)?;
        crate::error::ensure_positive("df", df)?;
        let chi2 = ChiSquared::new(df).map_err(|e| Error::validation("df", e.to_string()))?;
        Ok(Self {
            location,
            scale,
            skew,
            df,
            delta: skew / (1.0 + skew * skew).sqrt(),
            chi2,
        })
    }

    /// Location parameter.
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Shape (skewness) parameter α.
    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Degrees of freedom ν.
    pub fn df(&self) -> f64 {
        self.df
    }

    /// One draw.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u0: f64 = StandardNormal.sample(rng);
        let u1: f64 = StandardNormal.sample(rng);
        let z = self.delta * u0.abs() + (1.0 - self.delta * self.delta).sqrt() * u1;
        let v = self.chi2.sample(rng).max(f64::MIN_POSITIVE);
        self.location + self.scale * z / (v / self.df).sqrt()
    }
}
