//! Sampling distributions for effort, noise and capacity.
//!
//! - [`Pert`] / [`PertBatch`]: three-point effort estimates
//! - [`Distribution`]: the closed set of noise models, resolved by tag from
//!   a [`DistributionConfig`]:
//!   - `lognormal` → [`LogNormal`]
//!   - `skewt` → [`SkewT`]
//!   - `beta` → [`ScaledBeta`]
//!   - `empirical` → [`Empirical`]
//!
//! Configuration is the tagged record
//! `{"type": "<tag>", "params": {...}}`.

mod empirical;
mod lognormal;
mod pert;
mod scaled_beta;
mod skew_t;

pub use empirical::Empirical;
pub use lognormal::LogNormal;
pub use pert::{Pert, PertBatch};
pub use scaled_beta::ScaledBeta;
pub use skew_t::SkewT;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tagged configuration record for a [`Distribution`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum DistributionConfig {
    /// `exp(Normal(mu, sigma))`.
    #[serde(rename = "lognormal")]
    LogNormal {
        /// Log-space location.
        mu: f64,
        /// Log-space scale (0 = deterministic).
        sigma: f64,
    },
    /// Skewed Student-t.
    #[serde(rename = "skewt")]
    SkewT {
        /// Location.
        #[serde(alias = "loc")]
        location: f64,
        /// Scale.
        scale: f64,
        /// Shape α.
        #[serde(alias = "alpha")]
        skew: f64,
        /// Degrees of freedom.
        df: f64,
    },
    /// Beta(a, b) on [low, high].
    #[serde(rename = "beta")]
    Beta {
        /// First shape.
        a: f64,
        /// Second shape.
        b: f64,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
    /// Bootstrap from observations.
    #[serde(rename = "empirical")]
    Empirical {
        /// Observations to resample.
        pool: Vec<f64>,
    },
}

/// A fitted noise model. Immutable once built.
#[derive(Debug, Clone)]
pub enum Distribution {
    /// See [`LogNormal`].
    LogNormal(LogNormal),
    /// See [`SkewT`].
    SkewT(SkewT),
    /// See [`ScaledBeta`].
    Beta(ScaledBeta),
    /// See [`Empirical`].
    Empirical(Empirical),
}

impl Distribution {
    /// Resolve a configuration record to its variant, validating parameters.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for out-of-domain parameters.
    pub fn from_config(config: &DistributionConfig) -> Result<Self> {
        Ok(match config {
            DistributionConfig::LogNormal { mu, sigma } => {
                Self::LogNormal(LogNormal::new(*mu, *sigma)?)
            }
            DistributionConfig::SkewT {
                location,
                scale,
                skew,
                df,
            } => Self::SkewT(SkewT::new(*location, *scale, *skew, *df)?),
            DistributionConfig::Beta { a, b, low, high } => {
                Self::Beta(ScaledBeta::new(*a, *b, *low, *high)?)
            }
            DistributionConfig::Empirical { pool } => Self::Empirical(Empirical::new(pool.clone())?),
        })
    }

    /// The configuration record that rebuilds this distribution.
    pub fn to_config(&self) -> DistributionConfig {
        match self {
            Self::LogNormal(d) => DistributionConfig::LogNormal {
                mu: d.mu(),
                sigma: d.sigma(),
            },
            Self::SkewT(d) => DistributionConfig::SkewT {
                location: d.location(),
                scale: d.scale(),
                skew: d.skew(),
                df: d.df(),
            },
            Self::Beta(d) => DistributionConfig::Beta {
                a: d.a(),
                b: d.b(),
                low: d.low(),
                high: d.high(),
            },
            Self::Empirical(d) => DistributionConfig::Empirical {
                pool: d.pool().to_vec(),
            },
        }
    }

    /// Tag of the variant, as used in configuration.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::LogNormal(_) => "lognormal",
            Self::SkewT(_) => "skewt",
            Self::Beta(_) => "beta",
            Self::Empirical(_) => "empirical",
        }
    }

    /// Fail with [`crate::Error::Data`] if sampling is impossible (empty pool).
    pub fn ensure_sampleable(&self) -> Result<()> {
        match self {
            Self::Empirical(d) => d.ensure_sampleable(),
            _ => Ok(()),
        }
    }

    /// `n` independent draws.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Data`] for an empty empirical pool.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>> {
        let mut out = vec![0.0; n];
        self.sample_into(rng, &mut out)?;
        Ok(out)
    }

    /// Fill `out` with independent draws.
    pub fn sample_into<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) -> Result<()> {
        self.ensure_sampleable()?;
        for x in out.iter_mut() {
            *x = self.draw(rng);
        }
        Ok(())
    }

    /// One draw. Callers must have checked [`Self::ensure_sampleable`].
    #[inline]
    pub(crate) fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::LogNormal(d) => d.draw(rng),
            Self::SkewT(d) => d.draw(rng),
            Self::Beta(d) => d.draw(rng),
            Self::Empirical(d) => d.draw(rng),
        }
    }

    /// Smallest value the distribution can produce (`-INFINITY` if unbounded).
    pub(crate) fn lower_support(&self) -> f64 {
        match self {
            Self::LogNormal(_) => 0.0,
            Self::SkewT(_) => f64::NEG_INFINITY,
            Self::Beta(d) => d.low(),
            Self::Empirical(d) => d.pool().iter().copied().fold(f64::INFINITY, f64::min),
        }
    }
}

impl TryFrom<&DistributionConfig> for Distribution {
    type Error = crate::Error;

    fn try_from(config: &DistributionConfig) -> Result<Self> {
        Self::from_config(config)
    }
}

impl From<LogNormal> for Distribution {
    fn from(d: LogNormal) -> Self {
        Self::LogNormal(d)
    }
}

impl From<SkewT> for Distribution {
    fn from(d: SkewT) -> Self {
        Self::SkewT(d)
    }
}

impl From<ScaledBeta> for Distribution {
    fn from(d: ScaledBeta) -> Self {
        Self::Beta(d)
    }
}

impl From<Empirical> for Distribution {
    fn from(d: Empirical) -> Self {
        Self::Empirical(d)
    }
}
