//! Statistical helpers for forecast summaries and model fitting.
//!
//! - Percentiles by linear interpolation between order statistics
//! - Sample moments, including Bessel-corrected log-moments for lognormal fits

mod moments;
mod quantile;

pub use moments::{log_moments, mean, sample_std, weighted_log_moments, Degeneracy, LogMoments};
pub use quantile::{compute_quantile, compute_quantile_sorted, compute_quantiles_sorted, sort_samples};
