//! Constants used throughout the crate.

/// Default deterministic seed for random streams.
///
/// Same seed + same inputs = same forecast. The value `0x737072696E74` is
/// "sprint" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x737072696E74;

/// Default number of Monte Carlo paths for an aggregate forecast summary.
pub const DEFAULT_PATHS: usize = 10_000;

/// Default number of draws for queue and empirical forecast engines.
pub const DEFAULT_DRAWS: usize = 2_000;

/// Default number of workers in the queue simulator's pool.
pub const DEFAULT_WORKERS: usize = 3;

/// Default multiple of the remaining hours at which a simulated queue path is cut off.
pub const DEFAULT_HORIZON_FACTOR: f64 = 10.0;

/// Default confidence level for intake planning.
pub const DEFAULT_CONFIDENCE: f64 = 0.8;

/// Focused hours a developer contributes per sprint day.
pub const DEFAULT_HOURS_PER_DEV_DAY: f64 = 6.0;

/// Percentiles reported by a forecast summary.
pub const SUMMARY_PERCENTILES: [f64; 3] = [0.50, 0.80, 0.95];

/// Bound on the magnitude of a log-space execution error.
///
/// `exp(20)` is about 4.9e8, so clamped multipliers keep completion times finite
/// even under heavy-tailed skew-t draws.
pub const MAX_LOG_ERROR: f64 = 20.0;

/// Per-sprint weight decay of the momentum model (most recent sprint weighs 1).
/// At 1 every sprint counts equally.
pub const DEFAULT_MOMENTUM_DECAY: f64 = 1.0;

/// How far the momentum location is pulled toward the target, in [0, 1].
pub const DEFAULT_ANCHOR_WEIGHT: f64 = 0.25;
