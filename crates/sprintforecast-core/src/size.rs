//! T-shirt size classification of ticket estimates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse size class of a ticket's mean estimate, ordered smallest first.
///
/// | Bucket | Mean hours |
/// |--------|------------|
/// | XS     | < 2        |
/// | S      | 2 – 4      |
/// | M      | 4 – 8      |
/// | L      | 8 – 16     |
/// | XL     | 16 – 32    |
/// | XXL    | ≥ 32       |
///
/// Lower bounds are inclusive. XXL tickets are too large to commit to and
/// have to be split or re-estimated before intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeBucket {
    /// Under two hours.
    XS,
    /// Two to four hours.
    S,
    /// Four to eight hours.
    M,
    /// Eight to sixteen hours.
    L,
    /// Sixteen to thirty-two hours.
    XL,
    /// Thirty-two hours or more.
    XXL,
}

impl SizeBucket {
    /// Every bucket, smallest first.
    pub const ALL: [SizeBucket; 6] = [Self::XS, Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    /// The largest bucket; never admitted by intake planning.
    pub const LARGEST: SizeBucket = Self::XXL;

    /// Classify a mean estimate in hours.
    pub fn classify(hours: f64) -> Self {
        // NaN falls through to XXL so it is never admitted
        Self::ALL
            .into_iter()
            .find(|bucket| hours < bucket.upper_bound())
            .unwrap_or(Self::XXL)
    }

    /// Exclusive upper bound in hours (`INFINITY` for XXL).
    pub fn upper_bound(self) -> f64 {
        match self {
            Self::XS => 2.0,
            Self::S => 4.0,
            Self::M => 8.0,
            Self::L => 16.0,
            Self::XL => 32.0,
            Self::XXL => f64::INFINITY,
        }
    }

    /// Inclusive lower bound in hours.
    pub fn lower_bound(self) -> f64 {
        match self {
            Self::XS => 0.0,
            Self::S => 2.0,
            Self::M => 4.0,
            Self::L => 8.0,
            Self::XL => 16.0,
            Self::XXL => 32.0,
        }
    }

    /// Short label.
    pub fn name(self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
            Self::XXL => "XXL",
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
