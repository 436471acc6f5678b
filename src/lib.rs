#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod error;
pub use error::{Error, Result};

mod traits;
pub use traits::{Indicator, MovingAverage, ScalarIndicator};

mod utils;
pub use utils::{ExtremumTracker, Lookback, Max, Min, OrderPolicy, SequenceGuard};
pub(crate) use utils::{Window, helper};

mod maximum;
pub use maximum::MaximumInPeriod;

mod minimum;
pub use minimum::MinimumInPeriod;

mod sum_over_period;
pub use sum_over_period::SumOverPeriod;

mod moving_average;
pub use moving_average::{DEFAULT_SMOOTHING, ExponentialMovingAverage, SimpleMovingAverage};

mod variance;
pub use variance::{Moments, Variance};

mod standard_deviation;
pub use standard_deviation::StandardDeviation;

mod bollinger_bands;
pub use bollinger_bands::{Bands, BollingerBands};

mod williams_percent_range;
pub use williams_percent_range::WilliamsPercentRange;

mod relative_strength_index;
pub use relative_strength_index::RelativeStrengthIndex;

mod true_range;
pub use true_range::{AverageTrueRange, TrueRange};

mod accumulation_distribution;
pub use accumulation_distribution::{
    AccumulationDistributionLine, AccumulationDistributionOscillator,
};

mod ease_of_movement;
pub use ease_of_movement::EaseOfMovement;

mod linear_regression;
pub use linear_regression::{LinearRegression, Regression};
