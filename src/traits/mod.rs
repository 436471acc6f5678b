mod indicator;
pub use indicator::Indicator;

mod scalar_indicator;
pub use scalar_indicator::{MovingAverage, ScalarIndicator};
