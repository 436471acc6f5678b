pub mod helper;

mod window;
pub use window::Window;

mod sequence;
pub use sequence::SequenceGuard;

mod lookback;
pub use lookback::Lookback;

mod extremum;
pub use extremum::{ExtremumTracker, Max, Min, OrderPolicy};
