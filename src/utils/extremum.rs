use core::marker::PhantomData;

use num_traits::Float;

use super::Window;

/// Trait for defining order policies for the extremum tracker
///
/// # Methods
///
/// * `supersedes(candidate, current) -> bool` - Returns true if `candidate` should replace
///   `current` as the extremum. Ties must return true so the newest sample wins.
/// * `beats(candidate, current) -> bool` - Strict variant used while rescanning
pub trait OrderPolicy<T> {
    /// Returns true if `candidate` is at least as extreme as `current`
    fn supersedes(candidate: &T, current: &T) -> bool;

    /// Returns true if `candidate` is strictly more extreme than `current`
    fn beats(candidate: &T, current: &T) -> bool;
}

/// Order policy for minimum
#[derive(Debug, Clone)]
pub struct Min;

/// Order policy for maximum
#[derive(Debug, Clone)]
pub struct Max;

impl<T: PartialOrd> OrderPolicy<T> for Min {
    #[inline]
    fn supersedes(candidate: &T, current: &T) -> bool {
        candidate <= current
    }

    #[inline]
    fn beats(candidate: &T, current: &T) -> bool {
        candidate < current
    }
}

impl<T: PartialOrd> OrderPolicy<T> for Max {
    #[inline]
    fn supersedes(candidate: &T, current: &T) -> bool {
        candidate >= current
    }

    #[inline]
    fn beats(candidate: &T, current: &T) -> bool {
        candidate > current
    }
}

/// Sliding-window extremum with a cached slot index.
///
/// The tracker keeps the last `period` samples in a [`Window`] and remembers
/// which slot holds the current extremum. An incoming sample either replaces
/// the cached extremum (O(1)), leaves it untouched (O(1)), or, when it is
/// about to overwrite the very slot holding the extremum, triggers a rescan
/// of the other `period - 1` slots (O(period)). The rescan only happens when
/// the extremum ages out, which keeps updates amortized O(1).
///
/// Callers supply the slot (`sequence % period`). Two regimes exist:
///
/// * warm-up, while fewer than `period` samples were seen: the window only
///   grows and nothing can be evicted ([`warm_up`](Self::warm_up));
/// * settled, once the window is full ([`update`](Self::update)).
///
/// Each mutating method has a read-only twin ([`peek_warm_up`](Self::peek_warm_up),
/// [`peek`](Self::peek)) that returns the same value without touching the
/// buffer or the cached index.
///
/// # Type Parameters
///
/// * `T` - The type of the tracked values
/// * `O` - The order policy ([`Max`] or [`Min`])
#[derive(Debug, Clone)]
pub struct ExtremumTracker<T, O> {
    /// Last `period` samples, NaN until written
    values: Window<T>,
    /// Slot currently holding the extremum
    cached: usize,
    _order: PhantomData<O>,
}

impl<T, O> ExtremumTracker<T, O>
where
    T: Float,
    O: OrderPolicy<T>,
{
    /// Creates a tracker over a window of `period` samples.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        Self {
            values: Window::new(period, T::nan()),
            cached: 0,
            _order: PhantomData,
        }
    }

    /// Returns the window width.
    #[inline]
    pub fn period(&self) -> usize {
        self.values.capacity()
    }

    /// Returns the slot currently believed to hold the extremum.
    #[inline]
    pub const fn cached_index(&self) -> usize {
        self.cached
    }

    /// Returns the cached extremum, NaN before the first sample.
    #[inline]
    pub fn extremum(&self) -> T {
        self.values.get(self.cached)
    }

    /// Records a warm-up sample at `slot` and returns the extremum so far.
    ///
    /// `slot` must equal the number of samples recorded since construction or
    /// the last reset, and must be below `period`.
    #[inline]
    pub fn warm_up(&mut self, slot: usize, value: T) -> T {
        self.values.replace(slot, value);
        let current = self.values.get(self.cached);
        if O::supersedes(&value, &current) {
            self.cached = slot;
            value
        } else {
            current
        }
    }

    /// Returns what [`warm_up`](Self::warm_up) would return, without recording.
    #[inline]
    pub fn peek_warm_up(&self, slot: usize, value: T) -> T {
        if slot == 0 {
            return value;
        }
        let current = self.values.get(self.cached);
        if O::supersedes(&value, &current) {
            value
        } else {
            current
        }
    }

    /// Records a sample into a full window at `slot`, evicting the sample it
    /// held, and returns the extremum of the resulting window.
    #[inline]
    pub fn update(&mut self, slot: usize, value: T) -> T {
        let (index, extremum) = self.locate(slot, value);
        self.cached = index;
        self.values.replace(slot, value);
        extremum
    }

    /// Returns what [`update`](Self::update) would return, without recording.
    #[inline]
    pub fn peek(&self, slot: usize, value: T) -> T {
        self.locate(slot, value).1
    }

    /// Restores the post-construction state without reallocating.
    pub fn reset(&mut self) {
        self.values.reset();
        self.cached = 0;
    }

    /// Decides where the extremum lives once `value` is written to `slot`.
    ///
    /// Reads the buffer as it stands, so the sample about to be evicted is
    /// still present at `slot` and is skipped explicitly during a rescan.
    fn locate(&self, slot: usize, value: T) -> (usize, T) {
        let current = self.values.get(self.cached);
        if O::supersedes(&value, &current) {
            return (slot, value);
        }
        if slot != self.cached {
            return (self.cached, current);
        }

        // The extremum is being evicted
        let mut best = (slot, value);
        for (index, candidate) in self.values.as_slice().iter().enumerate() {
            if index != slot && O::beats(candidate, &best.1) {
                best = (index, *candidate);
            }
        }
        best
    }
}
