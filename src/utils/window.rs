use alloc::boxed::Box;

/// A fixed-capacity buffer addressed by sequence number.
///
/// The slot for a sample is `sequence % capacity`, so the window never moves
/// data around: a new sample simply overwrites the slot of the sample that
/// leaves the window. Slots that were never written hold the sentinel the
/// window was created with.
#[derive(Debug, Clone)]
pub struct Window<T> {
    /// The buffer that stores the values
    buf: Box<[T]>,
    /// Value held by slots that were not written yet
    sentinel: T,
}

impl<T: Copy> Window<T> {
    /// Creates a new window of `capacity` slots, each holding `sentinel`
    pub fn new(capacity: usize, sentinel: T) -> Self {
        assert!(capacity > 0, "capacity can not be zero");

        Self {
            buf: vec![sentinel; capacity].into_boxed_slice(),
            sentinel,
        }
    }

    /// Restores every slot to the sentinel.
    pub fn reset(&mut self) {
        self.buf.fill(self.sentinel);
    }

    /// Returns the number of slots in the window.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Maps a sequence number to its slot.
    #[inline]
    pub fn slot(&self, sequence: u64) -> usize {
        (sequence % self.buf.len() as u64) as usize
    }

    /// Returns the value held by `slot`.
    #[inline]
    pub fn get(&self, slot: usize) -> T {
        self.buf[slot]
    }

    /// Writes `value` into `slot` and returns the value it replaced.
    #[inline]
    pub fn replace(&mut self, slot: usize, value: T) -> T {
        core::mem::replace(&mut self.buf[slot], value)
    }

    /// Returns the slots in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_ref()
    }
}
