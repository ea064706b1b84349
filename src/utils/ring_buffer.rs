//! Fixed-capacity circular sample buffer.

/// Circular buffer of `N` samples with a write head that wraps.
///
/// Reads are addressed either relative to the newest sample (`peek_back`) or
/// relative to an arbitrary position in the buffer (`read`), both wrapping
/// around the capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer<const N: usize> {
    data: [f64; N],
    write_pos: usize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    pub fn new() -> Self {
        Self {
            data: [0.0; N],
            write_pos: 0,
        }
    }

    /// Clears the contents and moves the write head to `write_pos`.
    pub fn reset(&mut self, write_pos: usize) {
        self.data.fill(0.0);
        self.write_pos = write_pos % N;
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Position the next pushed sample will be written to.
    #[inline]
    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    #[inline]
    pub fn push(&mut self, sample: f64) {
        self.data[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % N;
    }

    /// Returns the sample pushed `n` pushes ago (0 is the newest).
    #[inline]
    pub fn peek_back(&self, n: usize) -> f64 {
        self.data[(self.write_pos + N - 1 - n % N) % N]
    }

    /// Returns the sample at `position + offset`, wrapped into the buffer.
    #[inline]
    pub fn read(&self, position: usize, offset: isize) -> f64 {
        let index = (position as isize + offset).rem_euclid(N as isize) as usize;
        self.data[index]
    }
}
