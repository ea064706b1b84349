//! Fixed-point phase accumulator of the rate converter.

/// Bits selecting a point of the filter table between two input samples.
pub const L_BITS: u32 = 8;
pub const L_RANGE: usize = 1 << L_BITS;

/// Bits interpolating between two adjacent filter table points.
pub const M_BITS: u32 = 8;
pub const M_RANGE: usize = 1 << M_BITS;

pub const FRACTION_BITS: u32 = L_BITS + M_BITS;
pub const FRACTION_RANGE: u32 = 1 << FRACTION_BITS;
pub const FRACTION_MASK: u32 = FRACTION_RANGE - 1;

const M_MASK: u32 = (M_RANGE as u32) - 1;

/// Position of the next output sample, in input samples.
///
/// `integer` accumulates whole input samples until the converter consumes them;
/// `fraction` is a 16-bit phase whose upper 8 bits index the filter table and
/// whose lower 8 bits interpolate between table points.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeRegister {
    pub integer: u32,
    pub fraction: u32,
}

impl TimeRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter table point for the left wing (L field).
    #[inline]
    pub fn filter_index(&self) -> usize {
        (self.fraction >> M_BITS) as usize
    }

    /// Interpolation weight between filter table points (M field over its range).
    #[inline]
    pub fn interpolation(&self) -> f64 {
        (self.fraction & M_MASK) as f64 / M_RANGE as f64
    }

    /// Phase seen from the next input sample, used for the right wing.
    ///
    /// This is the one's complement of the fraction bits.
    #[inline]
    pub fn mirrored(&self) -> Self {
        Self {
            integer: self.integer,
            fraction: !self.fraction & FRACTION_MASK,
        }
    }

    /// Adds a 16.16 increment, carrying whole samples into `integer`.
    #[inline]
    pub fn advance(&mut self, increment: u32) {
        let total = self.fraction + increment;
        self.integer += total >> FRACTION_BITS;
        self.fraction = total & FRACTION_MASK;
    }

    /// Returns and clears the accumulated whole samples.
    #[inline]
    pub fn take_integer(&mut self) -> usize {
        core::mem::take(&mut self.integer) as usize
    }
}
