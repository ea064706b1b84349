//! Lowpass for the raw noise: a two-point moving sum.

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NoiseFilter {
    x: f64,
}

impl NoiseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
    }

    /// `y[n] = x[n] + x[n-1]`, a zero at Nyquist and a gain of 2 at DC.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = input + self.x;
        self.x = input;
        output
    }
}
