//! Modulation sources

/// Returns a triangle wave in range -1.0..1.0
#[allow(dead_code)]
pub fn triangle(step: usize, step_count: usize, periods: f64) -> f64 {
    let phase = (step as f64 / step_count as f64 * periods).fract();

    if phase < 0.25 {
        phase * 4.0
    } else if phase < 0.5 {
        (0.5 - phase) * 4.0
    } else if phase < 0.75 {
        -(phase - 0.5) * 4.0
    } else {
        -(1.0 - phase) * 4.0
    }
}

/// Returns a ramp in range 0.0..1.0
#[allow(dead_code)]
pub fn ramp_up(step: usize, step_count: usize) -> f64 {
    step as f64 / step_count as f64
}
