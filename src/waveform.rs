//! Periodic waveforms used as position and brightness generators
//!
//! Every function maps `(amplitude, frequency, time, offset)` onto an
//! integer displacement. Time is in milliseconds and frequency in cycles
//! per millisecond. Results are truncated toward zero, so a wave with
//! `offset == amplitude` spans `0..=2 * amplitude`.

use core::f64::consts::PI;

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn phase(frequency: f32, time: i64) -> f64 {
    f64::from(frequency) * time as f64
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64, offset: i32) -> i32 {
    (value + f64::from(offset)) as i32
}

/// `amplitude * sin(2π f t) + offset`
pub fn sine(amplitude: i32, frequency: f32, time: i64, offset: i32) -> i32 {
    let value = f64::from(amplitude) * libm::sin(2.0 * PI * phase(frequency, time));
    truncate(value, offset)
}

/// Rising ramp from `offset - amplitude` to `offset + amplitude`.
///
/// Jumps back down once per period. At `t = 0` the cotangent is infinite,
/// which puts the wave at the bottom of its ramp.
pub fn sawtooth(amplitude: i32, frequency: f32, time: i64, offset: i32) -> i32 {
    let cot = 1.0 / libm::tan(PI * phase(frequency, time));
    let value = (-2.0 * f64::from(amplitude) / PI) * libm::atan(cot);
    truncate(value, offset)
}

/// Falling ramp, the mirror image of [`sawtooth`] around `amplitude`.
pub fn reverse_sawtooth(amplitude: i32, frequency: f32, time: i64, offset: i32) -> i32 {
    2 * amplitude - sawtooth(amplitude, frequency, time, offset)
}

/// Continuous zig-zag between `offset - amplitude` and `offset + amplitude`.
pub fn triangle(amplitude: i32, frequency: f32, time: i64, offset: i32) -> i32 {
    let value = (2.0 * f64::from(amplitude) / PI)
        * libm::asin(libm::sin(2.0 * PI * phase(frequency, time)));
    truncate(value, offset)
}

/// Signature shared by all waveforms, used to pick one at runtime.
pub type Waveform = fn(amplitude: i32, frequency: f32, time: i64, offset: i32) -> i32;
