use embassy_time::Instant;
use rand::RngCore;

use super::Pattern;
use crate::color::millis;
use crate::entity::{Emission, FULL_BRIGHTNESS, Tick, level};
use crate::topology::clamp_offset;
use crate::waveform::{Waveform, reverse_sawtooth, sawtooth, sine};

const GLOW_FREQUENCY: f32 = 0.000_2;

const LINES: i32 = 3;
const LINE_FREQUENCY: f32 = 0.002;
/// Time shift between neighbouring segments of a wavy line, in ms
const LINE_DRIFT_MS: i64 = 10;

/// Motion of the lines of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// Top to bottom, then jump back
    Chase,
    /// Bottom to top, then jump back
    ReverseChase,
    /// Back and forth
    Bounce,
}

impl Stroke {
    fn waveform(self) -> Waveform {
        match self {
            Self::Chase => sawtooth,
            Self::ReverseChase => reverse_sawtooth,
            Self::Bounce => sine,
        }
    }
}

/// Stateless patterns computed straight from the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Every position lit
    Fill,
    /// Every position lit, breathing together
    Glow,
    /// Evenly spaced lines moving along every segment
    Lines {
        stroke: Stroke,
        /// Lag every segment a little behind the previous one
        wavy: bool,
    },
}

impl Sweep {
    fn fill<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize>(
        brightness: u8,
        emit: &mut impl FnMut(Emission),
    ) {
        for segment in 0..SEGMENTS {
            for offset in 0..LEDS_PER_SEGMENT {
                emit(Emission {
                    segment,
                    offset,
                    hue_drift: 0,
                    brightness,
                });
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn lines<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize>(
        stroke: Stroke,
        wavy: bool,
        now: Instant,
        emit: &mut impl FnMut(Emission),
    ) {
        let amplitude = (LEDS_PER_SEGMENT / 2) as i32;
        let line_spacing = (1.0 / LINE_FREQUENCY / LINES as f32) as i64;
        let segment_drift = if wavy { LINE_DRIFT_MS } else { 0 };
        let waveform = stroke.waveform();
        let now = millis(now);

        for line in 0..i64::from(LINES) {
            for segment in 0..SEGMENTS {
                let time = now + segment as i64 * segment_drift + line * line_spacing;
                let position = waveform(amplitude, LINE_FREQUENCY, time, amplitude);
                emit(Emission {
                    segment,
                    offset: clamp_offset(position, LEDS_PER_SEGMENT),
                    hue_drift: 0,
                    brightness: FULL_BRIGHTNESS,
                });
            }
        }
    }
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Pattern<SEGMENTS, LEDS_PER_SEGMENT>
    for Sweep
{
    fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission)) {
        if LEDS_PER_SEGMENT == 0 {
            return;
        }
        match *self {
            Self::Fill => Self::fill::<SEGMENTS, LEDS_PER_SEGMENT>(FULL_BRIGHTNESS, emit),
            Self::Glow => {
                let amp = i32::from(FULL_BRIGHTNESS);
                let brightness = level(sine(amp, GLOW_FREQUENCY, millis(tick.now), amp));
                Self::fill::<SEGMENTS, LEDS_PER_SEGMENT>(brightness, emit);
            }
            Self::Lines { stroke, wavy } => {
                Self::lines::<SEGMENTS, LEDS_PER_SEGMENT>(stroke, wavy, tick.now, emit);
            }
        }
    }
}
