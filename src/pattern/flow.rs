use embassy_time::Instant;
use rand::{Rng, RngCore};

use super::Pattern;
use crate::color::millis;
use crate::entity::{Emission, ParticleField, ParticleStyle, Tick};
use crate::topology::clamp_offset;
use crate::waveform::triangle;

const WAVE_FREQUENCY: f32 = 0.004;
const MIN_RAIN_INTERVAL_MS: u64 = 50;
const MAX_RAIN_INTERVAL_MS: u64 = 150;

/// Segment a wave front passes at `now`
///
/// The front sweeps back and forth across all segments along a triangle
/// wave, so neighbouring spawns form a continuous diagonal.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn wave_segment(now: Instant, segments: usize) -> usize {
    let amplitude = (segments / 2) as i32;
    let position = triangle(amplitude, WAVE_FREQUENCY, millis(now), amplitude);
    clamp_offset(position, segments)
}

/// Decides where and when a particle pattern spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawner {
    /// Spawn whenever the wave front enters another segment
    Wave { previous: Option<usize> },
    /// Spawn on a random segment every 50 to 150 ms
    Rain { last_spawn: Option<Instant> },
}

impl Spawner {
    pub const fn wave() -> Self {
        Self::Wave { previous: None }
    }

    pub const fn rain() -> Self {
        Self::Rain { last_spawn: None }
    }

    /// Active segment for this frame and whether a spawn is suppressed
    pub fn schedule<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, segments: usize) -> (usize, bool) {
        match self {
            Self::Wave { previous } => {
                let segment = wave_segment(tick.now, segments);
                let suppress = *previous == Some(segment);
                *previous = Some(segment);
                (segment, suppress)
            }
            Self::Rain { last_spawn } => {
                let segment = tick.rng.gen_range(0..segments);
                let interval = tick
                    .rng
                    .gen_range(MIN_RAIN_INTERVAL_MS..MAX_RAIN_INTERVAL_MS);
                let due = last_spawn.is_none_or(|last| {
                    tick.now.saturating_duration_since(last).as_millis() > interval
                });
                if due {
                    *last_spawn = Some(tick.now);
                }
                (segment, !due)
            }
        }
    }
}

/// Particles streaming along the segments
#[derive(Debug, Clone)]
pub struct Flow<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> {
    pub field: ParticleField<SEGMENTS, LEDS_PER_SEGMENT>,
    pub spawner: Spawner,
    pub style: ParticleStyle,
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Flow<SEGMENTS, LEDS_PER_SEGMENT> {
    pub fn new(slot_count: usize, spawner: Spawner, style: ParticleStyle) -> Self {
        Self {
            field: ParticleField::new(slot_count),
            spawner,
            style,
        }
    }
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Pattern<SEGMENTS, LEDS_PER_SEGMENT>
    for Flow<SEGMENTS, LEDS_PER_SEGMENT>
{
    fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission)) {
        if SEGMENTS == 0 || LEDS_PER_SEGMENT == 0 {
            return;
        }
        let (segment, suppress) = self.spawner.schedule(tick, SEGMENTS);
        self.field.advance(tick, segment, suppress, self.style, emit);
    }
}

/// Sparkles blinking at random fixed positions
#[derive(Debug, Clone)]
pub struct Sparkles<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> {
    pub field: ParticleField<SEGMENTS, LEDS_PER_SEGMENT>,
    pub hue_drift: bool,
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Sparkles<SEGMENTS, LEDS_PER_SEGMENT> {
    pub fn new(slot_count: usize, hue_drift: bool) -> Self {
        Self {
            field: ParticleField::new(slot_count),
            hue_drift,
        }
    }
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Pattern<SEGMENTS, LEDS_PER_SEGMENT>
    for Sparkles<SEGMENTS, LEDS_PER_SEGMENT>
{
    fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission)) {
        self.field.sparkle(tick, self.hue_drift, emit);
    }
}
