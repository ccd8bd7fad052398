//! Particle field
//!
//! A fixed grid of particle slots, one row per segment. Moving particles
//! derive their offset from the time elapsed since they spawned, so motion
//! stays smooth no matter how irregular the frame rate is. Sparkles reuse
//! the same grid but stay put and glow through a single sine cycle.

use embassy_time::Instant;
use rand::{Rng, RngCore};

use super::{Emission, FULL_BRIGHTNESS, Tick, level};
use crate::color::millis;
use crate::waveform::sine;

/// Upper bound for particle slots per segment
pub const MAX_PARTICLE_SLOTS: usize = 10;

const MIN_VELOCITY: f32 = 0.000_1;
const MAX_VELOCITY: f32 = 0.01;
const MIN_FREQUENCY: f32 = 0.000_1;
const MAX_FREQUENCY: f32 = 0.001;
const HUE_DRIFT: i32 = 1500;

/// Time for a constant speed particle to cross a segment, in ms
const MOVING_CROSSING_MS: f64 = 500.0;
/// Time for an accelerating particle to cross a segment, in ms
const FALLING_CROSSING_MS: f64 = 1000.0;
/// Share of the average crossing speed an accelerating particle starts with
const FALLING_INITIAL_SPEED: f64 = 0.01;

/// A sparkle stays lit at least this long before it may retire, in ms
const SPARKLE_MIN_LIFETIME_MS: u64 = 100;
/// Random position draws per sparkle spawn before giving up for the frame
const SPAWN_ATTEMPTS: usize = 32;

/// Kinematics of a moving particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Displacement {
    /// Constant speed, top to bottom
    Moving,
    /// Constant speed, bottom to top
    Upward,
    /// Accelerating from near rest, top to bottom
    Falling,
    /// Accelerating from near rest, bottom to top
    Rising,
    /// Accelerating with the particle's own initial velocity, top to bottom
    FallingRandom,
    /// Accelerating with the particle's own initial velocity, bottom to top
    RisingRandom,
}

impl Displacement {
    /// Offset of a particle `elapsed` ms after it spawned on a segment of
    /// `len` positions
    ///
    /// The result may fall outside `0..len`, which retires the particle.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn position(self, elapsed: u64, len: usize, velocity: f32) -> i32 {
        let t = elapsed as f64;
        let count = len as f64;
        let last = len as i32 - 1;
        match self {
            Self::Moving => moving(t, count),
            Self::Upward => last.saturating_sub(moving(t, count)),
            Self::Falling => falling(t, count, nominal_velocity(count)),
            Self::Rising => last.saturating_sub(falling(t, count, nominal_velocity(count))),
            Self::FallingRandom => falling(t, count, f64::from(velocity)),
            Self::RisingRandom => last.saturating_sub(falling(t, count, f64::from(velocity))),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn moving(t: f64, count: f64) -> i32 {
    (count / MOVING_CROSSING_MS * t) as i32
}

fn nominal_velocity(count: f64) -> f64 {
    FALLING_INITIAL_SPEED * count / FALLING_CROSSING_MS
}

/// `d = v0 t + a t² / 2`, with the acceleration chosen so that a particle
/// starting at the nominal velocity covers `count` positions in
/// `FALLING_CROSSING_MS`
#[allow(clippy::cast_possible_truncation)]
fn falling(t: f64, count: f64, v0: f64) -> i32 {
    let acceleration = 2.0 * (count - nominal_velocity(count) * FALLING_CROSSING_MS)
        / (FALLING_CROSSING_MS * FALLING_CROSSING_MS);
    (v0 * t + 0.5 * acceleration * t * t) as i32
}

/// A particle or sparkle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Offset within the segment as of the last frame
    pub position: i32,
    pub start_time: Instant,
    /// Initial velocity in positions per ms
    pub velocity: f32,
    /// Glow frequency in cycles per ms
    pub frequency: f32,
    pub hue_drift: i32,
}

impl Particle {
    fn spawn<R: RngCore>(now: Instant, rng: &mut R) -> Self {
        Self {
            position: 0,
            start_time: now,
            velocity: rng.gen_range(MIN_VELOCITY..MAX_VELOCITY),
            frequency: rng.gen_range(MIN_FREQUENCY..MAX_FREQUENCY),
            hue_drift: rng.gen_range(-HUE_DRIFT..=HUE_DRIFT),
        }
    }

    fn elapsed(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.start_time).as_millis()
    }

    /// Brightness of a sparkle, starting and ending at a trough
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn sparkle_level(&self, elapsed: u64) -> u8 {
        let trough = libm::round(0.75 / f64::from(self.frequency)) as i64;
        let amp = i32::from(FULL_BRIGHTNESS);
        level(sine(amp, self.frequency, elapsed as i64 + trough, amp))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sparkle_period(&self) -> u64 {
        libm::ceil(1.0 / f64::from(self.frequency)) as u64
    }
}

/// State of one particle slot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParticleSlot {
    #[default]
    Idle,
    Active(Particle),
}

/// How particles of a pattern look and move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleStyle {
    /// Modulate brightness with each particle's own sine wave
    pub glow: bool,
    /// Shift each particle's hue by its own drift
    pub hue_drift: bool,
    pub displacement: Displacement,
}

/// Grid of particle slots, `SEGMENTS` rows of up to `MAX_PARTICLE_SLOTS`
#[derive(Debug, Clone)]
pub struct ParticleField<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> {
    slots: [[ParticleSlot; MAX_PARTICLE_SLOTS]; SEGMENTS],
    slot_count: usize,
    /// A requested spawn found its start position held
    spawn_deferred: bool,
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize>
    ParticleField<SEGMENTS, LEDS_PER_SEGMENT>
{
    /// Create a field using `slot_count` slots per segment
    ///
    /// The count is limited to `MAX_PARTICLE_SLOTS` and to the segment
    /// length, so sparkles always have a free position to spawn on.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: [[ParticleSlot::Idle; MAX_PARTICLE_SLOTS]; SEGMENTS],
            slot_count: slot_count.min(MAX_PARTICLE_SLOTS).min(LEDS_PER_SEGMENT),
            spawn_deferred: false,
        }
    }

    pub const fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn slot(&self, segment: usize, index: usize) -> ParticleSlot {
        self.slots[segment][index]
    }

    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .flat_map(|row| &row[..self.slot_count])
            .filter(|slot| matches!(slot, ParticleSlot::Active(_)))
            .count()
    }

    /// Release every slot
    pub fn reset(&mut self) {
        self.slots = [[ParticleSlot::Idle; MAX_PARTICLE_SLOTS]; SEGMENTS];
        self.spawn_deferred = false;
    }

    /// Is a spawn waiting for its start position to clear
    pub const fn spawn_deferred(&self) -> bool {
        self.spawn_deferred
    }

    /// Is `position` held by an active particle of `segment` other than
    /// slot `except`
    fn is_held(&self, segment: usize, position: i32, except: usize) -> bool {
        self.slots[segment][..self.slot_count]
            .iter()
            .enumerate()
            .any(|(index, slot)| {
                index != except
                    && matches!(slot, ParticleSlot::Active(p) if p.position == position)
            })
    }

    /// Move every active particle and spawn at most one new one
    ///
    /// The new particle goes to `active_segment` unless `suppress_spawn` is
    /// set. A spawn whose start position is held by a sibling stays pending
    /// and is retried on later frames, suppressed or not. Particles leaving
    /// the segment release their slot. A particle
    /// resting at offset 0 is only shown on the spawning segment, so idle
    /// starts don't pile up at the top of every bar.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn advance<R: RngCore>(
        &mut self,
        tick: &mut Tick<'_, R>,
        active_segment: usize,
        suppress_spawn: bool,
        style: ParticleStyle,
        emit: &mut impl FnMut(Emission),
    ) {
        let len = LEDS_PER_SEGMENT as i32;
        let mut spawn_pending = self.spawn_deferred || !suppress_spawn;
        let mut deferred = false;

        for segment in 0..SEGMENTS {
            for index in 0..self.slot_count {
                let particle = match self.slots[segment][index] {
                    ParticleSlot::Active(particle) => particle,
                    ParticleSlot::Idle => {
                        if !spawn_pending || segment != active_segment {
                            continue;
                        }
                        spawn_pending = false;

                        let particle = Particle::spawn(tick.now, tick.rng);
                        let start =
                            style
                                .displacement
                                .position(0, LEDS_PER_SEGMENT, particle.velocity);
                        if self.is_held(segment, start, index) {
                            deferred = true;
                            continue;
                        }
                        particle
                    }
                };

                let elapsed = particle.elapsed(tick.now);
                let position =
                    style
                        .displacement
                        .position(elapsed, LEDS_PER_SEGMENT, particle.velocity);
                if position < 0 || position >= len {
                    self.slots[segment][index] = ParticleSlot::Idle;
                    continue;
                }
                self.slots[segment][index] = ParticleSlot::Active(Particle {
                    position,
                    ..particle
                });

                if position == 0 && segment != active_segment {
                    continue;
                }

                let amp = i32::from(FULL_BRIGHTNESS);
                let brightness = if style.glow {
                    level(sine(amp, particle.frequency, millis(tick.now), amp))
                } else {
                    FULL_BRIGHTNESS
                };
                emit(Emission {
                    segment,
                    offset: position as usize,
                    hue_drift: if style.hue_drift { particle.hue_drift } else { 0 },
                    brightness,
                });
            }
        }
        self.spawn_deferred = deferred;
    }

    /// Run the sparkle animation
    ///
    /// Idle slots spawn a sparkle on a free random position; active
    /// sparkles glow through one sine cycle and then release their slot.
    #[allow(clippy::cast_sign_loss)]
    pub fn sparkle<R: RngCore>(
        &mut self,
        tick: &mut Tick<'_, R>,
        hue_drift: bool,
        emit: &mut impl FnMut(Emission),
    ) {
        for segment in 0..SEGMENTS {
            for index in 0..self.slot_count {
                let particle = match self.slots[segment][index] {
                    ParticleSlot::Idle => {
                        // A fresh sparkle sits at its trough, nothing to draw yet
                        if let Some(particle) = self.spawn_sparkle(segment, index, tick) {
                            self.slots[segment][index] = ParticleSlot::Active(particle);
                        }
                        continue;
                    }
                    ParticleSlot::Active(particle) => particle,
                };

                let elapsed = particle.elapsed(tick.now);
                let brightness = particle.sparkle_level(elapsed);
                let period = particle.sparkle_period();
                // Past the crest a dark sparkle is done; before it, slow
                // sparkles are still too dim to register
                let finished =
                    brightness == 0 && elapsed > SPARKLE_MIN_LIFETIME_MS.max(period / 2);
                if finished || elapsed >= period {
                    self.slots[segment][index] = ParticleSlot::Idle;
                    continue;
                }
                if brightness == 0 {
                    continue;
                }

                emit(Emission {
                    segment,
                    offset: particle.position as usize,
                    hue_drift: if hue_drift { particle.hue_drift } else { 0 },
                    brightness,
                });
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn spawn_sparkle<R: RngCore>(
        &self,
        segment: usize,
        index: usize,
        tick: &mut Tick<'_, R>,
    ) -> Option<Particle> {
        if LEDS_PER_SEGMENT == 0 {
            return None;
        }
        for _ in 0..SPAWN_ATTEMPTS {
            let position = tick.rng.gen_range(0..LEDS_PER_SEGMENT) as i32;
            if self.is_held(segment, position, index) {
                continue;
            }
            return Some(Particle {
                position,
                start_time: tick.now,
                velocity: 0.0,
                frequency: tick.rng.gen_range(MIN_FREQUENCY..MAX_FREQUENCY),
                hue_drift: tick.rng.gen_range(-HUE_DRIFT..=HUE_DRIFT),
            });
        }
        None
    }
}
