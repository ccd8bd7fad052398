//! Stateful entity subsystems
//!
//! Each subsystem owns a fixed set of short-lived entities and evolves them
//! from one frame to the next. Subsystems never touch the pixel driver: they
//! report lit logical positions through an emitter callback and leave color
//! and wiring to the renderer.

mod life;
mod particle;
mod snake;

use embassy_time::Instant;

pub use life::{GameOfLife, GENERATION_INTERVAL, RESEED_THRESHOLD};
pub use particle::{
    Displacement, MAX_PARTICLE_SLOTS, Particle, ParticleField, ParticleSlot, ParticleStyle,
};
pub use snake::{MAX_SNAKE_LENGTH, MAX_SNAKES, MIN_SNAKE_LENGTH, Point, Snake, SnakeSimulation, StepOutcome};

/// Brightness of a fully lit entity
pub const FULL_BRIGHTNESS: u8 = 125;

/// One lit logical position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    pub segment: usize,
    pub offset: usize,
    /// Per-entity hue variation
    pub hue_drift: i32,
    pub brightness: u8,
}

/// Per-frame inputs shared by all subsystems
pub struct Tick<'a, R> {
    pub now: Instant,
    pub rng: &'a mut R,
}

impl<'a, R> Tick<'a, R> {
    pub const fn new(now: Instant, rng: &'a mut R) -> Self {
        Self { now, rng }
    }
}

/// Convert a waveform sample into a brightness level
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) const fn level(value: i32) -> u8 {
    if value <= 0 {
        0
    } else if value >= u8::MAX as i32 {
        u8::MAX
    } else {
        value as u8
    }
}
