//! Pattern system with compile-time known pattern variants
//!
//! All pattern state lives in an enum to avoid heap allocations. Switching
//! pattern builds a fresh slot, which drops whatever entities the previous
//! pattern had alive.

mod flow;
mod sweep;

use rand::RngCore;

pub use flow::{Flow, Sparkles, Spawner, wave_segment};
pub use sweep::{Stroke, Sweep};

use crate::entity::{
    Displacement, Emission, GameOfLife, MAX_PARTICLE_SLOTS, ParticleStyle, SnakeSimulation, Tick,
};

const PATTERN_NAME_FILL: &str = "fill";
const PATTERN_NAME_GLOW: &str = "glow";
const PATTERN_NAME_SPARKLES: &str = "sparkles";
const PATTERN_NAME_SPARKLES_DRIFT: &str = "sparkles_drift";
const PATTERN_NAME_CHASER: &str = "chaser";
const PATTERN_NAME_CHASER_WAVE: &str = "chaser_wave";
const PATTERN_NAME_REVERSE_CHASER: &str = "reverse_chaser";
const PATTERN_NAME_REVERSE_CHASER_WAVE: &str = "reverse_chaser_wave";
const PATTERN_NAME_BOUNCER: &str = "bouncer";
const PATTERN_NAME_BOUNCER_WAVE: &str = "bouncer_wave";
const PATTERN_NAME_WAVES: &str = "waves";
const PATTERN_NAME_FALLING_WAVES: &str = "falling_waves";
const PATTERN_NAME_FALLING_RAIN: &str = "falling_rain";
const PATTERN_NAME_FALLING_SPARKLES: &str = "falling_sparkles";
const PATTERN_NAME_FALLING_DRIFT_SPARKLES: &str = "falling_drift_sparkles";
const PATTERN_NAME_FALLING_DRIFT_SPARKLE_WAVES: &str = "falling_drift_sparkle_waves";
const PATTERN_NAME_RISING_DRIFT_SPARKLE_WAVES: &str = "rising_drift_sparkle_waves";
const PATTERN_NAME_RISING_WAVES: &str = "rising_waves";
const PATTERN_NAME_RISING_RAIN: &str = "rising_rain";
const PATTERN_NAME_SNAKES: &str = "snakes";
const PATTERN_NAME_LIFE: &str = "life";

/// Default number of particle slots per segment
pub const DEFAULT_PARTICLE_SLOTS: usize = MAX_PARTICLE_SLOTS;
/// Default number of simultaneously living snakes
pub const DEFAULT_SNAKE_COUNT: usize = 4;

pub trait Pattern<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> {
    /// Render a single frame, reporting every lit position through `emit`
    fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission));
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Pattern<SEGMENTS, LEDS_PER_SEGMENT>
    for SnakeSimulation<SEGMENTS, LEDS_PER_SEGMENT>
{
    fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission)) {
        SnakeSimulation::render(self, tick, emit);
    }
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Pattern<SEGMENTS, LEDS_PER_SEGMENT>
    for GameOfLife<SEGMENTS, LEDS_PER_SEGMENT>
{
    fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission)) {
        GameOfLife::render(self, tick, emit);
    }
}

/// Sizing of the entity subsystems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternConfig {
    /// Particle slots per segment, at most `MAX_PARTICLE_SLOTS`
    pub particle_slots: usize,
    /// Number of snakes, at most `MAX_SNAKES`
    pub snake_count: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            particle_slots: DEFAULT_PARTICLE_SLOTS,
            snake_count: DEFAULT_SNAKE_COUNT,
        }
    }
}

/// Known pattern ids, in registry order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PatternId {
    #[default]
    Fill,
    Glow,
    Sparkles,
    SparklesDrift,
    Chaser,
    ChaserWave,
    ReverseChaser,
    ReverseChaserWave,
    Bouncer,
    BouncerWave,
    Waves,
    FallingWaves,
    FallingRain,
    FallingSparkles,
    FallingDriftSparkles,
    FallingDriftSparkleWaves,
    RisingDriftSparkleWaves,
    RisingWaves,
    RisingRain,
    Snakes,
    Life,
}

impl PatternId {
    /// Registry order; the index of an entry is its persisted pattern index
    pub const ALL: [Self; 21] = [
        Self::Fill,
        Self::Glow,
        Self::Sparkles,
        Self::SparklesDrift,
        Self::Chaser,
        Self::ChaserWave,
        Self::ReverseChaser,
        Self::ReverseChaserWave,
        Self::Bouncer,
        Self::BouncerWave,
        Self::Waves,
        Self::FallingWaves,
        Self::FallingRain,
        Self::FallingSparkles,
        Self::FallingDriftSparkles,
        Self::FallingDriftSparkleWaves,
        Self::RisingDriftSparkleWaves,
        Self::RisingWaves,
        Self::RisingRain,
        Self::Snakes,
        Self::Life,
    ];

    /// Number of registered patterns
    #[allow(clippy::cast_possible_truncation)]
    pub const COUNT: u8 = Self::ALL.len() as u8;

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Registry index of this pattern
    #[allow(clippy::cast_possible_truncation)]
    pub fn index(self) -> u8 {
        Self::ALL
            .iter()
            .position(|&id| id == self)
            .map_or(0, |index| index as u8)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => PATTERN_NAME_FILL,
            Self::Glow => PATTERN_NAME_GLOW,
            Self::Sparkles => PATTERN_NAME_SPARKLES,
            Self::SparklesDrift => PATTERN_NAME_SPARKLES_DRIFT,
            Self::Chaser => PATTERN_NAME_CHASER,
            Self::ChaserWave => PATTERN_NAME_CHASER_WAVE,
            Self::ReverseChaser => PATTERN_NAME_REVERSE_CHASER,
            Self::ReverseChaserWave => PATTERN_NAME_REVERSE_CHASER_WAVE,
            Self::Bouncer => PATTERN_NAME_BOUNCER,
            Self::BouncerWave => PATTERN_NAME_BOUNCER_WAVE,
            Self::Waves => PATTERN_NAME_WAVES,
            Self::FallingWaves => PATTERN_NAME_FALLING_WAVES,
            Self::FallingRain => PATTERN_NAME_FALLING_RAIN,
            Self::FallingSparkles => PATTERN_NAME_FALLING_SPARKLES,
            Self::FallingDriftSparkles => PATTERN_NAME_FALLING_DRIFT_SPARKLES,
            Self::FallingDriftSparkleWaves => PATTERN_NAME_FALLING_DRIFT_SPARKLE_WAVES,
            Self::RisingDriftSparkleWaves => PATTERN_NAME_RISING_DRIFT_SPARKLE_WAVES,
            Self::RisingWaves => PATTERN_NAME_RISING_WAVES,
            Self::RisingRain => PATTERN_NAME_RISING_RAIN,
            Self::Snakes => PATTERN_NAME_SNAKES,
            Self::Life => PATTERN_NAME_LIFE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Some(match s {
            PATTERN_NAME_FILL => Self::Fill,
            PATTERN_NAME_GLOW => Self::Glow,
            PATTERN_NAME_SPARKLES => Self::Sparkles,
            PATTERN_NAME_SPARKLES_DRIFT => Self::SparklesDrift,
            PATTERN_NAME_CHASER => Self::Chaser,
            PATTERN_NAME_CHASER_WAVE => Self::ChaserWave,
            PATTERN_NAME_REVERSE_CHASER => Self::ReverseChaser,
            PATTERN_NAME_REVERSE_CHASER_WAVE => Self::ReverseChaserWave,
            PATTERN_NAME_BOUNCER => Self::Bouncer,
            PATTERN_NAME_BOUNCER_WAVE => Self::BouncerWave,
            PATTERN_NAME_WAVES => Self::Waves,
            PATTERN_NAME_FALLING_WAVES => Self::FallingWaves,
            PATTERN_NAME_FALLING_RAIN => Self::FallingRain,
            PATTERN_NAME_FALLING_SPARKLES => Self::FallingSparkles,
            PATTERN_NAME_FALLING_DRIFT_SPARKLES => Self::FallingDriftSparkles,
            PATTERN_NAME_FALLING_DRIFT_SPARKLE_WAVES => Self::FallingDriftSparkleWaves,
            PATTERN_NAME_RISING_DRIFT_SPARKLE_WAVES => Self::RisingDriftSparkleWaves,
            PATTERN_NAME_RISING_WAVES => Self::RisingWaves,
            PATTERN_NAME_RISING_RAIN => Self::RisingRain,
            PATTERN_NAME_SNAKES => Self::Snakes,
            PATTERN_NAME_LIFE => Self::Life,
            _ => return None,
        })
    }

    /// Build a fresh slot running this pattern
    pub fn to_slot<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize>(
        self,
        config: &PatternConfig,
    ) -> PatternSlot<SEGMENTS, LEDS_PER_SEGMENT> {
        let slots = config.particle_slots;
        let lines = |stroke: Stroke, wavy: bool| PatternSlot::Sweep(Sweep::Lines { stroke, wavy });
        let flow = |spawner: Spawner, glow: bool, hue_drift: bool, displacement: Displacement| {
            PatternSlot::Flow(Flow::new(
                slots,
                spawner,
                ParticleStyle {
                    glow,
                    hue_drift,
                    displacement,
                },
            ))
        };

        match self {
            Self::Fill => PatternSlot::Sweep(Sweep::Fill),
            Self::Glow => PatternSlot::Sweep(Sweep::Glow),
            Self::Sparkles => PatternSlot::Sparkles(Sparkles::new(slots, false)),
            Self::SparklesDrift => PatternSlot::Sparkles(Sparkles::new(slots, true)),
            Self::Chaser => lines(Stroke::Chase, false),
            Self::ChaserWave => lines(Stroke::Chase, true),
            Self::ReverseChaser => lines(Stroke::ReverseChase, false),
            Self::ReverseChaserWave => lines(Stroke::ReverseChase, true),
            Self::Bouncer => lines(Stroke::Bounce, false),
            Self::BouncerWave => lines(Stroke::Bounce, true),
            Self::Waves => flow(Spawner::wave(), false, false, Displacement::Moving),
            Self::FallingWaves => flow(Spawner::wave(), false, false, Displacement::Falling),
            Self::FallingRain => flow(Spawner::rain(), false, false, Displacement::FallingRandom),
            Self::FallingSparkles => {
                flow(Spawner::rain(), true, false, Displacement::FallingRandom)
            }
            Self::FallingDriftSparkles => {
                flow(Spawner::rain(), true, true, Displacement::FallingRandom)
            }
            Self::FallingDriftSparkleWaves => {
                flow(Spawner::wave(), true, true, Displacement::Falling)
            }
            Self::RisingDriftSparkleWaves => flow(Spawner::wave(), true, true, Displacement::Rising),
            Self::RisingWaves => flow(Spawner::wave(), false, false, Displacement::Upward),
            Self::RisingRain => flow(Spawner::rain(), false, false, Displacement::RisingRandom),
            Self::Snakes => PatternSlot::Snakes(SnakeSimulation::new(config.snake_count)),
            Self::Life => PatternSlot::Life(GameOfLife::new()),
        }
    }
}

/// Pattern slot - enum containing all possible pattern states
#[derive(Debug, Clone)]
pub enum PatternSlot<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> {
    /// Clock driven fills and lines
    Sweep(Sweep),
    /// Blinking fixed sparkles
    Sparkles(Sparkles<SEGMENTS, LEDS_PER_SEGMENT>),
    /// Moving particles
    Flow(Flow<SEGMENTS, LEDS_PER_SEGMENT>),
    Snakes(SnakeSimulation<SEGMENTS, LEDS_PER_SEGMENT>),
    Life(GameOfLife<SEGMENTS, LEDS_PER_SEGMENT>),
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Default
    for PatternSlot<SEGMENTS, LEDS_PER_SEGMENT>
{
    fn default() -> Self {
        Self::Sweep(Sweep::Fill)
    }
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> PatternSlot<SEGMENTS, LEDS_PER_SEGMENT> {
    /// Render the current pattern
    pub fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission)) {
        match self {
            Self::Sweep(pattern) => {
                Pattern::<SEGMENTS, LEDS_PER_SEGMENT>::render(pattern, tick, emit);
            }
            Self::Sparkles(pattern) => pattern.render(tick, emit),
            Self::Flow(pattern) => pattern.render(tick, emit),
            Self::Snakes(pattern) => pattern.render(tick, emit),
            Self::Life(pattern) => pattern.render(tick, emit),
        }
    }
}
