//! Runtime control state
//!
//! Pattern, color, hue offset and brightness are small bounded integers
//! stepped by button handlers. All operations are thin instantiations of
//! [`increment`] and [`decrement`].

use rand::{Rng, RngCore};

use crate::color::ColorId;
use crate::pattern::PatternId;

/// Brightness used when nothing was persisted yet
pub const DEFAULT_BRIGHTNESS: u8 = 55;
/// Brightness change per button press
pub const BRIGHTNESS_STEP: u8 = 5;
/// Hue offset change per button press
pub const HUE_STEP: u8 = 1;

/// What happens when a value is stepped past its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Stay at the bound
    Clamp,
    /// Jump to the given value
    Wrap(u8),
}

/// Step `value` up towards `max`
///
/// A value already at or above `max` is handled by the policy; otherwise the
/// result never passes `max`.
pub fn increment(value: u8, max: u8, step: u8, policy: BoundaryPolicy) -> u8 {
    if value >= max {
        return match policy {
            BoundaryPolicy::Clamp => max,
            BoundaryPolicy::Wrap(target) => target,
        };
    }
    value.saturating_add(step).min(max)
}

/// Step `value` down towards `min`
///
/// A value already at or below `min` is handled by the policy; otherwise the
/// result never passes `min`.
pub fn decrement(value: u8, min: u8, step: u8, policy: BoundaryPolicy) -> u8 {
    if value <= min {
        return match policy {
            BoundaryPolicy::Clamp => min,
            BoundaryPolicy::Wrap(target) => target,
        };
    }
    value.saturating_sub(step).max(min)
}

/// Selected pattern, color and output levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub pattern_index: u8,
    pub color_index: u8,
    pub hue_offset: u8,
    pub brightness: u8,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            pattern_index: 0,
            color_index: 0,
            hue_offset: 0,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl ControlState {
    /// Currently selected pattern
    pub fn pattern(&self) -> PatternId {
        PatternId::from_raw(self.pattern_index).unwrap_or_default()
    }

    /// Currently selected color
    pub fn color(&self) -> ColorId {
        ColorId::from_raw(self.color_index).unwrap_or_default()
    }

    pub fn next_pattern(&mut self) {
        self.pattern_index = increment(
            self.pattern_index,
            PatternId::COUNT - 1,
            1,
            BoundaryPolicy::Wrap(0),
        );
    }

    pub fn previous_pattern(&mut self) {
        self.pattern_index = decrement(
            self.pattern_index,
            0,
            1,
            BoundaryPolicy::Wrap(PatternId::COUNT - 1),
        );
    }

    pub fn next_color(&mut self) {
        self.color_index = increment(
            self.color_index,
            ColorId::COUNT - 1,
            1,
            BoundaryPolicy::Wrap(0),
        );
    }

    pub fn previous_color(&mut self) {
        self.color_index = decrement(
            self.color_index,
            0,
            1,
            BoundaryPolicy::Wrap(ColorId::COUNT - 1),
        );
    }

    pub fn increase_hue(&mut self) {
        self.hue_offset = increment(self.hue_offset, u8::MAX, HUE_STEP, BoundaryPolicy::Wrap(0));
    }

    pub fn decrease_hue(&mut self) {
        self.hue_offset = decrement(self.hue_offset, 0, HUE_STEP, BoundaryPolicy::Wrap(u8::MAX));
    }

    pub fn increase_brightness(&mut self) {
        self.brightness = increment(
            self.brightness,
            u8::MAX,
            BRIGHTNESS_STEP,
            BoundaryPolicy::Clamp,
        );
    }

    pub fn decrease_brightness(&mut self) {
        self.brightness = decrement(self.brightness, 0, BRIGHTNESS_STEP, BoundaryPolicy::Clamp);
    }

    /// Pick a pattern and a color uniformly at random
    pub fn randomize<R: RngCore>(&mut self, rng: &mut R) {
        self.pattern_index = rng.gen_range(0..PatternId::COUNT);
        self.color_index = rng.gen_range(0..ColorId::COUNT);
    }

    /// Select a pattern by id, falling back to the first entry
    pub fn set_pattern(&mut self, pattern: PatternId) {
        self.pattern_index = pattern.index();
    }

    /// Select a color by id, falling back to the first entry
    pub fn set_color(&mut self, color: ColorId) {
        self.color_index = color.index();
    }

    /// Select a pattern by registry index; unknown indices select 0
    pub fn set_pattern_index(&mut self, index: u8) {
        self.pattern_index = if index < PatternId::COUNT { index } else { 0 };
    }

    /// Select a color by registry index; unknown indices select 0
    pub fn set_color_index(&mut self, index: u8) {
        self.color_index = if index < ColorId::COUNT { index } else { 0 };
    }
}
