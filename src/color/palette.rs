//! Color registry
//!
//! Every selectable color is a generator of hues: a flat calibrated hue, a
//! gradient or band split along the segment, or a hue that shifts over time.

use embassy_time::Instant;

use super::gradient::{from_hue, gradient, partition};
use super::hues::{self, MAX_HUE};
use crate::math8::map_range;
use crate::waveform::{sawtooth, triangle};

const SHIFT_RANGE: i32 = 100;
const GREEN_CYAN_SHIFT_FREQUENCY: f32 = 0.000_016;
const RAINBOW_SHIFT_FREQUENCY: f32 = 0.000_01;

/// Known color ids, in registry order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorId {
    Red,
    Vermillion,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Teal,
    Cyan,
    Blue,
    Violet,
    Purple,
    Pink,
    Magenta,
    VibrantRed,
    Rainbow,
    AllColors,
    RedGreenBlue,
    MagentaYellowCyan,
    RedToYellow,
    TealToPurple,
    TealCyanMagenta,
    BlueMagentaBlue,
    GreenCyanShift,
    RainbowShift,
}

impl ColorId {
    /// Registry order; the index of an entry is its persisted color index
    pub const ALL: [Self; 25] = [
        Self::Red,
        Self::Vermillion,
        Self::Orange,
        Self::Amber,
        Self::Yellow,
        Self::Lime,
        Self::Green,
        Self::Teal,
        Self::Cyan,
        Self::Blue,
        Self::Violet,
        Self::Purple,
        Self::Pink,
        Self::Magenta,
        Self::VibrantRed,
        Self::Rainbow,
        Self::AllColors,
        Self::RedGreenBlue,
        Self::MagentaYellowCyan,
        Self::RedToYellow,
        Self::TealToPurple,
        Self::TealCyanMagenta,
        Self::BlueMagentaBlue,
        Self::GreenCyanShift,
        Self::RainbowShift,
    ];

    /// Number of registered colors
    #[allow(clippy::cast_possible_truncation)]
    pub const COUNT: u8 = Self::ALL.len() as u8;

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Registry index of this color
    ///
    /// Falls back to 0 for an id missing from the registry.
    #[allow(clippy::cast_possible_truncation)]
    pub fn index(self) -> u8 {
        Self::ALL
            .iter()
            .position(|&id| id == self)
            .map_or(0, |index| index as u8)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Vermillion => "vermillion",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Lime => "lime",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Magenta => "magenta",
            Self::VibrantRed => "vibrant_red",
            Self::Rainbow => "rainbow",
            Self::AllColors => "all_colors",
            Self::RedGreenBlue => "red_green_blue",
            Self::MagentaYellowCyan => "magenta_yellow_cyan",
            Self::RedToYellow => "red_to_yellow",
            Self::TealToPurple => "teal_to_purple",
            Self::TealCyanMagenta => "teal_cyan_magenta",
            Self::BlueMagentaBlue => "blue_magenta_blue",
            Self::GreenCyanShift => "green_cyan_shift",
            Self::RainbowShift => "rainbow_shift",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }

    /// Base hue for position `pos` of a segment of `len` positions
    ///
    /// `drift` rotates flat and shifting hues; gradients and bands ignore it
    /// so their stops stay where they are.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn hue(self, pos: usize, len: usize, now: Instant, drift: i32) -> u16 {
        let flat = |hue: u16| from_hue(hue, drift);
        match self {
            Self::Red => flat(hues::RED),
            Self::Vermillion => flat(hues::VERMILLION),
            Self::Orange => flat(hues::ORANGE),
            Self::Amber => flat(hues::AMBER),
            Self::Yellow => flat(hues::YELLOW),
            Self::Lime => flat(hues::LIME),
            Self::Green => flat(hues::GREEN),
            Self::Teal => flat(hues::TEAL),
            Self::Cyan => flat(hues::CYAN),
            Self::Blue => flat(hues::BLUE),
            Self::Violet => flat(hues::VIOLET),
            Self::Purple => flat(hues::PURPLE),
            Self::Pink => flat(hues::PINK),
            Self::Magenta => flat(hues::MAGENTA),
            Self::VibrantRed => flat(hues::VIBRANT_RED),
            Self::Rainbow => gradient(pos, &[0, MAX_HUE], len),
            Self::AllColors => partition(pos, &hues::ALL, len),
            Self::RedGreenBlue => partition(pos, &[hues::RED, hues::GREEN, hues::BLUE], len),
            Self::MagentaYellowCyan => {
                partition(pos, &[hues::MAGENTA, hues::YELLOW, hues::CYAN], len)
            }
            Self::RedToYellow => gradient(pos, &[hues::RED, hues::YELLOW], len),
            Self::TealToPurple => gradient(pos, &[hues::TEAL, hues::PINK], len),
            Self::TealCyanMagenta => partition(pos, &[hues::TEAL, hues::CYAN, hues::MAGENTA], len),
            Self::BlueMagentaBlue => {
                gradient(pos, &[hues::BLUE, hues::MAGENTA, hues::BLUE], len)
            }
            Self::GreenCyanShift => {
                let amp = SHIFT_RANGE / 2;
                let t = millis(now);
                let level = triangle(amp, GREEN_CYAN_SHIFT_FREQUENCY, t, amp);
                let hue = map_range(
                    level,
                    0,
                    SHIFT_RANGE,
                    i32::from(hues::GREEN),
                    i32::from(hues::CYAN),
                );
                flat(hue.clamp(0, i32::from(MAX_HUE)) as u16)
            }
            Self::RainbowShift => {
                let amp = SHIFT_RANGE / 2;
                let level = sawtooth(amp, RAINBOW_SHIFT_FREQUENCY, millis(now), amp);
                let hue = map_range(level, 0, SHIFT_RANGE, 0, i32::from(MAX_HUE));
                flat(hue.clamp(0, i32::from(MAX_HUE)) as u16)
            }
        }
    }
}

impl Default for ColorId {
    fn default() -> Self {
        Self::ALL[0]
    }
}

#[inline]
#[allow(clippy::cast_possible_wrap)]
pub(crate) const fn millis(now: Instant) -> i64 {
    now.as_millis() as i64
}
