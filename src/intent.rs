//! Intent processing module
//!
//! Button handlers and other producers queue control intents; the renderer
//! drains them at the start of every frame and applies them to its
//! [`ControlState`].

use rand::RngCore;

use crate::channel::{Channel, Receiver, Sender};
use crate::color::ColorId;
use crate::control::ControlState;
use crate::pattern::PatternId;

/// A user intent to change the control state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlIntent {
    NextPattern,
    PreviousPattern,
    NextColor,
    PreviousColor,
    IncreaseHue,
    DecreaseHue,
    IncreaseBrightness,
    DecreaseBrightness,
    /// Pick a random pattern and color
    Randomize,
    SetPattern(PatternId),
    SetColor(ColorId),
    SetHueOffset(u8),
    SetBrightness(u8),
    /// Turn the output on or off
    Power(bool),
}

/// Side effects from processing intents that the renderer should apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentEffects {
    /// Requested power state, last one wins
    pub power: Option<bool>,
    /// Control state differs from what it was before processing
    pub control_changed: bool,
}

impl IntentEffects {
    /// Check if any effects need to be applied
    pub const fn has_effects(&self) -> bool {
        self.power.is_some() || self.control_changed
    }
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, ControlIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, ControlIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<ControlIntent, SIZE>;

/// Applies queued intents to a [`ControlState`]
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    /// Create a new intent processor
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Process all pending intents from the channel (non-blocking)
    ///
    /// Drains all queued intents in order, applies control changes directly
    /// and returns the side effects for the renderer to apply.
    pub fn process_pending<R: RngCore>(
        &mut self,
        control: &mut ControlState,
        rng: &mut R,
    ) -> IntentEffects {
        let before = *control;
        let mut effects = IntentEffects::default();

        while let Ok(intent) = self.intents.try_receive() {
            if let ControlIntent::Power(on) = intent {
                effects.power = Some(on);
            } else {
                apply(control, intent, rng);
            }
        }

        effects.control_changed = *control != before;
        effects
    }
}

/// Apply a single control intent
///
/// Power intents carry no control state and are ignored here.
pub fn apply<R: RngCore>(control: &mut ControlState, intent: ControlIntent, rng: &mut R) {
    match intent {
        ControlIntent::NextPattern => control.next_pattern(),
        ControlIntent::PreviousPattern => control.previous_pattern(),
        ControlIntent::NextColor => control.next_color(),
        ControlIntent::PreviousColor => control.previous_color(),
        ControlIntent::IncreaseHue => control.increase_hue(),
        ControlIntent::DecreaseHue => control.decrease_hue(),
        ControlIntent::IncreaseBrightness => control.increase_brightness(),
        ControlIntent::DecreaseBrightness => control.decrease_brightness(),
        ControlIntent::Randomize => control.randomize(rng),
        ControlIntent::SetPattern(pattern) => control.set_pattern(pattern),
        ControlIntent::SetColor(color) => control.set_color(color),
        ControlIntent::SetHueOffset(hue_offset) => control.hue_offset = hue_offset,
        ControlIntent::SetBrightness(brightness) => control.brightness = brightness,
        ControlIntent::Power(_) => {}
    }
}
