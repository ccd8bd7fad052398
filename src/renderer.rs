use embassy_time::Instant;
use embedded_storage::{ReadStorage, Storage};
use rand::RngCore;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PixelDriver;
use crate::color::{scale_rgb, with_hue_offset};
use crate::control::ControlState;
use crate::entity::{Emission, Tick};
use crate::intent::{IntentEffects, IntentProcessor, IntentReceiver};
use crate::pattern::{PatternConfig, PatternId, PatternSlot};
use crate::storage;
use crate::topology::Topology;

/// Configuration for the renderer
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> {
    pub topology: Topology<SEGMENTS, LEDS_PER_SEGMENT>,
    /// Initial control state
    pub control: ControlState,
    pub patterns: PatternConfig,
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Default
    for RendererConfig<SEGMENTS, LEDS_PER_SEGMENT>
{
    fn default() -> Self {
        Self {
            topology: Topology::linear(),
            control: ControlState::default(),
            patterns: PatternConfig::default(),
        }
    }
}

/// Renderer - the main orchestrator
///
/// Owns the pixel driver, the random source and the state of the active
/// pattern. Call [`Renderer::render`] once per frame.
pub struct Renderer<
    'a,
    D: PixelDriver,
    R: RngCore,
    const SEGMENTS: usize,
    const LEDS_PER_SEGMENT: usize,
    const INTENT_CHANNEL_SIZE: usize,
> {
    // External dependencies and configuration
    intent_processor: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
    driver: D,
    rng: R,
    topology: Topology<SEGMENTS, LEDS_PER_SEGMENT>,
    patterns: PatternConfig,

    // Internal state
    control: ControlState,
    pattern: PatternId,
    slot: PatternSlot<SEGMENTS, LEDS_PER_SEGMENT>,
    powered: bool,
    is_off: bool,
    /// Control state changed since it was last loaded or saved
    unsaved: bool,
}

impl<
    'a,
    D: PixelDriver,
    R: RngCore,
    const SEGMENTS: usize,
    const LEDS_PER_SEGMENT: usize,
    const INTENT_CHANNEL_SIZE: usize,
> Renderer<'a, D, R, SEGMENTS, LEDS_PER_SEGMENT, INTENT_CHANNEL_SIZE>
{
    pub fn new(
        driver: D,
        rng: R,
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
        config: &RendererConfig<SEGMENTS, LEDS_PER_SEGMENT>,
    ) -> Self {
        let pattern = config.control.pattern();
        Self {
            intent_processor: IntentProcessor::new(intents),
            driver,
            rng,
            topology: config.topology,
            patterns: config.patterns,
            control: config.control,
            pattern,
            slot: pattern.to_slot(&config.patterns),
            powered: true,
            is_off: false,
            unsaved: false,
        }
    }

    /// Process one frame
    ///
    /// This is the main render loop step. Call this continuously.
    pub fn render(&mut self, now: Instant) {
        self.process_intents();
        if !self.powered {
            self.off();
            return;
        }
        self.sync_pattern();

        self.is_off = false;
        self.driver.clear();

        let Self {
            driver,
            rng,
            topology,
            control,
            slot,
            ..
        } = self;
        let color = control.color();
        let mut tick = Tick::new(now, rng);
        slot.render(&mut tick, &mut |emission: Emission| {
            let hue = color.hue(
                emission.offset,
                LEDS_PER_SEGMENT,
                now,
                emission.hue_drift,
            );
            let hue = with_hue_offset(hue, control.hue_offset);
            let rgb = driver.gamma_correct(scale_rgb(driver.hsv_to_rgb(hue), emission.brightness));
            let index = topology.resolve(emission.segment, emission.offset);
            driver.set_pixel(index, rgb, control.brightness);
        });

        self.driver.present();
    }

    /// Blank the output
    ///
    /// Clears and presents once; repeated calls while off do nothing.
    pub fn off(&mut self) {
        if self.is_off {
            return;
        }
        self.is_off = true;
        self.driver.clear();
        self.driver.present();
    }

    pub const fn is_off(&self) -> bool {
        self.is_off
    }

    /// Enable or disable rendering
    ///
    /// While powered down every frame is a call to [`Renderer::off`].
    pub fn set_power(&mut self, on: bool) {
        self.powered = on;
    }

    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    pub const fn control(&self) -> &ControlState {
        &self.control
    }

    /// Mutable control state
    ///
    /// A changed pattern takes effect on the next frame. The state counts as
    /// unsaved afterwards.
    pub fn control_mut(&mut self) -> &mut ControlState {
        self.unsaved = true;
        &mut self.control
    }

    /// Has the control state changed since it was last loaded or saved
    pub const fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Pattern currently running
    pub const fn pattern(&self) -> PatternId {
        self.pattern
    }

    pub const fn slot(&self) -> &PatternSlot<SEGMENTS, LEDS_PER_SEGMENT> {
        &self.slot
    }

    /// Pick a random pattern and color
    pub fn randomize(&mut self) {
        self.control.randomize(&mut self.rng);
        self.unsaved = true;
    }

    /// Replace the control state with settings read from `storage`
    pub fn load_settings<S: ReadStorage>(&mut self, storage: &mut S, address: u32) -> Result<(), S::Error> {
        self.control = storage::load_settings(storage, address)?;
        self.unsaved = false;
        Ok(())
    }

    /// Persist the control state to `storage`
    ///
    /// Returns whether bytes were written; either way the state is saved
    /// afterwards.
    pub fn save_settings<S: Storage>(&mut self, storage: &mut S, address: u32) -> Result<bool, S::Error> {
        let written = storage::save_settings(storage, address, &self.control)?;
        self.unsaved = false;
        Ok(written)
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Process pending intents from the channel (non-blocking)
    fn process_intents(&mut self) {
        let effects = self
            .intent_processor
            .process_pending(&mut self.control, &mut self.rng);

        self.apply_effects(&effects);
    }

    /// Apply side effects from intent processing
    fn apply_effects(&mut self, effects: &IntentEffects) {
        if !effects.has_effects() {
            return;
        }
        if let Some(on) = effects.power {
            self.powered = on;
        }
        if effects.control_changed {
            self.unsaved = true;
        }
    }

    /// Start the selected pattern if it is not the one running
    fn sync_pattern(&mut self) {
        let pattern = self.control.pattern();
        if pattern == self.pattern {
            return;
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[Renderer.sync_pattern] {} -> {}",
            self.pattern.as_str(),
            pattern.as_str()
        );
        self.pattern = pattern;
        self.slot = pattern.to_slot(&self.patterns);
    }
}
