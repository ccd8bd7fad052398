//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};
use rand::RngCore;

use crate::{PixelDriver, Renderer};

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// The scheduler tracks frame deadlines with drift correction, renders
/// through the wrapped [`Renderer`] and tells the caller how long to sleep.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<
    'a,
    D: PixelDriver,
    R: RngCore,
    const SEGMENTS: usize,
    const LEDS_PER_SEGMENT: usize,
    const INTENT_CHANNEL_SIZE: usize,
> {
    renderer: Renderer<'a, D, R, SEGMENTS, LEDS_PER_SEGMENT, INTENT_CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<
    'a,
    D: PixelDriver,
    R: RngCore,
    const SEGMENTS: usize,
    const LEDS_PER_SEGMENT: usize,
    const INTENT_CHANNEL_SIZE: usize,
> FrameScheduler<'a, D, R, SEGMENTS, LEDS_PER_SEGMENT, INTENT_CHANNEL_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` for frame timing.
    pub fn new(renderer: Renderer<'a, D, R, SEGMENTS, LEDS_PER_SEGMENT, INTENT_CHANNEL_SIZE>) -> Self {
        Self::with_frame_duration(renderer, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        renderer: Renderer<'a, D, R, SEGMENTS, LEDS_PER_SEGMENT, INTENT_CHANNEL_SIZE>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            renderer,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Falling more than two frames behind skips the backlog instead of
        // rendering a catch-up burst
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.renderer.render(now);

        self.next_frame += self.frame_duration;

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<'a, D, R, SEGMENTS, LEDS_PER_SEGMENT, INTENT_CHANNEL_SIZE> {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub fn renderer_mut(
        &mut self,
    ) -> &mut Renderer<'a, D, R, SEGMENTS, LEDS_PER_SEGMENT, INTENT_CHANNEL_SIZE> {
        &mut self.renderer
    }

    /// Take the renderer back
    pub fn into_renderer(self) -> Renderer<'a, D, R, SEGMENTS, LEDS_PER_SEGMENT, INTENT_CHANNEL_SIZE> {
        self.renderer
    }
}
