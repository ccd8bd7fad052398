#![no_std]

pub mod channel;
pub mod color;
pub mod control;
pub mod entity;
pub mod frame;
pub mod frame_scheduler;
pub mod intent;
pub mod math8;
pub mod pattern;
pub mod renderer;
pub mod storage;
pub mod topology;
pub mod waveform;

pub use control::{BoundaryPolicy, ControlState, decrement, increment};
pub use intent::{ControlIntent, IntentChannel, IntentProcessor, IntentReceiver, IntentSender};
pub use renderer::{Renderer, RendererConfig};
pub use frame::FrameBuffer;
pub use frame_scheduler::FrameScheduler;
pub use pattern::{PatternConfig, PatternId, PatternSlot};
pub use storage::{SETTINGS_LEN, Settings, load_settings, save_settings};
pub use topology::{Direction, Segment, Topology};

pub use color::{ColorId, Rgb};
pub use math8::scale8;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// [`FrameBuffer`] adapts it to a [`PixelDriver`].
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Per-pixel LED driver the renderer draws into
///
/// Pixels are addressed by physical index. Nothing reaches the hardware
/// before [`PixelDriver::present`].
pub trait PixelDriver {
    /// Set one pixel, scaled by `brightness`
    fn set_pixel(&mut self, index: usize, color: Rgb, brightness: u8);

    /// Turn every pixel off
    fn clear(&mut self);

    /// Push the pending frame out to the LEDs
    fn present(&mut self);

    /// Convert a 16-bit hue to a fully saturated color
    fn hsv_to_rgb(&self, hue: u16) -> Rgb {
        color::hsv_to_rgb(hue)
    }

    /// Apply the output gamma curve
    fn gamma_correct(&self, color: Rgb) -> Rgb {
        color::gamma_correct(color)
    }
}
