//! Frame buffer on top of an [`OutputDriver`]

use crate::color::{Rgb, scale_rgb};
use crate::{OutputDriver, PixelDriver};

/// Buffers a whole strip of `LED_COUNT` pixels and writes it out on present
pub struct FrameBuffer<D: OutputDriver, const LED_COUNT: usize> {
    output: D,
    frame: [Rgb; LED_COUNT],
}

impl<D: OutputDriver, const LED_COUNT: usize> FrameBuffer<D, LED_COUNT> {
    pub const fn new(output: D) -> Self {
        Self {
            output,
            frame: [Rgb::new(0, 0, 0); LED_COUNT],
        }
    }

    /// Pending frame as it will be presented
    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    pub fn output(&self) -> &D {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut D {
        &mut self.output
    }

    /// Take the output driver back
    pub fn into_output(self) -> D {
        self.output
    }
}

impl<D: OutputDriver, const LED_COUNT: usize> PixelDriver for FrameBuffer<D, LED_COUNT> {
    fn set_pixel(&mut self, index: usize, color: Rgb, brightness: u8) {
        // Indices past the strip are dropped
        if let Some(pixel) = self.frame.get_mut(index) {
            *pixel = scale_rgb(color, brightness);
        }
    }

    fn clear(&mut self) {
        self.frame.fill(Rgb::default());
    }

    fn present(&mut self) {
        self.output.write(&self.frame);
    }
}
