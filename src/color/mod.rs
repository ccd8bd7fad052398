mod gradient;
pub mod hues;
mod palette;
mod space;

use smart_leds::RGB8;

use crate::math8::scale8;

pub use gradient::{from_hue, gradient, partition};
pub use palette::ColorId;
pub(crate) use palette::millis;
pub use space::{gamma8, gamma_correct, hsv_to_rgb};

pub type Rgb = RGB8;

/// Rotate a hue by the global hue offset (one offset step is 1/256 turn)
#[inline]
pub const fn with_hue_offset(hue: u16, hue_offset: u8) -> u16 {
    hue.wrapping_add((hue_offset as u16) << 8)
}

/// Scale every channel of `color` by `value` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_rgb(color: Rgb, value: u8) -> Rgb {
    Rgb::new(
        scale8(color.r, value),
        scale8(color.g, value),
        scale8(color.b, value),
    )
}
