use crate::color::Rgb;

/// Gamma 2.6 lookup table for WS2812-class LEDs
#[rustfmt::skip]
const GAMMA8: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3,
    3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 5, 6, 6, 6, 6, 7,
    7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 10, 11, 11, 11, 12, 12,
    13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20,
    20, 21, 21, 22, 22, 23, 24, 24, 25, 25, 26, 27, 27, 28, 29, 29,
    30, 31, 31, 32, 33, 34, 34, 35, 36, 37, 38, 38, 39, 40, 41, 42,
    42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57,
    58, 59, 60, 61, 62, 63, 64, 65, 66, 68, 69, 70, 71, 72, 73, 75,
    76, 77, 78, 80, 81, 82, 84, 85, 86, 88, 89, 90, 92, 93, 94, 96,
    97, 99, 100, 102, 103, 105, 106, 108, 109, 111, 112, 114, 115, 117, 119, 120,
    122, 124, 125, 127, 129, 130, 132, 134, 136, 137, 139, 141, 143, 145, 146, 148,
    150, 152, 154, 156, 158, 160, 162, 164, 166, 168, 170, 172, 174, 176, 178, 180,
    182, 184, 186, 188, 191, 193, 195, 197, 199, 202, 204, 206, 209, 211, 213, 215,
    218, 220, 223, 225, 227, 230, 232, 235, 237, 240, 242, 245, 247, 250, 252, 255,
];

/// Steps in one channel ramp; six ramps make up the wheel
const HUE_SEXTANT: u32 = 255;
const HUE_WHEEL: u32 = HUE_SEXTANT * 6;

/// Gamma-correct a single channel
#[inline]
pub const fn gamma8(value: u8) -> u8 {
    GAMMA8[value as usize]
}

/// Gamma-correct all channels of a color
#[inline]
pub const fn gamma_correct(color: Rgb) -> Rgb {
    Rgb {
        r: gamma8(color.r),
        g: gamma8(color.g),
        b: gamma8(color.b),
    }
}

/// Convert a fully saturated, full value hue on the 16-bit wheel to RGB
///
/// The wheel is split into six ramps of 255 steps each; 0 is red, 65535
/// wraps back around to (almost) red.
#[allow(clippy::cast_possible_truncation)]
pub const fn hsv_to_rgb(hue: u16) -> Rgb {
    let hue = (hue as u32 * HUE_WHEEL + 32_768) >> 16;
    let (r, g, b) = if hue < HUE_SEXTANT * 2 {
        if hue < HUE_SEXTANT {
            (255, hue, 0)
        } else {
            (HUE_SEXTANT * 2 - hue, 255, 0)
        }
    } else if hue < HUE_SEXTANT * 4 {
        if hue < HUE_SEXTANT * 3 {
            (0, 255, hue - HUE_SEXTANT * 2)
        } else {
            (0, HUE_SEXTANT * 4 - hue, 255)
        }
    } else if hue < HUE_WHEEL {
        if hue < HUE_SEXTANT * 5 {
            (hue - HUE_SEXTANT * 4, 0, 255)
        } else {
            (255, 0, HUE_WHEEL - hue)
        }
    } else {
        (255, 0, 0)
    };

    Rgb {
        r: r as u8,
        g: g as u8,
        b: b as u8,
    }
}
