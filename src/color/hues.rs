//! Calibrated hue table
//!
//! Hues on the 16-bit wheel picked by eye on WS2812 bars: the stock wheel
//! shows little variation from red to yellow and runs too blue around blue,
//! so the table spreads the warm hues and pulls the blues back.

/// Top of the 16-bit hue wheel
pub const MAX_HUE: u16 = 65535;

pub const RED: u16 = 0;
pub const VERMILLION: u16 = 4095;
pub const ORANGE: u16 = 5461;
pub const AMBER: u16 = 8191;
pub const YELLOW: u16 = 10922;
pub const LIME: u16 = 16383;
pub const GREEN: u16 = 21845;
pub const TEAL: u16 = 27306;
pub const CYAN: u16 = 32767;
pub const BLUE: u16 = 43690;
pub const VIOLET: u16 = 49151;
pub const PURPLE: u16 = 51881;
pub const PINK: u16 = 57343;
pub const MAGENTA: u16 = 60073;
pub const VIBRANT_RED: u16 = 62804;

/// All named hues in wheel order
pub const ALL: [u16; 15] = [
    RED,
    VERMILLION,
    ORANGE,
    AMBER,
    YELLOW,
    LIME,
    GREEN,
    TEAL,
    CYAN,
    BLUE,
    VIOLET,
    PURPLE,
    PINK,
    MAGENTA,
    VIBRANT_RED,
];
