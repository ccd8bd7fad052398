use embassy_time::Duration;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linearly re-map `value` from one range onto another.
///
/// Integer arithmetic, truncating toward zero. An empty input range maps
/// everything onto `out_min`.
#[inline]
pub const fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    let scaled = (value as i64 - in_min as i64) * (out_max as i64 - out_min as i64)
        / (in_max as i64 - in_min as i64);
    #[allow(clippy::cast_possible_truncation)]
    {
        (scaled + out_min as i64) as i32
    }
}

/// Scale `elapsed / duration` onto `0..=max`, saturating at `max`.
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress_to(elapsed: Duration, duration: Duration, max: u8) -> u8 {
    if duration.as_millis() == 0 || elapsed.as_millis() >= duration.as_millis() {
        return max;
    }

    ((elapsed.as_millis() * max as u64) / duration.as_millis()) as u8
}
