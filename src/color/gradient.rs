/// Rotate a hue around the wheel by a signed drift
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn from_hue(hue: u16, drift: i32) -> u16 {
    (hue as i32).wrapping_add(drift) as u16
}

/// Hue at `pos` of a gradient through `hues` along a segment of `len`
/// positions
///
/// The segment is split into `hues.len() - 1` equal intervals anchored at
/// the control hues. The first position gets `hues[0]`, the last one gets
/// the last control hue exactly.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn gradient(pos: usize, hues: &[u16], len: usize) -> u16 {
    let Some(&first) = hues.first() else {
        return 0;
    };
    let intervals = hues.len() - 1;
    let span = len.saturating_sub(1);
    if intervals == 0 || span == 0 {
        return first;
    }

    let pos = pos.min(span);
    let scaled = pos * intervals;
    let interval = (scaled / span).min(intervals - 1);
    let local = (scaled - interval * span) as i64;

    let from = i64::from(hues[interval]);
    let to = i64::from(hues[interval + 1]);
    (from + (to - from) * local / span as i64) as u16
}

/// Hue at `pos` when a segment of `len` positions is split into flat bands,
/// one per entry of `hues`
pub fn partition(pos: usize, hues: &[u16], len: usize) -> u16 {
    if hues.is_empty() || len == 0 {
        return 0;
    }
    let band = (pos * hues.len() / len).min(hues.len() - 1);
    hues[band]
}
