/// Wiring direction of a segment within the physical strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Offset 0 sits at `start_index`, later offsets follow it
    Ascending,
    /// Offset 0 sits at `start_index`, later offsets precede it
    Descending,
}

/// One wired section of the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start_index: u16,
    pub direction: Direction,
}

impl Segment {
    pub const fn ascending(start_index: u16) -> Self {
        Self {
            start_index,
            direction: Direction::Ascending,
        }
    }

    pub const fn descending(start_index: u16) -> Self {
        Self {
            start_index,
            direction: Direction::Descending,
        }
    }

    /// Can `len` offsets be laid out from `start_index` without running
    /// below the strip start
    pub const fn fits(self, len: usize) -> bool {
        match self.direction {
            Direction::Ascending => true,
            Direction::Descending => self.start_index as usize + 1 >= len,
        }
    }

    /// Physical index of a logical offset within this segment
    #[inline]
    pub const fn resolve(self, offset: usize) -> usize {
        let start = self.start_index as usize;
        match self.direction {
            Direction::Ascending => start + offset,
            Direction::Descending => start - offset,
        }
    }
}

/// Maps `(segment, offset)` coordinates onto physical strip indices
///
/// Pattern code always addresses offsets top-to-bottom; the topology hides
/// how each segment is actually wired.
#[derive(Debug, Clone, Copy)]
pub struct Topology<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> {
    segments: [Segment; SEGMENTS],
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> Topology<SEGMENTS, LEDS_PER_SEGMENT> {
    /// Total number of elements covered by the topology
    pub const LED_COUNT: usize = SEGMENTS * LEDS_PER_SEGMENT;

    pub const fn new(segments: [Segment; SEGMENTS]) -> Self {
        let mut i = 0;
        while i < SEGMENTS {
            debug_assert!(
                segments[i].fits(LEDS_PER_SEGMENT),
                "descending segment starts too close to the strip start"
            );
            i += 1;
        }
        Self { segments }
    }

    /// All segments wired one after another in the same direction
    #[allow(clippy::cast_possible_truncation)]
    pub fn linear() -> Self {
        let mut segments = [Segment::ascending(0); SEGMENTS];
        for (i, segment) in segments.iter_mut().enumerate() {
            *segment = Segment::ascending((i * LEDS_PER_SEGMENT) as u16);
        }
        Self { segments }
    }

    /// Vertical bars fed from the top of the first bar
    ///
    /// The data line runs down the first bar and back up the second, so even
    /// segments are entered at their top and odd segments at their bottom.
    /// Offsets still count from the top of every bar.
    #[allow(clippy::cast_possible_truncation)]
    pub fn serpentine() -> Self {
        let mut segments = [Segment::ascending(0); SEGMENTS];
        for (i, segment) in segments.iter_mut().enumerate() {
            let first = i * LEDS_PER_SEGMENT;
            *segment = if i % 2 == 0 {
                Segment::ascending(first as u16)
            } else {
                Segment::descending((first + LEDS_PER_SEGMENT - 1) as u16)
            };
        }
        Self { segments }
    }

    pub const fn segments(&self) -> &[Segment; SEGMENTS] {
        &self.segments
    }

    /// Resolve a logical position into a physical index
    ///
    /// `offset` must be below `LEDS_PER_SEGMENT`; callers clamp upstream.
    #[inline]
    pub fn resolve(&self, segment: usize, offset: usize) -> usize {
        debug_assert!(offset < LEDS_PER_SEGMENT, "offset out of segment");
        self.segments[segment].resolve(offset)
    }
}

/// Clamp a signed position onto a segment's valid offsets
#[allow(clippy::cast_sign_loss)]
pub const fn clamp_offset(position: i32, len: usize) -> usize {
    if position <= 0 || len == 0 {
        return 0;
    }
    let position = position as usize;
    if position >= len { len - 1 } else { position }
}
