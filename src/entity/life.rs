//! Conway's Game of Life on the segment grid
//!
//! Cells beyond the grid edge count as dead; there is no wraparound.

use embassy_time::{Duration, Instant};
use rand::{Rng, RngCore};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Emission, FULL_BRIGHTNESS, Tick};

/// Minimum time between two generations
pub const GENERATION_INTERVAL: Duration = Duration::from_millis(100);
/// A board with this many live cells or fewer is reseeded
pub const RESEED_THRESHOLD: usize = 20;

/// Double-buffered life board, `x` is the segment and `y` the offset
#[derive(Debug, Clone)]
pub struct GameOfLife<const WIDTH: usize, const HEIGHT: usize> {
    current: [[bool; HEIGHT]; WIDTH],
    next: [[bool; HEIGHT]; WIDTH],
    last_generation: Option<Instant>,
}

impl<const WIDTH: usize, const HEIGHT: usize> Default for GameOfLife<WIDTH, HEIGHT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> GameOfLife<WIDTH, HEIGHT> {
    /// Create an empty board
    ///
    /// The board is seeded on the first rendered frame.
    pub const fn new() -> Self {
        Self {
            current: [[false; HEIGHT]; WIDTH],
            next: [[false; HEIGHT]; WIDTH],
            last_generation: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn cell(&self, x: usize, y: usize) -> bool {
        self.current[x][y]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) {
        self.current[x][y] = alive;
    }

    pub fn live_count(&self) -> usize {
        self.current.iter().flatten().filter(|&&alive| alive).count()
    }

    /// Fill the board with coin flips
    pub fn randomize<R: RngCore>(&mut self, rng: &mut R) {
        for cell in self.current.iter_mut().flatten() {
            *cell = rng.gen_bool(0.5);
        }
    }

    /// Number of live cells among the eight neighbours of `(x, y)`
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for nx in x.saturating_sub(1)..=(x + 1).min(WIDTH - 1) {
            for ny in y.saturating_sub(1)..=(y + 1).min(HEIGHT - 1) {
                if (nx, ny) != (x, y) && self.current[nx][ny] {
                    count += 1;
                }
            }
        }
        count
    }

    /// State of `(x, y)` in the next generation
    ///
    /// A live cell survives with two or three neighbours, a dead cell comes
    /// alive with exactly three.
    pub fn alive_next(&self, x: usize, y: usize) -> bool {
        matches!(
            (self.current[x][y], self.live_neighbors(x, y)),
            (true, 2 | 3) | (false, 3)
        )
    }

    /// Advance the board by one generation
    pub fn generation(&mut self) {
        for x in 0..WIDTH {
            for y in 0..HEIGHT {
                self.next[x][y] = self.alive_next(x, y);
            }
        }
        core::mem::swap(&mut self.current, &mut self.next);
    }

    /// Draw live cells, then advance and reseed on schedule
    pub fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission)) {
        if WIDTH == 0 || HEIGHT == 0 {
            return;
        }
        let Some(last_generation) = self.last_generation else {
            self.randomize(tick.rng);
            self.last_generation = Some(tick.now);
            self.draw(emit);
            return;
        };

        self.draw(emit);

        if tick.now.saturating_duration_since(last_generation) >= GENERATION_INTERVAL {
            self.last_generation = Some(tick.now);
            self.generation();
            if self.live_count() <= RESEED_THRESHOLD {
                #[cfg(feature = "esp32-log")]
                println!("[GameOfLife.render] board died out, reseeding");
                self.randomize(tick.rng);
            }
        }
    }

    fn draw(&self, emit: &mut impl FnMut(Emission)) {
        for (x, column) in self.current.iter().enumerate() {
            for (y, _) in column.iter().enumerate().filter(|(_, alive)| **alive) {
                emit(Emission {
                    segment: x,
                    offset: y,
                    hue_drift: 0,
                    brightness: FULL_BRIGHTNESS,
                });
            }
        }
    }
}
