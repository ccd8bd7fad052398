//! Snake simulation
//!
//! Self-avoiding random walkers on the segment grid, where `x` is the
//! segment and `y` the offset within it. Every snake steps on its own timer
//! and its head and tail are faded over the step delay, so the discrete
//! walk reads as continuous motion.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Emission, FULL_BRIGHTNESS, Tick};
use crate::math8::progress_to;

/// Upper bound for simultaneously living snakes
pub const MAX_SNAKES: usize = 8;
pub const MIN_SNAKE_LENGTH: usize = 5;
pub const MAX_SNAKE_LENGTH: usize = 10;

const HUE_DRIFT: i32 = 3000;
const MIN_STEP_DELAY_MS: u64 = 250;
const MAX_STEP_DELAY_MS: u64 = 750;
const SEED_ATTEMPTS: usize = 32;
/// Tail brightness is taken from this level as the head fades in
const TAIL_FADE_FROM: u8 = 130;

/// A cell on the segment grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Result of a single snake step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The head moved into a free neighbour
    Moved,
    /// The snake was boxed in and has been replaced
    Respawned,
    /// Boxed in and no free cell left for a replacement, or no such snake
    Stuck,
}

#[derive(Debug, Clone)]
pub struct Snake {
    /// Body cells, head first
    pub points: Vec<Point, MAX_SNAKE_LENGTH>,
    pub hue_drift: i32,
    /// Time of the last step
    pub start_time: Instant,
    pub step_delay: Duration,
}

impl Snake {
    pub fn head(&self) -> Point {
        self.points[0]
    }

    /// Push a new head and drop the tail
    fn advance(&mut self, head: Point) {
        self.points.rotate_right(1);
        self.points[0] = head;
    }

    /// Brightness of body cell `index` at `now`
    fn brightness(&self, index: usize, now: Instant) -> u8 {
        let elapsed = now.saturating_duration_since(self.start_time);
        let ramp = progress_to(elapsed, self.step_delay, FULL_BRIGHTNESS);
        let last = self.points.len() - 1;
        if index == 0 {
            ramp
        } else if index == last && self.points[index] != self.points[index - 1] {
            TAIL_FADE_FROM - ramp
        } else {
            FULL_BRIGHTNESS
        }
    }
}

/// Fixed set of snakes on a `SEGMENTS` x `LEDS_PER_SEGMENT` grid
#[derive(Debug, Clone)]
pub struct SnakeSimulation<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize> {
    snakes: Vec<Snake, MAX_SNAKES>,
    count: usize,
}

impl<const SEGMENTS: usize, const LEDS_PER_SEGMENT: usize>
    SnakeSimulation<SEGMENTS, LEDS_PER_SEGMENT>
{
    /// Create a simulation of `count` snakes (at most `MAX_SNAKES`)
    ///
    /// Snakes are seeded lazily on the first frame.
    pub const fn new(count: usize) -> Self {
        Self {
            snakes: Vec::new(),
            count: if count > MAX_SNAKES { MAX_SNAKES } else { count },
        }
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn reset(&mut self) {
        self.snakes.clear();
    }

    /// Seed snakes until the configured count is reached
    pub fn populate<R: RngCore>(&mut self, rng: &mut R, now: Instant) {
        while self.snakes.len() < self.count {
            let Some(snake) = self.spawn(rng, now, None) else {
                break;
            };
            if self.snakes.push(snake).is_err() {
                break;
            }
        }
    }

    /// Does any snake other than `except` cover `point`
    pub fn is_occupied(&self, point: Point, except: Option<usize>) -> bool {
        self.snakes
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != except)
            .any(|(_, snake)| snake.points.contains(&point))
    }

    fn is_free(&self, point: Point, except: Option<usize>) -> bool {
        point.x < SEGMENTS && point.y < LEDS_PER_SEGMENT && !self.is_occupied(point, except)
    }

    /// Free cell for a new snake, trying random cells first
    fn seed_point<R: RngCore>(&self, rng: &mut R, except: Option<usize>) -> Option<Point> {
        if SEGMENTS == 0 || LEDS_PER_SEGMENT == 0 {
            return None;
        }
        for _ in 0..SEED_ATTEMPTS {
            let point = Point::new(
                rng.gen_range(0..SEGMENTS),
                rng.gen_range(0..LEDS_PER_SEGMENT),
            );
            if self.is_free(point, except) {
                return Some(point);
            }
        }
        (0..SEGMENTS)
            .flat_map(|x| (0..LEDS_PER_SEGMENT).map(move |y| Point::new(x, y)))
            .find(|&point| self.is_free(point, except))
    }

    /// Build a snake coiled up on a single free cell
    ///
    /// The snake at `except`, if any, is ignored for collisions since it is
    /// about to be replaced.
    fn spawn<R: RngCore>(&self, rng: &mut R, now: Instant, except: Option<usize>) -> Option<Snake> {
        let seed = self.seed_point(rng, except)?;
        let length = rng.gen_range(MIN_SNAKE_LENGTH..=MAX_SNAKE_LENGTH);
        let mut points = Vec::new();
        for _ in 0..length {
            points.push(seed).ok()?;
        }
        Some(Snake {
            points,
            hue_drift: rng.gen_range(-HUE_DRIFT..=HUE_DRIFT),
            start_time: now,
            step_delay: Duration::from_millis(
                rng.gen_range(MIN_STEP_DELAY_MS..MAX_STEP_DELAY_MS),
            ),
        })
    }

    /// Move snake `index` one cell
    ///
    /// Missing snakes are seeded first. Neighbours of the head are tried in
    /// random order; the first one that is on the grid and not covered by
    /// any snake, this one included, becomes the new head. A boxed-in snake
    /// is replaced by a fresh one. An index without a snake is `Stuck`.
    pub fn step<R: RngCore>(&mut self, index: usize, rng: &mut R, now: Instant) -> StepOutcome {
        self.populate(rng, now);
        let Some(head) = self.snakes.get(index).map(Snake::head) else {
            return StepOutcome::Stuck;
        };
        let mut directions = [0u8, 1, 2, 3];
        directions.shuffle(rng);

        let next = directions
            .iter()
            .filter_map(|&direction| neighbour(head, direction))
            .find(|&point| self.is_free(point, None));
        if let Some(point) = next {
            self.snakes[index].advance(point);
            return StepOutcome::Moved;
        }

        match self.spawn(rng, now, Some(index)) {
            Some(snake) => {
                #[cfg(feature = "esp32-log")]
                println!("[SnakeSimulation.step] snake {} boxed in, respawned", index);
                self.snakes[index] = snake;
                StepOutcome::Respawned
            }
            None => StepOutcome::Stuck,
        }
    }

    /// Draw every snake and step the ones whose delay has passed
    pub fn render<R: RngCore>(&mut self, tick: &mut Tick<'_, R>, emit: &mut impl FnMut(Emission)) {
        self.populate(tick.rng, tick.now);

        for index in 0..self.snakes.len() {
            let snake = &mut self.snakes[index];
            for (j, point) in snake.points.iter().enumerate() {
                emit(Emission {
                    segment: point.x,
                    offset: point.y,
                    hue_drift: snake.hue_drift,
                    brightness: snake.brightness(j, tick.now),
                });
            }

            if tick.now.saturating_duration_since(snake.start_time) > snake.step_delay {
                snake.start_time = tick.now;
                self.step(index, tick.rng, tick.now);
            }
        }
    }
}

/// Grid neighbour of `point` in one of four directions, if it exists
fn neighbour(point: Point, direction: u8) -> Option<Point> {
    match direction {
        0 => Some(Point::new(point.x + 1, point.y)),
        1 => point.x.checked_sub(1).map(|x| Point::new(x, point.y)),
        2 => Some(Point::new(point.x, point.y + 1)),
        _ => point.y.checked_sub(1).map(|y| Point::new(point.x, y)),
    }
}
