//! Letter Configuration and the Letter Transform Mapper.
//!
//! Each glyph of the name flies in along one axis from an off-screen offset.
//! How far out it starts and when it lands depend on its speed class; slower
//! letters start further away and land later. The anchor glyph never moves,
//! it zooms down from a huge scale instead.

use crate::easing::remap;

/// Progress at which letters begin to travel.
pub const TRAVEL_START: f64 = 0.1;
/// Anchor zoom window and its scale range.
pub const ANCHOR_WINDOW: (f64, f64) = (0.1, 0.8);
pub const ANCHOR_SCALE: (f64, f64) = (100.0, 1.0);
/// Lower bound applied after spring smoothing so overshoot never mirrors the glyph.
pub const ANCHOR_MIN_SCALE: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// +1 starts right/below the resting place, -1 left/above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    Slowest,
    Medium,
    Fast,
}

impl Speed {
    /// Multiplier on the base start distance.
    pub fn distance_factor(self) -> f64 {
        match self {
            Speed::Slowest => 1.8,
            Speed::Medium => 1.2,
            Speed::Fast => 0.7,
        }
    }

    /// Progress at which the letter reaches its resting place.
    pub fn arrival(self) -> f64 {
        match self {
            Speed::Slowest => 0.95,
            Speed::Medium => 0.85,
            Speed::Fast => 0.70,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterConfig {
    pub ch: char,
    pub axis: Axis,
    pub direction: Direction,
    pub speed: Speed,
    pub anchor: bool,
}

impl LetterConfig {
    pub const fn new(ch: char, axis: Axis, direction: Direction, speed: Speed) -> Self {
        Self { ch, axis, direction, speed, anchor: false }
    }

    pub const fn anchor(mut self) -> Self {
        self.anchor = true;
        self
    }

    /// Un-smoothed displacement `(x, y)` in px for the given Animation Progress.
    pub fn displacement(&self, progress: f64, base_distance: f64) -> (f64, f64) {
        if self.anchor {
            return (0.0, 0.0);
        }
        let start = base_distance * self.speed.distance_factor() * self.direction.sign();
        let d = remap(progress, (TRAVEL_START, self.speed.arrival()), (start, 0.0));
        match self.axis {
            Axis::X => (d, 0.0),
            Axis::Y => (0.0, d),
        }
    }
}

/// Un-smoothed anchor scale for the given Animation Progress.
pub fn anchor_scale(progress: f64) -> f64 {
    remap(progress, ANCHOR_WINDOW, ANCHOR_SCALE)
}

// Motion pattern cycled over names without a hand-written table.
const PATTERN: [(Axis, Direction, Speed); 7] = [
    (Axis::Y, Direction::Negative, Speed::Slowest),
    (Axis::X, Direction::Negative, Speed::Medium),
    (Axis::Y, Direction::Positive, Speed::Fast),
    (Axis::X, Direction::Positive, Speed::Fast),
    (Axis::Y, Direction::Negative, Speed::Medium),
    (Axis::X, Direction::Negative, Speed::Slowest),
    (Axis::Y, Direction::Positive, Speed::Medium),
];

/// Build a row for an arbitrary word. Whitespace is dropped and letters are
/// upper-cased; `anchor` marks one index as the zooming glyph.
pub fn row_for(word: &str, anchor: Option<usize>) -> Vec<LetterConfig> {
    word.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .enumerate()
        .map(|(i, ch)| {
            let (axis, direction, speed) = PATTERN[i % PATTERN.len()];
            let cfg = LetterConfig::new(ch, axis, direction, speed);
            if anchor == Some(i) { cfg.anchor() } else { cfg }
        })
        .collect()
}
