//! Spring-smoothed style values derived from Animation Progress.
//!
//! One progress scalar feeds a fixed set of remaps; every remapped target is
//! chased by its own spring so the page keeps easing after the controller
//! stops writing. The scene owns no DOM, [`Scene::tick`] only updates numbers
//! and the binding copies them into inline styles.

use std::f64::consts::TAU;

use crate::config::EggConfig;
use crate::easing::{Spring, remap};
use crate::letters::{self, ANCHOR_MIN_SCALE, LetterConfig};
use crate::machine::Snapshot;

const BACKDROP_WINDOW: (f64, f64) = (0.4, 0.7);
const LETTER_OPACITY_WINDOW: (f64, f64) = (0.1, 0.75);
const BLUR_WINDOW: (f64, f64) = (0.1, 0.85);
const BLUR_RANGE: (f64, f64) = (25.0, 0.0);
const CONTENT_WINDOW: (f64, f64) = (0.0, 0.15);

struct LetterMotion {
    config: LetterConfig,
    x: Spring,
    y: Spring,
}

/// Current transform of one glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterStyle {
    pub ch: char,
    pub x: f64,
    pub y: f64,
    /// Only the anchor ever differs from 1.
    pub scale: f64,
    pub anchor: bool,
}

/// Everything the binding writes to the page for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneStyle {
    pub backdrop_opacity: f64,
    pub letter_opacity: f64,
    pub letter_blur_px: f64,
    pub content_opacity: f64,
    pub rows: Vec<Vec<LetterStyle>>,
    pub loader: LoaderStyle,
    pub blocks_touch: bool,
    pub content_interactive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoaderStyle {
    pub visible: bool,
    pub circumference: f64,
    /// `stroke-dashoffset`: full circumference when empty, 0 when full.
    pub dash_offset: f64,
}

impl LoaderStyle {
    pub fn new(radius: f64, hold: f64, visible: bool) -> Self {
        let circumference = TAU * radius;
        Self { visible, circumference, dash_offset: circumference * (1.0 - hold.clamp(0.0, 1.0)) }
    }
}

pub struct Scene {
    rows: Vec<Vec<LetterMotion>>,
    anchor_scale: Spring,
    backdrop: Spring,
    letter_opacity: Spring,
    blur: Spring,
    content: Spring,
    base_distance: f64,
    loader_radius: f64,
    config: EggConfig,
}

impl Scene {
    /// Build a scene resting at progress 0.
    pub fn new(config: &EggConfig, rows: Vec<Vec<LetterConfig>>, mobile: bool) -> Self {
        let base_distance = config.base_distance(mobile);
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cfg| {
                        let (x, y) = cfg.displacement(0.0, base_distance);
                        LetterMotion {
                            config: cfg,
                            x: Spring::new(config.letter_spring, x),
                            y: Spring::new(config.letter_spring, y),
                        }
                    })
                    .collect()
            })
            .collect();
        Self {
            rows,
            anchor_scale: Spring::new(config.anchor_spring, letters::anchor_scale(0.0)),
            backdrop: Spring::new(config.backdrop_spring, remap(0.0, BACKDROP_WINDOW, (0.0, 1.0))),
            letter_opacity: Spring::new(config.letter_spring, remap(0.0, LETTER_OPACITY_WINDOW, (0.0, 1.0))),
            blur: Spring::new(config.blur_spring, remap(0.0, BLUR_WINDOW, BLUR_RANGE)),
            content: Spring::new(config.content_spring, remap(0.0, CONTENT_WINDOW, (1.0, 0.0))),
            base_distance,
            loader_radius: config.loader_radius,
            config: config.clone(),
        }
    }

    /// Switch start distances after a resize across the mobile breakpoint.
    pub fn set_mobile(&mut self, mobile: bool) {
        self.base_distance = self.config.base_distance(mobile);
    }

    /// Retarget every spring at `progress` and advance them by `dt_ms`.
    pub fn tick(&mut self, progress: f64, dt_ms: f64) {
        let p = progress.clamp(0.0, 1.0);
        for letter in self.rows.iter_mut().flatten() {
            let (x, y) = letter.config.displacement(p, self.base_distance);
            letter.x.set_target(x);
            letter.y.set_target(y);
            letter.x.step(dt_ms);
            letter.y.step(dt_ms);
        }
        let targets = [
            (&mut self.anchor_scale, letters::anchor_scale(p)),
            (&mut self.backdrop, remap(p, BACKDROP_WINDOW, (0.0, 1.0))),
            (&mut self.letter_opacity, remap(p, LETTER_OPACITY_WINDOW, (0.0, 1.0))),
            (&mut self.blur, remap(p, BLUR_WINDOW, BLUR_RANGE)),
            (&mut self.content, remap(p, CONTENT_WINDOW, (1.0, 0.0))),
        ];
        for (spring, target) in targets {
            spring.set_target(target);
            spring.step(dt_ms);
        }
    }

    /// True once nothing will move without a new progress value.
    pub fn is_settled(&self) -> bool {
        self.rows.iter().flatten().all(|l| l.x.is_settled() && l.y.is_settled())
            && [&self.anchor_scale, &self.backdrop, &self.letter_opacity, &self.blur, &self.content]
                .iter()
                .all(|s| s.is_settled())
    }

    pub fn anchor_scale(&self) -> f64 {
        self.anchor_scale.value().max(ANCHOR_MIN_SCALE)
    }

    pub fn style(&self, snap: &Snapshot) -> SceneStyle {
        let anchor_scale = self.anchor_scale();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|l| LetterStyle {
                        ch: l.config.ch,
                        x: if l.config.anchor { 0.0 } else { l.x.value() },
                        y: if l.config.anchor { 0.0 } else { l.y.value() },
                        scale: if l.config.anchor { anchor_scale } else { 1.0 },
                        anchor: l.config.anchor,
                    })
                    .collect()
            })
            .collect();
        SceneStyle {
            backdrop_opacity: self.backdrop.value().clamp(0.0, 1.0),
            letter_opacity: self.letter_opacity.value().clamp(0.0, 1.0),
            letter_blur_px: self.blur.value().max(0.0),
            content_opacity: self.content.value().clamp(0.0, 1.0),
            rows,
            loader: LoaderStyle::new(self.loader_radius, snap.hold, snap.loader_visible()),
            blocks_touch: snap.blocks_touch(),
            content_interactive: snap.content_interactive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::{Axis, Direction, Speed};
    use crate::machine::Controller;

    fn rows() -> Vec<Vec<LetterConfig>> {
        vec![vec![
            LetterConfig::new('A', Axis::X, Direction::Negative, Speed::Medium),
            LetterConfig::new('T', Axis::X, Direction::Positive, Speed::Fast).anchor(),
        ]]
    }

    fn run(scene: &mut Scene, progress: f64, frames: usize) {
        for _ in 0..frames {
            scene.tick(progress, 16.0);
        }
    }

    #[test]
    fn starts_at_rest_with_contact_visible() {
        let scene = Scene::new(&EggConfig::default(), rows(), false);
        assert!(scene.is_settled());
        let style = scene.style(&Controller::default().snapshot());
        assert_eq!(style.content_opacity, 1.0);
        assert_eq!(style.letter_opacity, 0.0);
        assert_eq!(style.letter_blur_px, 25.0);
        assert_eq!(style.rows[0][0].x, -960.0);
        assert_eq!(style.rows[0][1].scale, 100.0);
        assert!(!style.loader.visible);
        assert!(style.content_interactive);
    }

    #[test]
    fn full_progress_assembles_the_name() {
        let mut scene = Scene::new(&EggConfig::default(), rows(), false);
        run(&mut scene, 1.0, 1500);
        assert!(scene.is_settled());
        let style = scene.style(&Controller::default().snapshot());
        assert_eq!(style.rows[0][0].x, 0.0);
        assert_eq!(style.rows[0][1].scale, 1.0);
        assert_eq!(style.backdrop_opacity, 1.0);
        assert_eq!(style.content_opacity, 0.0);
        assert_eq!(style.letter_blur_px, 0.0);
    }

    #[test]
    fn anchor_scale_never_drops_below_floor() {
        let mut scene = Scene::new(&EggConfig::default(), rows(), false);
        for _ in 0..600 {
            scene.tick(1.0, 16.0);
            assert!(scene.anchor_scale() >= ANCHOR_MIN_SCALE);
        }
    }

    #[test]
    fn mobile_halves_start_distance() {
        let mut scene = Scene::new(&EggConfig::default(), rows(), true);
        let style = scene.style(&Controller::default().snapshot());
        assert_eq!(style.rows[0][0].x, -480.0);
        scene.set_mobile(false);
        scene.tick(0.0, 16.0);
        assert!(!scene.is_settled());
    }

    #[test]
    fn loader_offset_tracks_hold() {
        let l = LoaderStyle::new(18.0, 0.25, true);
        assert!((l.circumference - 36.0 * std::f64::consts::PI).abs() < 1e-12);
        assert!((l.dash_offset - l.circumference * 0.75).abs() < 1e-12);
        assert_eq!(LoaderStyle::new(18.0, 1.0, true).dash_offset, 0.0);
    }
}
