//! Timing, threshold and geometry constants for the overscroll easter egg.
//!
//! Every number the controller and the scene read lives in [`EggConfig`]. The
//! defaults reproduce the portfolio outro screen; a page may override any
//! subset through a JSON object (feature `serde_json`).

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Spring parameters (unit mass). `damping >= 2 * sqrt(stiffness)` never overshoots.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self { stiffness, damping }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EggConfig {
    // --- Gesture detector ---
    /// Continuous overscroll needed before the reveal fires.
    pub hold_duration_ms: f64,
    /// No qualifying input for this long cancels the hold.
    pub scroll_idle_timeout_ms: f64,
    /// Grace period after the finger lifts before the hold is cancelled.
    pub touch_release_timeout_ms: f64,
    /// Debounce after the section fills the viewport (ignores momentum scroll).
    pub settle_delay_ms: f64,
    /// Total upward swipe (px) that counts as an overscroll push.
    pub touch_hold_threshold_px: f64,
    /// Downward swipe (px) that reverses the completed assembly.
    pub touch_reverse_threshold_px: f64,

    // --- Reveal / reverse ---
    pub animation_duration_ms: f64,

    // --- Geometry ---
    /// Slack (px) when testing whether the section fills the viewport.
    pub in_view_tolerance_px: f64,
    pub mobile_breakpoint_px: f64,
    pub base_distance_px: f64,
    pub base_distance_mobile_px: f64,

    // --- Springs ---
    pub letter_spring: SpringConfig,
    pub anchor_spring: SpringConfig,
    pub backdrop_spring: SpringConfig,
    pub blur_spring: SpringConfig,
    pub content_spring: SpringConfig,

    // --- Loader ---
    pub loader_radius: f64,
}

impl Default for EggConfig {
    fn default() -> Self {
        Self {
            hold_duration_ms: 1200.0,
            scroll_idle_timeout_ms: 400.0,
            touch_release_timeout_ms: 150.0,
            settle_delay_ms: 100.0,
            touch_hold_threshold_px: 15.0,
            touch_reverse_threshold_px: 20.0,
            animation_duration_ms: 3000.0,
            in_view_tolerance_px: 10.0,
            mobile_breakpoint_px: 768.0,
            base_distance_px: 800.0,
            base_distance_mobile_px: 400.0,
            letter_spring: SpringConfig::new(30.0, 20.0),
            anchor_spring: SpringConfig::new(50.0, 30.0),
            backdrop_spring: SpringConfig::new(40.0, 25.0),
            blur_spring: SpringConfig::new(25.0, 18.0),
            content_spring: SpringConfig::new(60.0, 25.0),
            loader_radius: 18.0,
        }
    }
}

impl EggConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(src: &str) -> Result<Self, crate::error::EggError> {
        let cfg: EggConfig = serde_json::from_str(src).map_err(crate::error::EggError::Config)?;
        Ok(cfg.sanitized())
    }

    /// Start offset distance for letters at the given viewport width.
    pub fn base_distance(&self, mobile: bool) -> f64 {
        if mobile { self.base_distance_mobile_px } else { self.base_distance_px }
    }

    // Durations of zero would divide by zero in the progress math.
    #[cfg(feature = "serde_json")]
    fn sanitized(mut self) -> Self {
        self.hold_duration_ms = self.hold_duration_ms.max(1.0);
        self.animation_duration_ms = self.animation_duration_ms.max(1.0);
        self.scroll_idle_timeout_ms = self.scroll_idle_timeout_ms.max(0.0);
        self.touch_release_timeout_ms = self.touch_release_timeout_ms.max(0.0);
        self.settle_delay_ms = self.settle_delay_ms.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_outro_screen() {
        let c = EggConfig::default();
        assert_eq!(c.hold_duration_ms, 1200.0);
        assert_eq!(c.animation_duration_ms, 3000.0);
        assert_eq!(c.scroll_idle_timeout_ms, 400.0);
        assert_eq!(c.base_distance(true), 400.0);
        assert_eq!(c.base_distance(false), 800.0);
    }

    #[test]
    fn default_springs_never_overshoot() {
        let c = EggConfig::default();
        for spring in [c.letter_spring, c.anchor_spring, c.backdrop_spring, c.blur_spring, c.content_spring] {
            assert!(spring.damping_ratio() >= 1.0, "{spring:?} is underdamped");
        }
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let c = EggConfig::from_json(r#"{ "hold_duration_ms": 800, "letter_spring": { "stiffness": 10, "damping": 9 } }"#)
            .unwrap();
        assert_eq!(c.hold_duration_ms, 800.0);
        assert_eq!(c.letter_spring, SpringConfig::new(10.0, 9.0));
        assert_eq!(c.animation_duration_ms, 3000.0);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn zero_durations_are_clamped() {
        let c = EggConfig::from_json(r#"{ "animation_duration_ms": 0 }"#).unwrap();
        assert!(c.animation_duration_ms >= 1.0);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn malformed_json_is_an_error() {
        assert!(EggConfig::from_json("{ hold").is_err());
    }
}
