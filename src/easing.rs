//! Easing curve, range remapping and a damped spring follower.

use crate::config::SpringConfig;

/// Cubic ease-in-out on [0,1].
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 { 4.0 * t * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0 }
}

/// Map `value` from `input` onto `output`, clamped at both ends.
/// A degenerate input range snaps to whichever side `value` sits on.
pub fn remap(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (i0, i1) = input;
    let (o0, o1) = output;
    if (i1 - i0).abs() < f64::EPSILON {
        return if value < i0 { o0 } else { o1 };
    }
    let t = ((value - i0) / (i1 - i0)).clamp(0.0, 1.0);
    o0 + (o1 - o0) * t
}

// Integration step cap; keeps stiff springs stable at low frame rates.
const MAX_SUBSTEP_MS: f64 = 4.0;
// Frames longer than this (background tab, debugger) are treated as this long.
const MAX_FRAME_MS: f64 = 64.0;
const REST_DELTA: f64 = 0.01;
const REST_SPEED: f64 = 0.01;

impl SpringConfig {
    /// Critically damped spring for the given stiffness.
    pub fn critical(stiffness: f64) -> Self {
        Self::new(stiffness, 2.0 * stiffness.max(0.0).sqrt())
    }

    pub fn damping_ratio(&self) -> f64 {
        if self.stiffness <= 0.0 { f64::INFINITY } else { self.damping / (2.0 * self.stiffness.sqrt()) }
    }
}

/// A value that chases a target through a unit-mass damped spring.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self { config, value: initial, velocity: 0.0, target: initial }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump straight to `value` with no motion.
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.velocity == 0.0 && self.value == self.target
    }

    /// Advance by `dt_ms` milliseconds and return the new value.
    pub fn step(&mut self, dt_ms: f64) -> f64 {
        if self.is_settled() {
            return self.value;
        }
        let mut remaining = dt_ms.clamp(0.0, MAX_FRAME_MS);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP_MS);
            let dt = h / 1000.0;
            let accel = -self.config.stiffness * (self.value - self.target) - self.config.damping * self.velocity;
            // semi-implicit Euler
            self.velocity += accel * dt;
            self.value += self.velocity * dt;
            remaining -= h;
        }
        if (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.snap(self.target);
        }
        self.value
    }
}
