//! Overscroll easter-egg controller.
//!
//! The controller is a plain state record stepped by [`Controller::handle`]:
//! every browser callback becomes one [`Input`], and the host executes the
//! returned [`Effect`]s (prevent the default scroll, arm or drop a timer,
//! request a frame). No DOM types appear here, so the whole gesture lifecycle
//! can be driven from tests with a fake clock.
//!
//! Lifecycle:
//!
//! ```text
//! Idle --push--> Holding --hold >= 1--> Revealing --t >= 1--> Complete
//!  ^               |                                             |
//!  +--idle/up------+                                          scroll up
//!  |                                                             v
//!  +------------------------- t >= 1 ------------------------ Reversing
//! ```
//!
//! A key press while Revealing/Reversing stops the frame loop and keeps the
//! last sampled progress; the phase falls to whichever endpoint is nearer so
//! the sequence can always be resumed or reversed from where it froze.

use log::debug;

use crate::config::EggConfig;
use crate::easing::ease_in_out_cubic;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Gesture went quiet; cancels the hold.
    Idle,
    /// Section has been in view long enough to accept overscroll.
    Settle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    /// Scroll/resize: whether the section currently fills the viewport.
    Viewport { in_view: bool },
    Wheel { delta_y: f64, in_view: bool },
    TouchStart { y: f64, in_view: bool },
    TouchMove { y: f64, in_view: bool },
    TouchEnd,
    KeyDown,
    /// Animation frame callback; `now` is the frame timestamp.
    Frame,
    Timer(TimerKind),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    PreventDefault,
    RequestFrame,
    CancelFrame,
    /// Arm (or re-arm, replacing any pending one) a timer of this kind.
    Schedule(TimerKind, f64),
    Cancel(TimerKind),
    RevealStarted,
    ReverseStarted,
    /// Forward reveal reached 1.
    Completed,
    /// Reverse reached 0 and everything was reset.
    Restored,
    /// Key press stopped an animation mid-flight.
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Holding { started_ms: f64 },
    Revealing { started_ms: f64, from: f64 },
    Complete,
    Reversing { started_ms: f64, from: f64 },
}

impl Phase {
    pub fn is_animating(&self) -> bool {
        matches!(self, Phase::Revealing { .. } | Phase::Reversing { .. })
    }
}

/// Read-only view of the controller for the render layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub progress: f64,
    pub hold: f64,
    pub triggered: bool,
    pub settled: bool,
}

impl Snapshot {
    pub fn loader_visible(&self) -> bool {
        matches!(self.phase, Phase::Holding { .. })
    }

    pub fn animating(&self) -> bool {
        self.phase.is_animating()
    }

    pub fn complete(&self) -> bool {
        matches!(self.phase, Phase::Complete)
    }

    /// Native touch scrolling must be disabled on the section.
    pub fn blocks_touch(&self) -> bool {
        self.loader_visible() || self.animating() || self.complete()
    }

    /// Contact links stay clickable only while the panel is fully in charge.
    pub fn content_interactive(&self) -> bool {
        !(self.animating() || self.complete())
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct TouchTrack {
    start_y: f64,
    last_y: f64,
    active: bool,
}

pub type Effects = Vec<Effect>;

pub struct Controller {
    config: EggConfig,
    phase: Phase,
    progress: f64,
    hold: f64,
    triggered: bool,
    settled: bool,
    settle_pending: bool,
    frame_requested: bool,
    touch: TouchTrack,
}

impl Controller {
    pub fn new(config: EggConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            progress: 0.0,
            hold: 0.0,
            triggered: false,
            settled: false,
            settle_pending: false,
            frame_requested: false,
            touch: TouchTrack::default(),
        }
    }

    pub fn config(&self) -> &EggConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn hold_progress(&self) -> f64 {
        self.hold
    }

    /// Whether the host should keep an animation frame scheduled for us.
    pub fn wants_frame(&self) -> bool {
        self.frame_requested
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            progress: self.progress,
            hold: self.hold,
            triggered: self.triggered,
            settled: self.settled,
        }
    }

    /// Step the controller with one input observed at `now` (ms, monotonic).
    pub fn handle(&mut self, now: f64, input: Input) -> Effects {
        let mut fx = Effects::new();
        match input {
            Input::Viewport { in_view } => self.on_viewport(in_view, &mut fx),
            Input::Wheel { delta_y, in_view } => self.on_wheel(now, delta_y, in_view, &mut fx),
            Input::TouchStart { y, in_view } => self.on_touch_start(y, in_view),
            Input::TouchMove { y, in_view } => self.on_touch_move(now, y, in_view, &mut fx),
            Input::TouchEnd => self.on_touch_end(&mut fx),
            Input::KeyDown => self.on_key_down(&mut fx),
            Input::Frame => self.on_frame(now, &mut fx),
            Input::Timer(TimerKind::Idle) => self.reset_hold(&mut fx),
            Input::Timer(TimerKind::Settle) => {
                self.settle_pending = false;
                self.settled = true;
            }
        }
        fx
    }

    /// Begin the forward reveal from the current progress. No-op while an
    /// animation is running or once the assembly is complete.
    pub fn start_reveal(&mut self, now: f64) -> Effects {
        let mut fx = Effects::new();
        self.begin_reveal(now, &mut fx);
        fx
    }

    /// Begin the reverse animation from the current progress. No-op while an
    /// animation is running or when there is nothing to undo.
    pub fn start_reverse(&mut self, now: f64) -> Effects {
        let mut fx = Effects::new();
        self.begin_reverse(now, &mut fx);
        fx
    }

    // --- Inputs ------------------------------------------------------------

    fn on_viewport(&mut self, in_view: bool, fx: &mut Effects) {
        if in_view {
            if !self.settled && !self.settle_pending {
                self.settle_pending = true;
                fx.push(Effect::Schedule(TimerKind::Settle, self.config.settle_delay_ms));
            }
            return;
        }
        if self.settle_pending {
            self.settle_pending = false;
            fx.push(Effect::Cancel(TimerKind::Settle));
        }
        self.settled = false;
        self.reset_hold(fx);
    }

    fn detector_active(&self) -> bool {
        self.settled && matches!(self.phase, Phase::Idle | Phase::Holding { .. })
    }

    fn on_wheel(&mut self, now: f64, delta_y: f64, in_view: bool, fx: &mut Effects) {
        match self.phase {
            Phase::Revealing { .. } | Phase::Reversing { .. } => {
                if in_view {
                    fx.push(Effect::PreventDefault);
                }
            }
            Phase::Complete => {
                if !in_view {
                    return;
                }
                fx.push(Effect::PreventDefault);
                if delta_y < 0.0 {
                    self.begin_reverse(now, fx);
                }
            }
            Phase::Idle | Phase::Holding { .. } => {
                if !self.detector_active() {
                    return;
                }
                if !in_view {
                    self.reset_hold(fx);
                    return;
                }
                if delta_y > 0.0 {
                    self.push_hold(now, self.config.scroll_idle_timeout_ms, fx);
                    fx.push(Effect::PreventDefault);
                } else if delta_y < 0.0 {
                    self.pull_back(now, fx);
                }
            }
        }
    }

    fn on_touch_start(&mut self, y: f64, in_view: bool) {
        if !in_view {
            self.touch.active = false;
            return;
        }
        self.touch = TouchTrack { start_y: y, last_y: y, active: true };
    }

    fn on_touch_move(&mut self, now: f64, y: f64, in_view: bool, fx: &mut Effects) {
        match self.phase {
            Phase::Revealing { .. } | Phase::Reversing { .. } => {
                if in_view {
                    fx.push(Effect::PreventDefault);
                }
            }
            Phase::Complete => {
                if !in_view {
                    return;
                }
                fx.push(Effect::PreventDefault);
                // finger moving down scrolls up
                if self.touch.start_y - y < -self.config.touch_reverse_threshold_px {
                    self.begin_reverse(now, fx);
                }
            }
            Phase::Idle | Phase::Holding { .. } => {
                if !self.detector_active() {
                    return;
                }
                if !self.touch.active || !in_view {
                    self.reset_hold(fx);
                    return;
                }
                let travel = self.touch.start_y - y;
                self.touch.last_y = y;
                let threshold = self.config.touch_hold_threshold_px;
                if travel > threshold {
                    fx.push(Effect::PreventDefault);
                    self.push_hold(now, self.config.scroll_idle_timeout_ms, fx);
                } else if travel < -threshold {
                    self.pull_back(now, fx);
                }
            }
        }
    }

    fn on_touch_end(&mut self, fx: &mut Effects) {
        self.touch.active = false;
        if matches!(self.phase, Phase::Holding { .. }) && !self.triggered {
            fx.push(Effect::Schedule(TimerKind::Idle, self.config.touch_release_timeout_ms));
        }
    }

    fn on_key_down(&mut self, fx: &mut Effects) {
        if !self.phase.is_animating() {
            return;
        }
        self.drop_frame(fx);
        if self.progress >= 0.5 {
            self.phase = Phase::Complete;
            self.triggered = true;
        } else {
            self.phase = Phase::Idle;
            self.triggered = false;
            self.hold = 0.0;
        }
        debug!("void assembly interrupted at {:.3}, parked as {:?}", self.progress, self.phase);
        fx.push(Effect::Interrupted);
    }

    fn on_frame(&mut self, now: f64, fx: &mut Effects) {
        if !self.frame_requested {
            return;
        }
        self.frame_requested = false;
        match self.phase {
            Phase::Holding { started_ms } => {
                self.hold = ((now - started_ms) / self.config.hold_duration_ms).clamp(0.0, 1.0);
                if self.hold >= 1.0 {
                    self.begin_reveal(now, fx);
                } else {
                    self.request_frame(fx);
                }
            }
            Phase::Revealing { started_ms, from } => {
                let t = self.animation_t(now, started_ms);
                let next = from + (1.0 - from) * ease_in_out_cubic(t);
                self.progress = next.max(self.progress).min(1.0);
                if t >= 1.0 {
                    self.progress = 1.0;
                    self.phase = Phase::Complete;
                    debug!("void assembly complete");
                    fx.push(Effect::Completed);
                } else {
                    self.request_frame(fx);
                }
            }
            Phase::Reversing { started_ms, from } => {
                let t = self.animation_t(now, started_ms);
                let next = from - from * ease_in_out_cubic(t);
                self.progress = next.min(self.progress).max(0.0);
                if t >= 1.0 {
                    self.progress = 0.0;
                    self.hold = 0.0;
                    self.triggered = false;
                    self.touch = TouchTrack::default();
                    self.phase = Phase::Idle;
                    debug!("void assembly restored");
                    fx.push(Effect::Restored);
                } else {
                    self.request_frame(fx);
                }
            }
            Phase::Idle | Phase::Complete => {}
        }
    }

    // --- Transitions -------------------------------------------------------

    /// Qualifying overscroll input: start the hold or keep it alive.
    fn push_hold(&mut self, now: f64, idle_ms: f64, fx: &mut Effects) {
        if matches!(self.phase, Phase::Idle) {
            self.phase = Phase::Holding { started_ms: now };
            self.hold = 0.0;
            self.request_frame(fx);
            debug!("overscroll hold started");
        }
        fx.push(Effect::Schedule(TimerKind::Idle, idle_ms));
    }

    /// Reverse-direction input while the detector is active.
    fn pull_back(&mut self, now: f64, fx: &mut Effects) {
        self.reset_hold(fx);
        // an interrupted reveal may have parked us in Idle above zero
        if matches!(self.phase, Phase::Idle) && self.progress > 0.0 {
            self.begin_reverse(now, fx);
        }
    }

    fn reset_hold(&mut self, fx: &mut Effects) {
        if self.triggered {
            return;
        }
        if let Phase::Holding { .. } = self.phase {
            self.phase = Phase::Idle;
            self.hold = 0.0;
            self.drop_frame(fx);
            fx.push(Effect::Cancel(TimerKind::Idle));
            debug!("overscroll hold cancelled");
        }
    }

    fn begin_reveal(&mut self, now: f64, fx: &mut Effects) {
        if self.phase.is_animating() || matches!(self.phase, Phase::Complete) {
            return;
        }
        if matches!(self.phase, Phase::Holding { .. }) {
            fx.push(Effect::Cancel(TimerKind::Idle));
        }
        self.triggered = true;
        self.phase = Phase::Revealing { started_ms: now, from: self.progress };
        debug!("void assembly reveal from {:.3}", self.progress);
        fx.push(Effect::RevealStarted);
        self.request_frame(fx);
    }

    fn begin_reverse(&mut self, now: f64, fx: &mut Effects) {
        if self.phase.is_animating() || self.progress <= 0.0 {
            return;
        }
        if matches!(self.phase, Phase::Holding { .. }) {
            return;
        }
        self.phase = Phase::Reversing { started_ms: now, from: self.progress };
        debug!("void assembly reverse from {:.3}", self.progress);
        fx.push(Effect::ReverseStarted);
        self.request_frame(fx);
    }

    fn animation_t(&self, now: f64, started_ms: f64) -> f64 {
        ((now - started_ms) / self.config.animation_duration_ms).clamp(0.0, 1.0)
    }

    fn request_frame(&mut self, fx: &mut Effects) {
        self.frame_requested = true;
        fx.push(Effect::RequestFrame);
    }

    fn drop_frame(&mut self, fx: &mut Effects) {
        if self.frame_requested {
            self.frame_requested = false;
            fx.push(Effect::CancelFrame);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(EggConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled() -> Controller {
        let mut c = Controller::default();
        c.handle(0.0, Input::Viewport { in_view: true });
        c.handle(100.0, Input::Timer(TimerKind::Settle));
        c
    }

    fn wheel(c: &mut Controller, now: f64, delta_y: f64) -> Effects {
        c.handle(now, Input::Wheel { delta_y, in_view: true })
    }

    #[test]
    fn unsettled_section_lets_scroll_through() {
        let mut c = Controller::default();
        c.handle(0.0, Input::Viewport { in_view: true });
        let fx = wheel(&mut c, 10.0, 50.0);
        assert!(fx.is_empty());
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn viewport_schedules_settle_once() {
        let mut c = Controller::default();
        let fx = c.handle(0.0, Input::Viewport { in_view: true });
        assert_eq!(fx, vec![Effect::Schedule(TimerKind::Settle, 100.0)]);
        assert!(c.handle(5.0, Input::Viewport { in_view: true }).is_empty());
        let fx = c.handle(6.0, Input::Viewport { in_view: false });
        assert_eq!(fx, vec![Effect::Cancel(TimerKind::Settle)]);
        assert!(!c.snapshot().settled);
    }

    #[test]
    fn first_push_starts_hold_and_blocks_scroll() {
        let mut c = settled();
        let fx = wheel(&mut c, 200.0, 50.0);
        assert_eq!(
            fx,
            vec![Effect::RequestFrame, Effect::Schedule(TimerKind::Idle, 400.0), Effect::PreventDefault]
        );
        assert_eq!(c.phase(), Phase::Holding { started_ms: 200.0 });
        assert!(c.snapshot().loader_visible());
        // continuing only re-arms the idle timer
        let fx = wheel(&mut c, 300.0, 50.0);
        assert_eq!(fx, vec![Effect::Schedule(TimerKind::Idle, 400.0), Effect::PreventDefault]);
    }

    #[test]
    fn upward_wheel_cancels_hold() {
        let mut c = settled();
        wheel(&mut c, 200.0, 50.0);
        let fx = wheel(&mut c, 250.0, -10.0);
        assert!(fx.contains(&Effect::CancelFrame));
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.hold_progress(), 0.0);
    }

    #[test]
    fn hold_completion_latches_and_starts_reveal() {
        let mut c = settled();
        wheel(&mut c, 0.0, 50.0);
        c.handle(600.0, Input::Frame);
        assert!((c.hold_progress() - 0.5).abs() < 1e-9);
        let fx = c.handle(1200.0, Input::Frame);
        assert_eq!(
            fx,
            vec![Effect::Cancel(TimerKind::Idle), Effect::RevealStarted, Effect::RequestFrame]
        );
        assert!(c.snapshot().triggered);
        // a late idle timer must not undo the latch
        assert!(c.handle(1300.0, Input::Timer(TimerKind::Idle)).is_empty());
        assert!(c.phase().is_animating());
    }

    #[test]
    fn start_while_animating_is_noop() {
        let mut c = settled();
        assert!(!c.start_reveal(0.0).is_empty());
        assert!(c.start_reveal(10.0).is_empty());
        assert!(c.start_reverse(10.0).is_empty());
        assert_eq!(c.phase(), Phase::Revealing { started_ms: 0.0, from: 0.0 });
    }

    #[test]
    fn frames_without_request_are_ignored() {
        let mut c = settled();
        assert!(c.handle(16.0, Input::Frame).is_empty());
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn complete_blocks_scroll_and_reverses_on_scroll_up() {
        let mut c = settled();
        c.start_reveal(0.0);
        c.handle(3000.0, Input::Frame);
        assert_eq!(c.phase(), Phase::Complete);
        assert_eq!(c.progress(), 1.0);
        assert_eq!(wheel(&mut c, 3100.0, 30.0), vec![Effect::PreventDefault]);
        let fx = wheel(&mut c, 3200.0, -30.0);
        assert_eq!(fx, vec![Effect::PreventDefault, Effect::ReverseStarted, Effect::RequestFrame]);
    }

    #[test]
    fn reverse_restores_initial_state() {
        let mut c = settled();
        wheel(&mut c, 0.0, 50.0);
        c.handle(1200.0, Input::Frame);
        c.handle(4200.0, Input::Frame);
        wheel(&mut c, 5000.0, -5.0);
        c.handle(6500.0, Input::Frame);
        let fx = c.handle(8000.0, Input::Frame);
        assert_eq!(fx, vec![Effect::Restored]);
        let s = c.snapshot();
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.progress, 0.0);
        assert_eq!(s.hold, 0.0);
        assert!(!s.triggered);
        assert!(s.settled);
    }

    #[test]
    fn touch_swipe_holds_past_threshold() {
        let mut c = settled();
        c.handle(0.0, Input::TouchStart { y: 500.0, in_view: true });
        assert!(c.handle(10.0, Input::TouchMove { y: 490.0, in_view: true }).is_empty());
        let fx = c.handle(20.0, Input::TouchMove { y: 480.0, in_view: true });
        assert_eq!(fx[0], Effect::PreventDefault);
        assert!(c.snapshot().loader_visible());
        let fx = c.handle(30.0, Input::TouchEnd);
        assert_eq!(fx, vec![Effect::Schedule(TimerKind::Idle, 150.0)]);
    }

    #[test]
    fn touch_move_without_start_cancels_hold() {
        let mut c = settled();
        wheel(&mut c, 0.0, 50.0);
        c.handle(10.0, Input::TouchMove { y: 100.0, in_view: true });
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn downward_swipe_reverses_completed_assembly() {
        let mut c = settled();
        c.start_reveal(0.0);
        c.handle(3000.0, Input::Frame);
        c.handle(3100.0, Input::TouchStart { y: 300.0, in_view: true });
        let fx = c.handle(3110.0, Input::TouchMove { y: 310.0, in_view: true });
        assert_eq!(fx, vec![Effect::PreventDefault]);
        let fx = c.handle(3120.0, Input::TouchMove { y: 330.0, in_view: true });
        assert!(fx.contains(&Effect::ReverseStarted));
    }

    #[test]
    fn animations_block_all_scroll_in_view() {
        let mut c = settled();
        c.start_reveal(0.0);
        assert_eq!(wheel(&mut c, 10.0, -80.0), vec![Effect::PreventDefault]);
        assert_eq!(
            c.handle(20.0, Input::TouchMove { y: 10.0, in_view: true }),
            vec![Effect::PreventDefault]
        );
        assert!(c.handle(30.0, Input::Wheel { delta_y: 5.0, in_view: false }).is_empty());
    }

    #[test]
    fn interrupt_early_parks_idle_and_can_resume() {
        let mut c = settled();
        c.start_reveal(0.0);
        c.handle(900.0, Input::Frame);
        let frozen = c.progress();
        assert!(frozen > 0.0 && frozen < 0.5);
        let fx = c.handle(950.0, Input::KeyDown);
        assert_eq!(fx, vec![Effect::CancelFrame, Effect::Interrupted]);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.snapshot().triggered);
        assert_eq!(c.progress(), frozen);
        // scrolling up from the parked state unwinds it
        let fx = wheel(&mut c, 1000.0, -20.0);
        assert!(fx.contains(&Effect::ReverseStarted));
    }

    #[test]
    fn interrupt_late_parks_complete() {
        let mut c = settled();
        c.start_reveal(0.0);
        c.handle(2000.0, Input::Frame);
        c.handle(2010.0, Input::KeyDown);
        assert_eq!(c.phase(), Phase::Complete);
        assert!(c.progress() < 1.0);
        wheel(&mut c, 2100.0, -20.0);
        assert!(matches!(c.phase(), Phase::Reversing { .. }));
    }

    fn reversing_from_complete() -> Controller {
        let mut c = settled();
        c.start_reveal(0.0);
        c.handle(3000.0, Input::Frame);
        wheel(&mut c, 3100.0, -30.0);
        assert!(matches!(c.phase(), Phase::Reversing { .. }));
        c
    }

    #[test]
    fn reverse_blocks_scroll_in_view() {
        let mut c = reversing_from_complete();
        assert_eq!(wheel(&mut c, 3200.0, 40.0), vec![Effect::PreventDefault]);
        assert_eq!(wheel(&mut c, 3210.0, -40.0), vec![Effect::PreventDefault]);
        c.handle(3220.0, Input::TouchStart { y: 300.0, in_view: true });
        assert_eq!(
            c.handle(3230.0, Input::TouchMove { y: 200.0, in_view: true }),
            vec![Effect::PreventDefault]
        );
        assert!(c.handle(3240.0, Input::Wheel { delta_y: 40.0, in_view: false }).is_empty());
        assert!(matches!(c.phase(), Phase::Reversing { started_ms, .. } if started_ms == 3100.0));
    }

    #[test]
    fn interrupt_during_early_reverse_parks_complete() {
        let mut c = reversing_from_complete();
        c.handle(3600.0, Input::Frame);
        let frozen = c.progress();
        assert!(frozen > 0.5 && frozen < 1.0);
        assert_eq!(c.handle(3610.0, Input::KeyDown), vec![Effect::CancelFrame, Effect::Interrupted]);
        assert_eq!(c.phase(), Phase::Complete);
        assert!(c.snapshot().triggered);
        assert_eq!(c.progress(), frozen);
        // frames already in flight do nothing once stopped
        assert!(c.handle(3620.0, Input::Frame).is_empty());
        assert_eq!(c.progress(), frozen);
    }

    #[test]
    fn interrupt_during_late_reverse_parks_idle() {
        let mut c = reversing_from_complete();
        c.handle(5600.0, Input::Frame);
        let frozen = c.progress();
        assert!(frozen > 0.0 && frozen < 0.5);
        c.handle(5610.0, Input::KeyDown);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.snapshot().triggered);
        assert_eq!(c.progress(), frozen);
    }

    #[test]
    fn downward_swipe_needs_more_than_twenty_pixels() {
        let mut c = settled();
        c.start_reveal(0.0);
        c.handle(3000.0, Input::Frame);
        c.handle(3100.0, Input::TouchStart { y: 300.0, in_view: true });
        assert_eq!(c.handle(3110.0, Input::TouchMove { y: 319.0, in_view: true }), vec![Effect::PreventDefault]);
        assert_eq!(c.handle(3120.0, Input::TouchMove { y: 320.0, in_view: true }), vec![Effect::PreventDefault]);
        assert_eq!(c.phase(), Phase::Complete);
        let fx = c.handle(3130.0, Input::TouchMove { y: 321.0, in_view: true });
        assert_eq!(fx, vec![Effect::PreventDefault, Effect::ReverseStarted, Effect::RequestFrame]);
    }

    #[test]
    fn leaving_view_cancels_hold_and_settle() {
        let mut c = settled();
        wheel(&mut c, 0.0, 50.0);
        c.handle(50.0, Input::Viewport { in_view: false });
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.snapshot().settled);
        assert!(wheel(&mut c, 60.0, 50.0).is_empty());
    }
}
