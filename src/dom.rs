//! Browser binding: window listeners, frame loop, timers and style writes.
//!
//! All mutable state lives in one `thread_local!` slot. Every callback borrows
//! it, turns the browser event into an [`Input`], steps the controller and
//! carries out the returned effects. Timer and frame handles cancel on drop,
//! so unmounting is just dropping the slot.

use std::cell::RefCell;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, TouchEvent, WheelEvent, window};

use crate::config::EggConfig;
use crate::error::EggError;
use crate::letters::LetterConfig;
use crate::machine::{Controller, Effect, Effects, Input, TimerKind};
use crate::scene::{Scene, SceneStyle};
use crate::viewport;

const OVERLAY_ID: &str = "va-overlay";
const LETTER_STYLE: &str = "display:inline-block; color:#000; font-family:Georgia, 'Times New Roman', serif; font-weight:700; font-size:clamp(2.25rem, 8vw, 6rem); letter-spacing:-0.02em; line-height:1; will-change:transform, opacity, filter;";

thread_local! {
    static MOUNT: RefCell<Option<Mount>> = const { RefCell::new(None) };
}

struct Overlay {
    root: HtmlElement,
    backdrop: HtmlElement,
    letters: Vec<Vec<HtmlElement>>,
    loader: HtmlElement,
    loader_arc: Element,
}

struct Mount {
    controller: Controller,
    scene: Scene,
    section: HtmlElement,
    content: Option<HtmlElement>,
    overlay: Overlay,
    mobile: bool,
    frame: Option<AnimationFrame>,
    last_frame_ts: Option<f64>,
    idle_timer: Option<Timeout>,
    settle_timer: Option<Timeout>,
    listeners: Vec<EventListener>,
    overridden: Vec<SavedStyle>,
}

/// An inline style property the mount replaced, put back on unmount.
struct SavedStyle {
    el: HtmlElement,
    property: &'static str,
    previous: String,
}

impl SavedStyle {
    fn set(el: &HtmlElement, property: &'static str, value: &str) -> Self {
        let style = el.style();
        let previous = style.get_property_value(property).unwrap_or_default();
        style.set_property(property, value).ok();
        Self { el: el.clone(), property, previous }
    }

    fn restore(&self) {
        let style = self.el.style();
        if self.previous.is_empty() {
            style.remove_property(self.property).ok();
        } else {
            style.set_property(self.property, &self.previous).ok();
        }
    }
}

pub(crate) fn performance_now() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

/// Mount the effect into `section_id`, replacing any previous mount.
pub(crate) fn mount(
    section_id: &str,
    content_id: Option<&str>,
    rows: Vec<Vec<LetterConfig>>,
    config: EggConfig,
) -> Result<(), EggError> {
    unmount();
    let win = window().ok_or(EggError::NoWindow)?;
    let doc = win.document().ok_or(EggError::NoDocument)?;
    let section: HtmlElement = doc
        .get_element_by_id(section_id)
        .ok_or_else(|| EggError::MissingElement(section_id.to_string()))?
        .dyn_into()
        .map_err(|_| EggError::Dom(format!("#{section_id} is not an HTML element")))?;
    let content = match content_id {
        Some(id) => Some(
            doc.get_element_by_id(id)
                .ok_or_else(|| EggError::MissingElement(id.to_string()))?
                .dyn_into::<HtmlElement>()
                .map_err(|_| EggError::Dom(format!("#{id} is not an HTML element")))?,
        ),
        None => None,
    };

    let width = win.inner_width()?.as_f64().unwrap_or(0.0);
    let mobile = viewport::is_mobile(width, config.mobile_breakpoint_px);
    let overlay = build_overlay(&doc, &section, &rows, config.loader_radius)?;
    let mut overridden = Vec::new();
    if let Some(content) = &content {
        overridden.push(SavedStyle::set(content, "position", "relative"));
        overridden.push(SavedStyle::set(content, "z-index", "20"));
    }
    if section.style().get_property_value("position").unwrap_or_default().is_empty() {
        overridden.push(SavedStyle::set(&section, "position", "relative"));
    }
    overridden.push(SavedStyle::set(&section, "overscroll-behavior-y", "contain"));

    let mount = Mount {
        scene: Scene::new(&config, rows, mobile),
        controller: Controller::new(config),
        section,
        content,
        overlay,
        mobile,
        frame: None,
        last_frame_ts: None,
        idle_timer: None,
        settle_timer: None,
        listeners: Vec::new(),
        overridden,
    };
    MOUNT.with(|cell| cell.replace(Some(mount)));

    let listeners = install_listeners(&win);
    MOUNT.with(|cell| {
        if let Some(m) = cell.borrow_mut().as_mut() {
            m.listeners = listeners;
        }
    });
    info!("void assembly mounted on #{section_id}");
    // the section may already fill the viewport (page reloaded at the bottom)
    dispatch(None, |m| Input::Viewport { in_view: m.in_view() });
    Ok(())
}

pub(crate) fn unmount() {
    let old = MOUNT.with(|cell| cell.borrow_mut().take());
    if let Some(m) = old {
        // listeners first so nothing dispatches into a half-removed overlay
        drop(m.listeners);
        m.overlay.root.remove();
        if let Some(content) = &m.content {
            let style = content.style();
            style.remove_property("opacity").ok();
            style.remove_property("pointer-events").ok();
        }
        m.section.style().remove_property("touch-action").ok();
        for saved in m.overridden.iter().rev() {
            saved.restore();
        }
        info!("void assembly unmounted");
    }
}

pub(crate) fn progress() -> f64 {
    MOUNT.with(|cell| cell.borrow().as_ref().map(|m| m.controller.progress()).unwrap_or(0.0))
}

/// Step the controller with the input built from the mount, if any.
fn dispatch(event: Option<&Event>, build: impl FnOnce(&Mount) -> Input) {
    MOUNT.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(m) = slot.as_mut() else {
            return;
        };
        let input = build(&*m);
        let fx = m.controller.handle(performance_now(), input);
        m.apply(fx, event);
        m.render();
        m.sync_frame();
    });
}

fn on_animation_frame(ts: f64) {
    MOUNT.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(m) = slot.as_mut() else {
            return;
        };
        m.frame.take();
        let dt = m.last_frame_ts.map(|prev| (ts - prev).max(0.0)).unwrap_or(16.0);
        m.last_frame_ts = Some(ts);
        let fx = m.controller.handle(ts, Input::Frame);
        m.apply(fx, None);
        m.scene.tick(m.controller.progress(), dt);
        m.render();
        m.sync_frame();
    });
}

fn on_timer(kind: TimerKind) {
    dispatch(None, |_| Input::Timer(kind));
}

impl Mount {
    fn in_view(&self) -> bool {
        let Some(win) = window() else {
            return false;
        };
        let height = win.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
        let rect = self.section.get_bounding_client_rect();
        viewport::section_in_view(rect.top(), rect.bottom(), height, self.controller.config().in_view_tolerance_px)
    }

    fn timer_slot(&mut self, kind: TimerKind) -> &mut Option<Timeout> {
        match kind {
            TimerKind::Idle => &mut self.idle_timer,
            TimerKind::Settle => &mut self.settle_timer,
        }
    }

    fn apply(&mut self, fx: Effects, event: Option<&Event>) {
        for effect in fx {
            match effect {
                Effect::PreventDefault => {
                    if let Some(ev) = event {
                        ev.prevent_default();
                    }
                }
                // reconciled in sync_frame together with the scene springs
                Effect::RequestFrame | Effect::CancelFrame => {}
                Effect::Schedule(kind, ms) => {
                    let timer = Timeout::new(ms.max(0.0).round() as u32, move || on_timer(kind));
                    *self.timer_slot(kind) = Some(timer);
                }
                Effect::Cancel(kind) => *self.timer_slot(kind) = None,
                Effect::RevealStarted => info!("void assembly: reveal started"),
                Effect::ReverseStarted => info!("void assembly: reverse started"),
                Effect::Completed => info!("void assembly: complete"),
                Effect::Restored => info!("void assembly: restored"),
                Effect::Interrupted => info!("void assembly: interrupted at {:.3}", self.controller.progress()),
            }
        }
    }

    /// Keep exactly one frame pending while anything still moves.
    fn sync_frame(&mut self) {
        let wants = self.controller.wants_frame() || !self.scene.is_settled();
        if wants {
            if self.frame.is_none() {
                self.frame = Some(request_animation_frame(on_animation_frame));
            }
        } else {
            self.frame = None;
            self.last_frame_ts = None;
        }
    }

    fn set_mobile(&mut self, mobile: bool) {
        if mobile != self.mobile {
            self.mobile = mobile;
            self.scene.set_mobile(mobile);
        }
    }

    fn render(&self) {
        let snap = self.controller.snapshot();
        let style = self.scene.style(&snap);
        self.write_styles(&style);
    }

    fn write_styles(&self, s: &SceneStyle) {
        let o = &self.overlay;
        o.backdrop.style().set_property("opacity", &format!("{:.4}", s.backdrop_opacity)).ok();
        let blur = format!("blur({:.2}px)", s.letter_blur_px);
        let opacity = format!("{:.4}", s.letter_opacity);
        for (row_el, row) in o.letters.iter().zip(&s.rows) {
            for (el, l) in row_el.iter().zip(row) {
                let st = el.style();
                if l.anchor {
                    st.set_property("transform", &format!("scale({:.4})", l.scale)).ok();
                } else {
                    st.set_property("transform", &format!("translate3d({:.2}px, {:.2}px, 0)", l.x, l.y)).ok();
                    st.set_property("opacity", &opacity).ok();
                    st.set_property("filter", &blur).ok();
                }
            }
        }
        if let Some(content) = &self.content {
            let st = content.style();
            st.set_property("opacity", &format!("{:.4}", s.content_opacity)).ok();
            st.set_property("pointer-events", if s.content_interactive { "auto" } else { "none" }).ok();
        }
        let loader = o.loader.style();
        loader.set_property("opacity", if s.loader.visible { "1" } else { "0" }).ok();
        loader
            .set_property("transform", if s.loader.visible { "translate(-50%, 0) scale(1)" } else { "translate(-50%, 20px) scale(0.8)" })
            .ok();
        o.loader_arc.set_attribute("stroke-dashoffset", &format!("{:.3}", s.loader.dash_offset)).ok();
        self.section.style().set_property("touch-action", if s.blocks_touch { "none" } else { "auto" }).ok();
    }
}

fn first_touch_y(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(touch.client_y() as f64)
}

fn install_listeners(win: &web_sys::Window) -> Vec<EventListener> {
    let blocking = EventListenerOptions::enable_prevent_default;
    vec![
        EventListener::new(win, "scroll", |_| {
            dispatch(None, |m| Input::Viewport { in_view: m.in_view() });
        }),
        EventListener::new(win, "resize", |_| {
            MOUNT.with(|cell| {
                if let Some(m) = cell.borrow_mut().as_mut() {
                    let width = window()
                        .and_then(|w| w.inner_width().ok())
                        .and_then(|w| w.as_f64())
                        .unwrap_or(0.0);
                    let mobile = viewport::is_mobile(width, m.controller.config().mobile_breakpoint_px);
                    m.set_mobile(mobile);
                }
            });
            dispatch(None, |m| Input::Viewport { in_view: m.in_view() });
        }),
        EventListener::new_with_options(win, "wheel", blocking(), |event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let delta_y = wheel.delta_y();
            dispatch(Some(event), |m| Input::Wheel { delta_y, in_view: m.in_view() });
        }),
        EventListener::new(win, "touchstart", |event| {
            let Some(y) = first_touch_y(event) else {
                return;
            };
            dispatch(None, |m| Input::TouchStart { y, in_view: m.in_view() });
        }),
        EventListener::new_with_options(win, "touchmove", blocking(), |event| {
            let Some(y) = first_touch_y(event) else {
                return;
            };
            dispatch(Some(event), |m| Input::TouchMove { y, in_view: m.in_view() });
        }),
        EventListener::new(win, "touchend", |_| dispatch(None, |_| Input::TouchEnd)),
        EventListener::new(win, "keydown", |_| dispatch(None, |_| Input::KeyDown)),
    ]
}

fn create_div(doc: &Document, id: &str, style: &str) -> Result<HtmlElement, EggError> {
    let el: HtmlElement = doc.create_element("div")?.dyn_into().map_err(|_| EggError::Dom("div".into()))?;
    if !id.is_empty() {
        el.set_id(id);
    }
    el.set_attribute("style", style)?;
    Ok(el)
}

fn build_overlay(
    doc: &Document,
    section: &HtmlElement,
    rows: &[Vec<LetterConfig>],
    radius: f64,
) -> Result<Overlay, EggError> {
    if let Some(stale) = doc.get_element_by_id(OVERLAY_ID) {
        stale.remove();
    }
    let root = create_div(doc, OVERLAY_ID, "position:absolute; inset:0; pointer-events:none; overflow:hidden;")?;
    let backdrop = create_div(doc, "va-backdrop", "position:absolute; inset:0; background:#fff; opacity:0; z-index:1;")?;
    root.append_child(&backdrop)?;

    let stage = create_div(
        doc,
        "va-letters",
        "position:absolute; inset:0; z-index:10; display:flex; flex-direction:column; align-items:center; justify-content:center;",
    )?;
    let mut letters = Vec::with_capacity(rows.len());
    for row in rows {
        let row_el = create_div(doc, "", "display:flex; align-items:center; justify-content:center;")?;
        let mut spans = Vec::with_capacity(row.len());
        for cfg in row {
            let span: HtmlElement =
                doc.create_element("span")?.dyn_into().map_err(|_| EggError::Dom("span".into()))?;
            span.set_text_content(Some(&cfg.ch.to_string()));
            let extra = if cfg.anchor { "transform-origin:52% 50%;" } else { "" };
            span.set_attribute("style", &format!("{LETTER_STYLE}{extra}"))?;
            row_el.append_child(&span)?;
            spans.push(span);
        }
        stage.append_child(&row_el)?;
        letters.push(spans);
    }
    root.append_child(&stage)?;

    let loader = create_div(
        doc,
        "va-loader",
        "position:absolute; bottom:48px; left:50%; z-index:25; width:56px; height:56px; opacity:0; transition:opacity 0.25s ease-out, transform 0.25s ease-out;",
    )?;
    loader.set_inner_html(&format!(
        "<svg width='56' height='56' viewBox='0 0 44 44' style='transform:rotate(-90deg)'>\
         <circle cx='22' cy='22' r='{radius}' fill='none' stroke='rgba(255,255,255,0.15)' stroke-width='3'/>\
         <circle id='va-loader-arc' cx='22' cy='22' r='{radius}' fill='none' stroke='#10b981' stroke-width='3' stroke-linecap='round' style='transition:stroke-dashoffset 0.05s linear'/>\
         </svg>"
    ));
    root.append_child(&loader)?;
    section.append_child(&root)?;

    let loader_arc = doc
        .get_element_by_id("va-loader-arc")
        .ok_or_else(|| EggError::MissingElement("va-loader-arc".into()))?;
    let circumference = std::f64::consts::TAU * radius;
    loader_arc.set_attribute("stroke-dasharray", &format!("{circumference:.3}"))?;
    Ok(Overlay { root, backdrop, letters, loader, loader_arc })
}
