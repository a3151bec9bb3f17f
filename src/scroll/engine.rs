//! Inertial scroll engine.
//!
//! Wheel input and programmatic jumps only move a *target* offset. A frame
//! loop eases the visible offset toward that target and writes it to the
//! viewport once per animation frame. Everything the engine needs from the
//! browser goes through [`Platform`], so the loop runs the same against the
//! DOM and against a scripted document in tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info};
use web_sys::Element;

use super::error::ScrollError;
use crate::config::ScrollConfig;

/// Distance in pixels under which an animation counts as settled.
pub const SETTLE_EPSILON: f64 = 0.5;

/// Pixel height of one wheel "line" when the device reports line deltas.
const LINE_HEIGHT: f64 = 100.0 / 6.0;

pub const ROOT_CLASS: &str = "scroll-smooth";
pub const WHEEL_CLASS: &str = "scroll-smooth--wheel";
pub const SCROLLING_CLASS: &str = "scroll-smooth--scrolling";

#[derive(Clone, Debug, PartialEq)]
pub enum ScrollTarget {
    /// CSS selector, or one of the keywords `top`/`start` and `bottom`/`end`.
    Anchor(String),
    Element(Element),
}

impl From<&str> for ScrollTarget {
    fn from(anchor: &str) -> Self {
        ScrollTarget::Anchor(anchor.to_string())
    }
}

impl From<String> for ScrollTarget {
    fn from(anchor: String) -> Self {
        ScrollTarget::Anchor(anchor)
    }
}

impl From<Element> for ScrollTarget {
    fn from(element: Element) -> Self {
        ScrollTarget::Element(element)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOptions {
    /// Added to the resolved position. Negative values stop short of the
    /// target, leaving room for fixed overlays.
    pub offset: f64,
}

impl ScrollOptions {
    pub fn with_offset(offset: f64) -> Self {
        Self { offset }
    }
}

/// The browser surface the engine drives.
pub trait Platform: Sized + 'static {
    /// Pending animation frame. Dropping it cancels the callback.
    type Frame;
    /// Attached input listeners. Dropping them detaches.
    type Listeners;

    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&self, top: f64);
    /// Largest reachable scroll offset.
    fn scroll_limit(&self) -> f64;
    /// Top edge of an anchor or element relative to the viewport, `None`
    /// when it does not resolve to anything in the document.
    fn viewport_top(&self, target: &ScrollTarget) -> Option<f64>;
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Self::Frame;
    fn attach(&self, engine: WeakEngine<Self>) -> Self::Listeners;
    fn toggle_root_class(&self, class: &str, on: bool);
}

#[derive(Debug, Default)]
struct EngineState {
    config: ScrollConfig,
    animated: f64,
    target: f64,
    last_frame: Option<f64>,
    initialized: bool,
    animating: bool,
}

struct Inner<P: Platform> {
    platform: P,
    state: RefCell<EngineState>,
    frame: RefCell<Option<P::Frame>>,
    listeners: RefCell<Option<P::Listeners>>,
}

pub struct ScrollEngine<P: Platform> {
    inner: Rc<Inner<P>>,
}

impl<P: Platform> Clone for ScrollEngine<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Non-owning engine reference held by frame callbacks and listeners.
pub struct WeakEngine<P: Platform>(Weak<Inner<P>>);

impl<P: Platform> Clone for WeakEngine<P> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<P: Platform> WeakEngine<P> {
    pub fn upgrade(&self) -> Option<ScrollEngine<P>> {
        self.0.upgrade().map(|inner| ScrollEngine { inner })
    }
}

impl<P: Platform> ScrollEngine<P> {
    pub fn new(platform: P) -> Self {
        Self {
            inner: Rc::new(Inner {
                platform,
                state: RefCell::new(EngineState::default()),
                frame: RefCell::new(None),
                listeners: RefCell::new(None),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakEngine<P> {
        WeakEngine(Rc::downgrade(&self.inner))
    }

    /// Starts the frame loop and input handling. Calling it on an engine
    /// that is already running does nothing.
    pub fn initialize(&self, config: ScrollConfig) -> Result<(), ScrollError> {
        if self.is_initialized() {
            debug!("Scroll engine already initialized, ignoring");
            return Ok(());
        }
        config.validate()?;

        let native = self.inner.platform.scroll_top();
        let smooth_wheel = config.smooth_wheel;
        {
            let mut state = self.inner.state.borrow_mut();
            *state = EngineState {
                config,
                animated: native,
                target: native,
                initialized: true,
                ..EngineState::default()
            };
        }

        let platform = &self.inner.platform;
        platform.toggle_root_class(ROOT_CLASS, true);
        platform.toggle_root_class(WHEEL_CLASS, smooth_wheel);
        let listeners = platform.attach(self.downgrade());
        *self.inner.listeners.borrow_mut() = Some(listeners);
        self.schedule_frame();

        info!("Smooth scroll engine started at offset {}", native);
        Ok(())
    }

    /// Advances the animation by one frame. `timestamp` is the frame time in
    /// milliseconds as handed out by the browser.
    pub fn tick(&self, timestamp: f64) {
        let (position, settled) = {
            let mut state = self.inner.state.borrow_mut();
            if !state.initialized {
                return;
            }
            let dt = state
                .last_frame
                .map_or(0.0, |last| ((timestamp - last) / 1000.0).max(0.0));
            state.last_frame = Some(timestamp);
            if !state.animating {
                return;
            }

            state.animated = damp(state.animated, state.target, state.config.lerp * 60.0, dt);
            let settled = (state.target - state.animated).abs() < SETTLE_EPSILON;
            if settled {
                state.animated = state.target;
                state.animating = false;
            }
            (state.animated, settled)
        };

        self.inner.platform.set_scroll_top(position);
        if settled {
            self.inner.platform.toggle_root_class(SCROLLING_CLASS, false);
            debug!("Scroll settled at {}", position);
        }
    }

    /// Eases the viewport toward `target`. Unresolvable targets are ignored,
    /// and a newer call simply replaces the destination of an older one.
    pub fn scroll_to(&self, target: ScrollTarget, options: ScrollOptions) {
        if !self.is_initialized() {
            debug!("Scroll engine inactive, ignoring scroll to {:?}", target);
            return;
        }

        let Some(position) = self.resolve(&target) else {
            debug!("Scroll target {:?} not found", target);
            return;
        };
        let Some(destination) = self.clamp(position + options.offset) else {
            debug!("Ignoring non-finite offset {} for {:?}", options.offset, target);
            return;
        };
        self.set_target(destination);
    }

    /// Feeds a wheel delta in pixels. Returns `true` when the engine consumed
    /// it and the native scroll must be prevented.
    pub fn on_wheel(&self, delta: f64) -> bool {
        let (target, multiplier) = {
            let state = self.inner.state.borrow();
            if !state.initialized || !state.config.smooth_wheel {
                return false;
            }
            (state.target, state.config.wheel_multiplier)
        };

        let Some(destination) = self.clamp(target + delta * multiplier) else {
            debug!("Ignoring non-finite wheel delta {}", delta);
            return false;
        };
        self.set_target(destination);
        true
    }

    /// Re-syncs with the native position after scrolling the engine did not
    /// drive (keyboard, scrollbar, touch).
    pub fn on_native_scroll(&self) {
        let native = self.inner.platform.scroll_top();
        let mut state = self.inner.state.borrow_mut();
        if !state.initialized || state.animating {
            return;
        }
        state.animated = native;
        state.target = native;
    }

    /// Cancels the frame loop and detaches listeners. Safe to call repeatedly.
    pub fn teardown(&self) {
        let was_running = {
            let mut state = self.inner.state.borrow_mut();
            let was_running = state.initialized;
            state.initialized = false;
            state.animating = false;
            state.last_frame = None;
            was_running
        };

        let frame = self.inner.frame.borrow_mut().take();
        drop(frame);
        let listeners = self.inner.listeners.borrow_mut().take();
        drop(listeners);

        if !was_running {
            return;
        }
        for class in [ROOT_CLASS, WHEEL_CLASS, SCROLLING_CLASS] {
            self.inner.platform.toggle_root_class(class, false);
        }
        info!("Smooth scroll engine torn down");
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.state.borrow().initialized
    }

    fn schedule_frame(&self) {
        let engine = self.downgrade();
        let frame = self.inner.platform.request_frame(Box::new(move |timestamp| {
            if let Some(engine) = engine.upgrade() {
                engine.on_frame(timestamp);
            }
        }));
        *self.inner.frame.borrow_mut() = Some(frame);
    }

    fn on_frame(&self, timestamp: f64) {
        // This frame has fired; its handle is spent.
        let fired = self.inner.frame.borrow_mut().take();
        drop(fired);

        if !self.is_initialized() {
            return;
        }
        self.tick(timestamp);
        if self.is_initialized() {
            self.schedule_frame();
        }
    }

    fn set_target(&self, destination: f64) {
        let started = {
            let mut state = self.inner.state.borrow_mut();
            state.target = destination;
            !std::mem::replace(&mut state.animating, true)
        };
        if started {
            self.inner.platform.toggle_root_class(SCROLLING_CLASS, true);
        }
    }

    fn resolve(&self, target: &ScrollTarget) -> Option<f64> {
        let platform = &self.inner.platform;
        if let ScrollTarget::Anchor(anchor) = target {
            match anchor.trim() {
                "" => return None,
                "top" | "start" => return Some(0.0),
                "bottom" | "end" => return Some(platform.scroll_limit()),
                _ => {}
            }
        }
        // Selectors and element handles share the geometry lookup.
        platform
            .viewport_top(target)
            .map(|top| top + platform.scroll_top())
    }

    /// Clamps into the scrollable range, `None` for NaN or infinite input.
    fn clamp(&self, position: f64) -> Option<f64> {
        position
            .is_finite()
            .then(|| position.clamp(0.0, self.inner.platform.scroll_limit().max(0.0)))
    }
}

#[cfg(test)]
impl<P: Platform> ScrollEngine<P> {
    pub fn is_animating(&self) -> bool {
        self.inner.state.borrow().animating
    }

    pub fn target_offset(&self) -> f64 {
        self.inner.state.borrow().target
    }

    pub fn frame_pending(&self) -> bool {
        self.inner.frame.borrow().is_some()
    }
}

/// Frame-rate independent exponential approach of `from` toward `to`.
fn damp(from: f64, to: f64, lambda: f64, dt: f64) -> f64 {
    from + (to - from) * (1.0 - (-lambda * dt).exp())
}

/// Converts a wheel delta to pixels according to the DOM `deltaMode`
/// (0 pixels, 1 lines, 2 pages).
pub fn normalize_wheel_delta(delta: f64, delta_mode: u32, viewport_height: f64) -> f64 {
    match delta_mode {
        1 => delta * LINE_HEIGHT,
        2 => delta * viewport_height,
        _ => delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::testing::{FakePlatform, FRAME_MS};

    fn running(platform: &FakePlatform) -> ScrollEngine<FakePlatform> {
        let engine = ScrollEngine::new(platform.clone());
        engine.initialize(ScrollConfig::default()).unwrap();
        engine
    }

    #[test]
    fn anchor_settles_at_viewport_top() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);

        engine.scroll_to("#services".into(), ScrollOptions::default());
        platform.run_frames(300);

        assert!((platform.scroll_top() - 900.0).abs() < SETTLE_EPSILON);
        assert!(!engine.is_animating());
    }

    #[test]
    fn offset_is_added_to_the_element_position() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);

        engine.scroll_to("#book".into(), ScrollOptions::with_offset(-80.0));
        platform.run_frames(300);

        assert!((platform.scroll_top() - 3120.0).abs() < SETTLE_EPSILON);
    }

    #[test]
    fn missing_anchor_is_a_no_op() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);
        platform.user_scroll(250.0);
        engine.on_native_scroll();

        engine.scroll_to("#nowhere".into(), ScrollOptions::with_offset(-80.0));
        engine.scroll_to("".into(), ScrollOptions::default());
        platform.run_frames(30);

        assert!(!engine.is_animating());
        assert_eq!(platform.scroll_top(), 250.0);
        assert_eq!(engine.target_offset(), 250.0);
    }

    #[test]
    fn first_frame_only_records_the_timestamp() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);
        engine.scroll_to("#services".into(), ScrollOptions::default());

        platform.run_frames(1);
        assert_eq!(platform.scroll_top(), 0.0);

        platform.run_frames(1);
        let expected = 900.0 * (1.0 - (-0.085 * 60.0 * FRAME_MS / 1000.0).exp());
        assert!((platform.scroll_top() - expected).abs() < 1e-9);
    }

    #[test]
    fn teardown_twice_leaves_nothing_behind() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);

        engine.teardown();
        engine.teardown();

        assert!(!engine.is_initialized());
        assert!(!engine.frame_pending());
        assert_eq!(platform.pending_frames(), 0);
        assert_eq!(platform.attached_listeners(), 0);
        assert!(platform.root_classes().is_empty());
    }

    #[test]
    fn second_initialize_keeps_a_single_loop() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);
        assert_eq!(platform.pending_frames(), 1);

        engine.initialize(ScrollConfig::default()).unwrap();
        assert_eq!(platform.pending_frames(), 1);
        assert_eq!(platform.attached_listeners(), 1);

        platform.run_frames(20);
        assert_eq!(platform.pending_frames(), 1);
    }

    #[test]
    fn invalid_config_leaves_engine_idle() {
        let platform = FakePlatform::landing_page();
        let engine = ScrollEngine::new(platform.clone());
        let config = ScrollConfig {
            lerp: 0.0,
            ..ScrollConfig::default()
        };

        assert!(matches!(
            engine.initialize(config),
            Err(ScrollError::InvalidConfig(_))
        ));
        assert!(!engine.is_initialized());
        assert_eq!(platform.pending_frames(), 0);
    }

    #[test]
    fn newest_target_wins() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);

        engine.scroll_to("#services".into(), ScrollOptions::default());
        platform.run_frames(5);
        engine.scroll_to("#reviews".into(), ScrollOptions::default());
        platform.run_frames(300);

        assert!((platform.scroll_top() - 1800.0).abs() < SETTLE_EPSILON);
    }

    #[test]
    fn destination_is_clamped_to_the_scroll_limit() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);

        engine.scroll_to("#footer".into(), ScrollOptions::default());
        assert_eq!(engine.target_offset(), platform.scroll_limit());

        engine.scroll_to("#services".into(), ScrollOptions::with_offset(-2000.0));
        assert_eq!(engine.target_offset(), 0.0);
    }

    #[test]
    fn keywords_resolve_to_document_edges() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);

        engine.scroll_to("bottom".into(), ScrollOptions::default());
        assert_eq!(engine.target_offset(), platform.scroll_limit());
        engine.scroll_to("top".into(), ScrollOptions::default());
        assert_eq!(engine.target_offset(), 0.0);
    }

    #[test]
    fn non_finite_offset_leaves_the_engine_usable() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);

        engine.scroll_to("#book".into(), ScrollOptions::with_offset(f64::NAN));
        engine.scroll_to("#faq".into(), ScrollOptions::with_offset(f64::INFINITY));
        platform.run_frames(300);
        assert!(!engine.is_animating());
        assert_eq!(engine.target_offset(), 0.0);
        assert_eq!(platform.scroll_top(), 0.0);

        engine.scroll_to("#services".into(), ScrollOptions::default());
        platform.run_frames(300);
        assert!((platform.scroll_top() - 900.0).abs() < SETTLE_EPSILON);
        assert!(engine.on_wheel(100.0));
        assert_eq!(engine.target_offset(), 1000.0);
    }

    #[test]
    fn non_finite_wheel_delta_is_not_consumed() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);

        assert!(!engine.on_wheel(f64::NAN));
        assert!(!engine.on_wheel(f64::NEG_INFINITY));
        assert_eq!(engine.target_offset(), 0.0);
        assert!(!engine.is_animating());
    }

    #[test]
    fn resolves_against_the_current_scroll_position() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);
        platform.user_scroll(1000.0);
        engine.on_native_scroll();

        engine.scroll_to("#services".into(), ScrollOptions::default());
        assert_eq!(engine.target_offset(), 900.0);
        platform.run_frames(300);
        assert!((platform.scroll_top() - 900.0).abs() < SETTLE_EPSILON);
    }

    #[test]
    fn wheel_moves_target_by_multiplier() {
        let platform = FakePlatform::landing_page();
        let engine = ScrollEngine::new(platform.clone());
        engine
            .initialize(ScrollConfig {
                wheel_multiplier: 2.0,
                ..ScrollConfig::default()
            })
            .unwrap();

        assert!(engine.on_wheel(100.0));
        assert!(engine.on_wheel(20.0));
        assert_eq!(engine.target_offset(), 240.0);
        assert!(engine.on_wheel(-1000.0));
        assert_eq!(engine.target_offset(), 0.0);
    }

    #[test]
    fn wheel_passes_through_when_smoothing_is_off() {
        let platform = FakePlatform::landing_page();
        let engine = ScrollEngine::new(platform.clone());
        engine
            .initialize(ScrollConfig {
                smooth_wheel: false,
                ..ScrollConfig::default()
            })
            .unwrap();

        assert!(!engine.on_wheel(120.0));
        assert_eq!(engine.target_offset(), 0.0);
        assert!(!platform.root_classes().contains(WHEEL_CLASS));
    }

    #[test]
    fn native_scroll_is_ignored_while_animating() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);
        engine.scroll_to("#services".into(), ScrollOptions::default());
        platform.run_frames(3);

        platform.user_scroll(40.0);
        engine.on_native_scroll();
        assert_eq!(engine.target_offset(), 900.0);
    }

    #[test]
    fn root_classes_follow_the_animation() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);
        assert!(platform.root_classes().contains(ROOT_CLASS));
        assert!(platform.root_classes().contains(WHEEL_CLASS));

        engine.scroll_to("#services".into(), ScrollOptions::default());
        assert!(platform.root_classes().contains(SCROLLING_CLASS));
        platform.run_frames(300);
        assert!(!platform.root_classes().contains(SCROLLING_CLASS));
    }

    #[test]
    fn dropping_the_engine_cancels_its_frame() {
        let platform = FakePlatform::landing_page();
        let engine = running(&platform);
        drop(engine);

        assert_eq!(platform.pending_frames(), 0);
        assert_eq!(platform.attached_listeners(), 0);
    }

    #[test]
    fn wheel_deltas_are_normalized_to_pixels() {
        assert_eq!(normalize_wheel_delta(53.0, 0, 800.0), 53.0);
        assert!((normalize_wheel_delta(3.0, 1, 800.0) - 50.0).abs() < 1e-9);
        assert_eq!(normalize_wheel_delta(-1.0, 2, 800.0), -800.0);
    }
}
