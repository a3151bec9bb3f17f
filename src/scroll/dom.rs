use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, WheelEvent, Window};

use super::engine::{normalize_wheel_delta, Platform, ScrollTarget, WeakEngine};
use super::error::ScrollError;

/// Elements marked with this attribute keep native wheel scrolling, e.g.
/// scrollable panels inside a modal.
const PREVENT_ATTRIBUTE: &str = "[data-scroll-prevent]";

pub struct BrowserPlatform {
    window: Window,
    document: Document,
    root: Element,
}

pub struct BrowserListeners {
    _wheel: EventListener,
    _scroll: EventListener,
}

impl BrowserPlatform {
    pub fn new() -> Result<Self, ScrollError> {
        let window = web_sys::window().ok_or(ScrollError::NoWindow)?;
        let document = window.document().ok_or(ScrollError::NoWindow)?;
        let root = document.document_element().ok_or(ScrollError::NoWindow)?;
        Ok(Self {
            window,
            document,
            root,
        })
    }

    fn viewport_height(window: &Window) -> f64 {
        window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }
}

impl Platform for BrowserPlatform {
    type Frame = AnimationFrame;
    type Listeners = BrowserListeners;

    fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn set_scroll_top(&self, top: f64) {
        let left = self.window.scroll_x().unwrap_or(0.0);
        self.window.scroll_to_with_x_and_y(left, top);
    }

    fn scroll_limit(&self) -> f64 {
        (f64::from(self.root.scroll_height()) - Self::viewport_height(&self.window)).max(0.0)
    }

    fn viewport_top(&self, target: &ScrollTarget) -> Option<f64> {
        let element = match target {
            // An invalid selector resolves to nothing rather than an error.
            ScrollTarget::Anchor(selector) => self.document.query_selector(selector).ok().flatten()?,
            ScrollTarget::Element(element) => element.clone(),
        };
        Some(element.get_bounding_client_rect().top())
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> AnimationFrame {
        request_animation_frame(callback)
    }

    fn attach(&self, engine: WeakEngine<Self>) -> BrowserListeners {
        let wheel = {
            let engine = engine.clone();
            let window = self.window.clone();
            EventListener::new_with_options(
                &self.window,
                "wheel",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(engine) = engine.upgrade() else {
                        return;
                    };
                    let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                        return;
                    };
                    // Pinch zoom arrives as ctrl+wheel.
                    if wheel.ctrl_key() {
                        return;
                    }
                    let opted_out = event
                        .target()
                        .and_then(|target| target.dyn_into::<Element>().ok())
                        .and_then(|element| element.closest(PREVENT_ATTRIBUTE).ok().flatten())
                        .is_some();
                    if opted_out {
                        return;
                    }

                    let delta = normalize_wheel_delta(
                        wheel.delta_y(),
                        wheel.delta_mode(),
                        Self::viewport_height(&window),
                    );
                    if engine.on_wheel(delta) {
                        wheel.prevent_default();
                    }
                },
            )
        };

        let scroll = EventListener::new(&self.window, "scroll", move |_| {
            if let Some(engine) = engine.upgrade() {
                engine.on_native_scroll();
            }
        });

        BrowserListeners {
            _wheel: wheel,
            _scroll: scroll,
        }
    }

    fn toggle_root_class(&self, class: &str, on: bool) {
        let _ = self.root.class_list().toggle_with_force(class, on);
    }
}
