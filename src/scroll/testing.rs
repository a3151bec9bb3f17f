//! Scripted document and manual frame scheduler for exercising the scroll
//! engine without a browser.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::{Rc, Weak};

use super::engine::{Platform, ScrollTarget, WeakEngine};

/// One 60Hz frame.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

type FrameCallback = Box<dyn FnOnce(f64)>;

struct Shared {
    scroll_top: Cell<f64>,
    viewport_height: f64,
    document_height: f64,
    anchors: HashMap<String, f64>,
    classes: RefCell<BTreeSet<String>>,
    pending: RefCell<BTreeMap<u64, FrameCallback>>,
    next_frame: Cell<u64>,
    listeners: Cell<usize>,
    clock: Cell<f64>,
}

#[derive(Clone)]
pub struct FakePlatform {
    shared: Rc<Shared>,
}

pub struct FakeFrame {
    id: u64,
    owner: Weak<Shared>,
}

impl Drop for FakeFrame {
    fn drop(&mut self) {
        if let Some(shared) = self.owner.upgrade() {
            shared.pending.borrow_mut().remove(&self.id);
        }
    }
}

pub struct FakeListeners {
    owner: Weak<Shared>,
}

impl Drop for FakeListeners {
    fn drop(&mut self) {
        if let Some(shared) = self.owner.upgrade() {
            shared.listeners.set(shared.listeners.get() - 1);
        }
    }
}

impl FakePlatform {
    pub fn new(document_height: f64, viewport_height: f64, anchors: &[(&str, f64)]) -> Self {
        Self {
            shared: Rc::new(Shared {
                scroll_top: Cell::new(0.0),
                viewport_height,
                document_height,
                anchors: anchors
                    .iter()
                    .map(|(selector, top)| (selector.to_string(), *top))
                    .collect(),
                classes: RefCell::new(BTreeSet::new()),
                pending: RefCell::new(BTreeMap::new()),
                next_frame: Cell::new(0),
                listeners: Cell::new(0),
                clock: Cell::new(0.0),
            }),
        }
    }

    /// 5000px page in an 800px viewport with the site's sections.
    pub fn landing_page() -> Self {
        Self::new(
            5000.0,
            800.0,
            &[
                ("#services", 900.0),
                ("#reviews", 1800.0),
                ("#faq", 2600.0),
                ("#book", 3200.0),
                ("#footer", 4900.0),
            ],
        )
    }

    /// Moves the page the way the user would, bypassing the engine.
    pub fn user_scroll(&self, top: f64) {
        self.set_scroll_top(top);
    }

    /// Fires every pending frame callback once per frame, `count` times.
    pub fn run_frames(&self, count: usize) {
        for _ in 0..count {
            let now = self.shared.clock.get() + FRAME_MS;
            self.shared.clock.set(now);
            let due = std::mem::take(&mut *self.shared.pending.borrow_mut());
            for (_, callback) in due {
                callback(now);
            }
        }
    }

    pub fn pending_frames(&self) -> usize {
        self.shared.pending.borrow().len()
    }

    pub fn attached_listeners(&self) -> usize {
        self.shared.listeners.get()
    }

    pub fn root_classes(&self) -> BTreeSet<String> {
        self.shared.classes.borrow().clone()
    }
}

impl Platform for FakePlatform {
    type Frame = FakeFrame;
    type Listeners = FakeListeners;

    fn scroll_top(&self) -> f64 {
        self.shared.scroll_top.get()
    }

    fn set_scroll_top(&self, top: f64) {
        self.shared
            .scroll_top
            .set(top.clamp(0.0, self.scroll_limit()));
    }

    fn scroll_limit(&self) -> f64 {
        (self.shared.document_height - self.shared.viewport_height).max(0.0)
    }

    fn viewport_top(&self, target: &ScrollTarget) -> Option<f64> {
        match target {
            ScrollTarget::Anchor(selector) => self
                .shared
                .anchors
                .get(selector)
                .map(|top| top - self.scroll_top()),
            // Element handles need a live DOM; BrowserPlatform resolves them
            // through the same bounding-rect lookup as selectors.
            ScrollTarget::Element(_) => None,
        }
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> FakeFrame {
        let id = self.shared.next_frame.get();
        self.shared.next_frame.set(id + 1);
        self.shared.pending.borrow_mut().insert(id, callback);
        FakeFrame {
            id,
            owner: Rc::downgrade(&self.shared),
        }
    }

    fn attach(&self, _engine: WeakEngine<Self>) -> FakeListeners {
        self.shared.listeners.set(self.shared.listeners.get() + 1);
        FakeListeners {
            owner: Rc::downgrade(&self.shared),
        }
    }

    fn toggle_root_class(&self, class: &str, on: bool) {
        let mut classes = self.shared.classes.borrow_mut();
        if on {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }
}
