use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::engine::{Platform, ScrollEngine, ScrollOptions, ScrollTarget};
use super::error::ScrollError;
use crate::config::ScrollConfig;

/// What the coordinator needs from a mounted engine, independent of platform.
pub trait ScrollDriver {
    fn scroll_to(&self, target: ScrollTarget, options: ScrollOptions);
    fn teardown(&self);
}

impl<P: Platform> ScrollDriver for ScrollEngine<P> {
    fn scroll_to(&self, target: ScrollTarget, options: ScrollOptions) {
        ScrollEngine::scroll_to(self, target, options);
    }

    fn teardown(&self) {
        ScrollEngine::teardown(self);
    }
}

type EngineSlot = Rc<RefCell<Option<Rc<dyn ScrollDriver>>>>;

/// The `scroll_to` capability handed to components. Every clone refers to
/// the same mount, so equality is identity.
#[derive(Clone, Default)]
pub struct ScrollHandle {
    slot: EngineSlot,
}

impl PartialEq for ScrollHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl ScrollHandle {
    pub fn scroll_to(&self, target: impl Into<ScrollTarget>, options: ScrollOptions) {
        let driver = self.slot.borrow().clone();
        match driver {
            Some(driver) => driver.scroll_to(target.into(), options),
            None => debug!("No scroll engine mounted, ignoring scroll_to"),
        }
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

/// Owns the single engine of a mount and publishes its handle.
#[derive(Default)]
pub struct ScrollCoordinator {
    handle: ScrollHandle,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScrollHandle {
        self.handle.clone()
    }

    /// Builds and starts an engine, tearing down any previous one first.
    pub fn mount<P: Platform>(
        &self,
        platform: P,
        config: ScrollConfig,
    ) -> Result<ScrollEngine<P>, ScrollError> {
        self.unmount();
        let engine = ScrollEngine::new(platform);
        engine.initialize(config)?;
        let driver: Rc<dyn ScrollDriver> = Rc::new(engine.clone());
        *self.handle.slot.borrow_mut() = Some(driver);
        Ok(engine)
    }

    pub fn unmount(&self) {
        let previous = self.handle.slot.borrow_mut().take();
        if let Some(driver) = previous {
            driver.teardown();
        }
    }
}

impl Drop for ScrollCoordinator {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Turns an optional context lookup into the capability or the misuse error.
pub fn require_provider(context: Option<ScrollHandle>) -> Result<ScrollHandle, ScrollError> {
    context.ok_or(ScrollError::MissingProvider)
}
