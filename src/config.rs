use log::{warn, Level};
use serde::{Deserialize, Serialize};

use crate::scroll::error::ScrollError;

/// Height of the fixed overlays that sit on top of the viewport. Anchored
/// navigation lands sections this far below the top edge.
pub const NAV_OFFSET: f64 = -80.0;

pub const PHONE_HREF: &str = "tel:+12812355708";

const SCROLL_CONFIG_META: &str = "meta[name=\"scroll-config\"]";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Interpolation factor per 60Hz frame. Smaller is smoother and slower.
    pub lerp: f64,
    pub smooth_wheel: bool,
    pub wheel_multiplier: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            lerp: 0.085,
            smooth_wheel: true,
            wheel_multiplier: 1.0,
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<(), ScrollError> {
        if !(self.lerp > 0.0 && self.lerp <= 1.0) {
            return Err(ScrollError::InvalidConfig(format!(
                "lerp must be in (0, 1], got {}",
                self.lerp
            )));
        }
        if !(self.wheel_multiplier.is_finite() && self.wheel_multiplier > 0.0) {
            return Err(ScrollError::InvalidConfig(format!(
                "wheel_multiplier must be positive, got {}",
                self.wheel_multiplier
            )));
        }
        Ok(())
    }
}

pub fn parse_scroll_config(raw: &str) -> Result<ScrollConfig, ScrollError> {
    let config: ScrollConfig = serde_json::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

/// Reads overrides from `<meta name="scroll-config" content='{...}'>` in
/// index.html. Falls back to the defaults when the tag is absent or broken.
pub fn scroll_config() -> ScrollConfig {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.query_selector(SCROLL_CONFIG_META).ok().flatten())
        .and_then(|meta| meta.get_attribute("content"));

    match raw {
        Some(raw) => parse_scroll_config(&raw).unwrap_or_else(|e| {
            warn!("Ignoring scroll-config meta tag: {}", e);
            ScrollConfig::default()
        }),
        None => ScrollConfig::default(),
    }
}
