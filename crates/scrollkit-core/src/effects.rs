//! Secondary styles that follow the scroll offset directly

use serde::Serialize;

use crate::config::EffectsConfig;

/// Cosmetic state derived from the offset alone (no direction)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollEffects {
    /// Navbar uses its condensed style
    pub navbar_compact: bool,
    /// Background layer displacement in pixels
    pub parallax_offset: f64,
}

impl ScrollEffects {
    pub fn from_offset(offset: u32, config: &EffectsConfig) -> Self {
        Self {
            navbar_compact: offset > config.compact_navbar,
            parallax_offset: offset as f64 * config.parallax_factor,
        }
    }
}
