use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub visibility: ScrollThresholds,
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub rate: RateConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory for the viewer log file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Offsets (in pixels) at which the navbar and back-to-top control change state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollThresholds {
    /// Back-to-top is shown strictly above this offset
    #[serde(default = "default_show_back_to_top")]
    pub show_back_to_top: u32,
    /// Navbar may hide only when scrolling down strictly above this offset
    #[serde(default = "default_hide_navbar")]
    pub hide_navbar: u32,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            show_back_to_top: default_show_back_to_top(),
            hide_navbar: default_hide_navbar(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Navbar switches to its compact style strictly above this offset
    #[serde(default = "default_compact_navbar")]
    pub compact_navbar: u32,
    /// Parallax displacement per scrolled pixel
    #[serde(default = "default_parallax_factor")]
    pub parallax_factor: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            compact_navbar: default_compact_navbar(),
            parallax_factor: default_parallax_factor(),
        }
    }
}

/// Easing curve used by smooth scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
    #[default]
    EaseInOutQuad,
}

/// Smooth scrolling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate programmatic scrolls (back-to-top, anchor jumps)
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of the back-to-top animation
    #[serde(default = "default_back_to_top_duration")]
    pub back_to_top_duration_ms: u64,
    /// Duration of an anchor jump animation
    #[serde(default = "default_anchor_duration")]
    pub anchor_duration_ms: u64,
    /// Anchor targets land this many pixels below the viewport top
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: u32,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            back_to_top_duration_ms: default_back_to_top_duration(),
            anchor_duration_ms: default_anchor_duration(),
            anchor_offset: default_anchor_offset(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateConfig {
    /// Minimum spacing between accepted mouse wheel steps
    #[serde(default = "default_wheel_throttle")]
    pub wheel_throttle_ms: u64,
    /// Quiet period before a terminal resize is applied
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
    /// Quiet period after which scrolling counts as settled
    #[serde(default = "default_scroll_settle")]
    pub scroll_settle_ms: u64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            wheel_throttle_ms: default_wheel_throttle(),
            resize_debounce_ms: default_resize_debounce(),
            scroll_settle_ms: default_scroll_settle(),
        }
    }
}

/// Largest accepted `ui.row_height_px`
pub const MAX_ROW_HEIGHT_PX: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixels represented by one terminal row
    #[serde(default = "default_row_height")]
    pub row_height_px: u32,
    /// Rows scrolled per key press or wheel step
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u32,
    /// Extra pixels around the viewport that count as visible for lazy items
    #[serde(default)]
    pub lazy_margin_px: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            row_height_px: default_row_height(),
            scroll_lines: default_scroll_lines(),
            lazy_margin_px: 0,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrollkit")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_show_back_to_top() -> u32 {
    300
}

fn default_hide_navbar() -> u32 {
    200
}

fn default_compact_navbar() -> u32 {
    50
}

fn default_parallax_factor() -> f64 {
    0.1
}

fn default_back_to_top_duration() -> u64 {
    800
}

fn default_anchor_duration() -> u64 {
    800
}

fn default_anchor_offset() -> u32 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_wheel_throttle() -> u64 {
    16 // one step per frame at ~60fps
}

fn default_resize_debounce() -> u64 {
    100
}

fn default_scroll_settle() -> u64 {
    250
}

fn default_tick_rate() -> u64 {
    100
}

fn default_row_height() -> u32 {
    20
}

fn default_scroll_lines() -> u32 {
    1
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path, or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Reject values that would make scroll math meaningless
    pub fn validate(&self) -> crate::Result<()> {
        if self.ui.row_height_px == 0 || self.ui.row_height_px > MAX_ROW_HEIGHT_PX {
            return Err(crate::Error::InvalidConfig {
                field: "ui.row_height_px",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_ROW_HEIGHT_PX, self.ui.row_height_px
                ),
            });
        }
        let factor = self.effects.parallax_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(crate::Error::InvalidConfig {
                field: "effects.parallax_factor",
                reason: format!("must be a finite non-negative number, got {}", factor),
            });
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollkit/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollkit")
            .join("config.toml")
    }

    /// Get the viewer log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("scrollkit.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
