use std::collections::HashMap;
use std::sync::Arc;

use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

use scrollkit_core::{
    AppConfig, LazyReveal, ScrollAnimator, ScrollEffects, ScrollVisibilityController,
    VisibilityBinding, VisibilityFlags, VisibilitySink,
};

use crate::document::{Block, Document, DocumentLayout};

/// Rows reserved above the document for the full-size navbar
pub const NAVBAR_ROWS: u16 = 3;

/// Visible state of the floating chrome, written only through [`VisibilitySink`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chrome {
    pub navbar_hidden: bool,
    pub back_to_top_visible: bool,
}

impl VisibilitySink for Chrome {
    fn apply(&mut self, flags: VisibilityFlags) {
        self.navbar_hidden = flags.navbar_hidden();
        self.back_to_top_visible = flags.back_to_top_visible();
    }
}

/// Result of revealing an image placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    Loaded { bytes: u64 },
    Missing(String),
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub document: Document,
    pub layout: DocumentLayout,
    /// Document area size in cells
    pub viewport_width: u16,
    pub viewport_height: u16,
    animator: ScrollAnimator,
    binding: VisibilityBinding<Chrome>,
    /// Offset last pushed through the binding
    last_synced: Option<u32>,
    pub effects: ScrollEffects,
    lazy: LazyReveal<usize>,
    /// Revealed images keyed by block index
    pub images: HashMap<usize, ImageState>,
    /// Scroll position changed since the last settle notification
    pub scrolling: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Where the back-to-top badge was last drawn, for click hit-testing
    pub back_to_top_area: Option<Rect>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, document: Document) -> Self {
        let controller = ScrollVisibilityController::new(config.visibility);
        let animator = ScrollAnimator::new(config.scroll.clone());
        let lazy = LazyReveal::new(config.ui.lazy_margin_px);
        let effects = ScrollEffects::from_offset(0, &config.effects);
        Self {
            config,
            document,
            layout: DocumentLayout::default(),
            viewport_width: 0,
            viewport_height: 0,
            animator,
            binding: VisibilityBinding::new(controller, Chrome::default()),
            last_synced: None,
            effects,
            lazy,
            images: HashMap::new(),
            scrolling: false,
            should_quit: false,
            status_message: None,
            pending_key: None,
            back_to_top_area: None,
        }
    }

    /// Re-lay out the document for a new viewport size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.layout = DocumentLayout::compute(&self.document, width, NAVBAR_ROWS);
        debug!(width, height, rows = self.layout.total_rows, "Document laid out");

        let row_height = self.row_height();
        self.lazy.clear();
        for (idx, block) in self.document.blocks.iter().enumerate() {
            if matches!(block, Block::Image { .. }) && !self.images.contains_key(&idx) {
                self.lazy.observe(
                    idx,
                    self.layout.tops[idx].saturating_mul(row_height),
                    self.layout.heights[idx].saturating_mul(row_height),
                );
            }
        }

        let max = self.max_offset();
        if self.offset() > max {
            self.animator.set_position(max);
        }
        self.sync_scroll();
        self.reveal_visible();
    }

    /// Pixels per terminal row
    #[inline]
    pub fn row_height(&self) -> u32 {
        self.config.ui.row_height_px.max(1)
    }

    /// Current scroll offset in pixels
    #[inline]
    pub fn offset(&self) -> u32 {
        self.animator.current()
    }

    /// First document row in view
    pub fn top_row(&self) -> u16 {
        (self.offset() / self.row_height()).min(u16::MAX as u32) as u16
    }

    /// Largest offset; the top row is capped at what `Paragraph::scroll` can address
    pub fn max_offset(&self) -> u32 {
        self.layout
            .total_rows
            .saturating_sub(self.viewport_height as u32)
            .min(u16::MAX as u32)
            .saturating_mul(self.row_height())
    }

    pub fn chrome(&self) -> Chrome {
        *self.binding.sink()
    }

    pub fn scroll_percent(&self) -> u8 {
        let max = self.max_offset();
        if max == 0 {
            100
        } else {
            (self.offset() as u64 * 100 / max as u64).min(100) as u8
        }
    }

    pub fn images_loaded(&self) -> usize {
        self.images.len()
    }

    /// Scroll by whole rows (negative scrolls up); stops any animation
    pub fn scroll_rows(&mut self, rows: i64) -> bool {
        let step = rows.saturating_mul(self.row_height() as i64);
        let target = (self.offset() as i64).saturating_add(step);
        let target = target.clamp(0, self.max_offset() as i64) as u32;
        self.set_position(target)
    }

    fn set_position(&mut self, offset: u32) -> bool {
        self.animator.set_position(offset);
        self.sync_scroll()
    }

    pub fn move_down(&mut self) -> bool {
        self.scroll_rows(self.config.ui.scroll_lines as i64)
    }

    pub fn move_up(&mut self) -> bool {
        self.scroll_rows(-(self.config.ui.scroll_lines as i64))
    }

    pub fn scroll_half_page_down(&mut self) -> bool {
        self.scroll_rows((self.viewport_height / 2).max(1) as i64)
    }

    pub fn scroll_half_page_up(&mut self) -> bool {
        self.scroll_rows(-((self.viewport_height / 2).max(1) as i64))
    }

    pub fn scroll_page_down(&mut self) -> bool {
        self.scroll_rows(self.viewport_height.max(1) as i64)
    }

    pub fn scroll_page_up(&mut self) -> bool {
        self.scroll_rows(-(self.viewport_height.max(1) as i64))
    }

    pub fn jump_to_top(&mut self) -> bool {
        self.set_position(0)
    }

    pub fn jump_to_bottom(&mut self) -> bool {
        let max = self.max_offset();
        self.set_position(max)
    }

    /// Animated return to the top; only available while the badge is shown
    pub fn back_to_top(&mut self) -> bool {
        if !self.chrome().back_to_top_visible {
            return false;
        }
        info!(from = self.offset(), "Back to top");
        let started = self.animator.scroll_to_top();
        if started {
            self.sync_scroll();
        }
        started
    }

    /// Animate to the next heading below the anchor line
    pub fn next_section(&mut self) -> bool {
        let row = self.anchor_row();
        let target = self.layout.next_heading(&self.document, row);
        self.jump_to_row(target)
    }

    /// Animate to the previous heading above the anchor line
    pub fn prev_section(&mut self) -> bool {
        let row = self.anchor_row();
        let target = self.layout.prev_heading(&self.document, row);
        self.jump_to_row(target)
    }

    /// Document row that sits where anchor jumps land
    fn anchor_row(&self) -> u32 {
        self.offset().saturating_add(self.config.scroll.anchor_offset) / self.row_height()
    }

    fn jump_to_row(&mut self, row: Option<u32>) -> bool {
        let anchor_top = row.map(|r| r.saturating_mul(self.row_height()));
        let max = self.max_offset();
        let started = self.animator.scroll_to_anchor(anchor_top, max);
        if started {
            self.sync_scroll();
        }
        started
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Tick interval while an animation runs
    pub fn animation_tick(&self) -> std::time::Duration {
        self.animator.frame_interval()
    }

    /// Advance a running animation; true if the offset moved
    pub fn tick_animation(&mut self) -> bool {
        if !self.animator.is_animating() {
            return false;
        }
        let max = self.max_offset();
        self.animator.update(max);
        self.sync_scroll()
    }

    /// Push the current offset through the visibility binding if it changed
    fn sync_scroll(&mut self) -> bool {
        let offset = self.offset();
        if self.last_synced == Some(offset) {
            return false;
        }
        let first = self.last_synced.is_none();
        self.last_synced = Some(offset);

        self.binding.handle_scroll(offset);
        self.effects = ScrollEffects::from_offset(offset, &self.config.effects);
        self.reveal_visible();
        if !first {
            self.scrolling = true;
        }
        true
    }

    fn reveal_visible(&mut self) {
        let viewport_px = (self.viewport_height as u32).saturating_mul(self.row_height());
        for idx in self.lazy.reveal(self.offset(), viewport_px) {
            self.load_image(idx);
        }
    }

    fn load_image(&mut self, idx: usize) {
        let Some(Block::Image { path, .. }) = self.document.blocks.get(idx) else {
            return;
        };
        let resolved = self.document.resolve(path);
        let state = match std::fs::metadata(&resolved) {
            Ok(meta) if meta.is_file() => ImageState::Loaded { bytes: meta.len() },
            Ok(_) => ImageState::Missing("not a file".to_string()),
            Err(e) => ImageState::Missing(e.to_string()),
        };
        debug!(path = %resolved.display(), ?state, "Image revealed");
        self.images.insert(idx, state);
    }

    /// Called once scrolling has been quiet for the settle period
    pub fn on_scroll_settled(&mut self) {
        if !self.scrolling {
            return;
        }
        self.scrolling = false;
        debug!(offset = self.offset(), percent = self.scroll_percent(), "Scroll settled");
    }

    /// Handle a left click; the back-to-top badge is the only target
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        match self.back_to_top_area {
            Some(area) if area.contains(Position { x: column, y: row }) => self.back_to_top(),
            _ => false,
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Clear the pending key
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn long_document(extra: &str) -> Document {
        let mut text = String::from("# Top\n");
        for i in 0..60 {
            text.push_str(&format!("paragraph line {}\n", i));
        }
        text.push_str("## Middle\n");
        for i in 0..60 {
            text.push_str(&format!("more text {}\n", i));
        }
        text.push_str(extra);
        Document::parse(&text, PathBuf::from("/nonexistent-scrollkit-dir"), "doc.txt")
    }

    fn app_with(config: AppConfig, document: Document) -> App {
        let mut app = App::new(Arc::new(config), document);
        app.resize(80, 20);
        app
    }

    fn instant_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.scroll.smooth_enabled = false;
        config
    }

    #[test]
    fn test_chrome_follows_scrolling() {
        let mut app = app_with(AppConfig::default(), long_document(""));
        assert_eq!(app.chrome(), Chrome::default());

        // 20px rows: 11 rows = 220px, past the hide threshold
        app.scroll_rows(11);
        assert!(app.chrome().navbar_hidden);
        assert!(!app.chrome().back_to_top_visible);

        app.scroll_rows(10);
        assert!(app.chrome().back_to_top_visible);

        app.move_up();
        assert!(!app.chrome().navbar_hidden);
        assert!(app.chrome().back_to_top_visible);
    }

    #[test]
    fn test_scroll_clamped_to_document() {
        let mut app = app_with(AppConfig::default(), long_document(""));
        assert!(!app.scroll_rows(-5));
        assert_eq!(app.offset(), 0);

        app.jump_to_bottom();
        assert_eq!(app.offset(), app.max_offset());
        assert_eq!(app.scroll_percent(), 100);
        assert!(!app.move_down());
    }

    #[test]
    fn test_back_to_top_requires_visible_badge() {
        let mut app = app_with(instant_config(), long_document(""));
        app.scroll_rows(5);
        assert!(!app.back_to_top());
        assert_eq!(app.offset(), 100);

        app.scroll_rows(20);
        assert!(app.back_to_top());
        assert_eq!(app.offset(), 0);
        assert!(!app.chrome().back_to_top_visible);
    }

    #[test]
    fn test_section_jumps_land_below_anchor_offset() {
        let mut app = app_with(instant_config(), long_document(""));
        let middle_row = app.layout.next_heading(&app.document, NAVBAR_ROWS as u32).unwrap();

        assert!(app.next_section());
        assert_eq!(app.offset(), middle_row * 20 - 100);

        assert!(app.prev_section());
        assert_eq!(app.offset(), 0);
    }

    #[test]
    fn test_missing_section_is_noop() {
        let mut app = app_with(instant_config(), long_document(""));
        app.jump_to_bottom();
        let before = app.offset();
        assert!(!app.next_section());
        assert_eq!(app.offset(), before);
    }

    #[test]
    fn test_images_revealed_when_scrolled_into_view() {
        let mut app = app_with(AppConfig::default(), long_document("![late](late.png)\n"));
        assert_eq!(app.images_loaded(), 0);

        app.jump_to_bottom();
        assert_eq!(app.images_loaded(), 1);
        let state = app.images.values().next().unwrap();
        assert!(matches!(state, ImageState::Missing(_)));
    }

    #[test]
    fn test_existing_image_reports_size() {
        let dir = std::env::temp_dir().join(format!("scrollkit-app-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("pic.png"), [0u8; 42]).unwrap();

        let document = Document::parse("# Pics\n![pic](pic.png)\n", dir.clone(), "pics");
        let app = app_with(AppConfig::default(), document);
        assert_eq!(app.images.get(&1), Some(&ImageState::Loaded { bytes: 42 }));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_huge_row_height_does_not_overflow() {
        // Bypasses validation, which would reject this value
        let mut config = AppConfig::default();
        config.ui.row_height_px = 100_000_000;
        config.scroll.anchor_offset = u32::MAX;
        config.scroll.smooth_enabled = false;
        let mut app = app_with(config, long_document("![late](late.png)\n"));

        app.jump_to_bottom();
        assert_eq!(app.offset(), u32::MAX);
        assert!(app.top_row() > 0);
        app.prev_section();
        app.next_section();
        app.move_up();
        assert!(app.offset() < u32::MAX);
    }

    #[test]
    fn test_max_offset_limited_to_addressable_rows() {
        let text = "x".repeat(70_000);
        let document = Document::parse(&text, PathBuf::from("."), "wide");
        let mut app = App::new(Arc::new(AppConfig::default()), document);
        app.resize(1, 10);
        assert_eq!(app.max_offset(), u16::MAX as u32 * 20);
        app.jump_to_bottom();
        assert_eq!(app.top_row(), u16::MAX);
    }

    #[test]
    fn test_settle_clears_scrolling_flag() {
        let mut app = app_with(AppConfig::default(), long_document(""));
        assert!(!app.scrolling);
        app.move_down();
        assert!(app.scrolling);
        app.on_scroll_settled();
        assert!(!app.scrolling);
    }

    #[test]
    fn test_click_on_badge_goes_to_top() {
        let mut app = app_with(instant_config(), long_document(""));
        app.scroll_rows(30);
        app.back_to_top_area = Some(Rect::new(70, 18, 8, 1));
        assert!(!app.click(0, 0));
        assert!(app.click(72, 18));
        assert_eq!(app.offset(), 0);
    }

    #[test]
    fn test_smooth_back_to_top_animates() {
        let mut app = app_with(AppConfig::default(), long_document(""));
        app.scroll_rows(30);
        assert!(app.back_to_top());
        assert!(app.is_animating());
        assert_eq!(app.offset(), 600);
    }
}
