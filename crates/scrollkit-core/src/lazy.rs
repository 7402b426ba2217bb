//! Viewport-triggered loading
//!
//! Items are registered with their vertical extent and reported the first
//! time any part of them enters the viewport. A reported item is dropped from
//! observation, so each one is loaded at most once.

#[derive(Debug, Clone)]
struct Observed<K> {
    key: K,
    top: u32,
    height: u32,
}

impl<K> Observed<K> {
    fn bottom(&self) -> u64 {
        self.top as u64 + self.height.max(1) as u64
    }
}

/// Tracks items waiting to become visible
#[derive(Debug, Clone)]
pub struct LazyReveal<K> {
    observed: Vec<Observed<K>>,
    margin: u32,
}

impl<K> Default for LazyReveal<K> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K> LazyReveal<K> {
    /// `margin` widens the viewport on both sides so items load slightly early
    pub fn new(margin: u32) -> Self {
        Self {
            observed: Vec::new(),
            margin,
        }
    }

    /// Start watching an item occupying `[top, top + height)`
    pub fn observe(&mut self, key: K, top: u32, height: u32) {
        self.observed.push(Observed { key, top, height });
    }

    /// Return every observed item intersecting the viewport and stop watching it
    pub fn reveal(&mut self, scroll: u32, viewport_height: u32) -> Vec<K> {
        let view_top = scroll.saturating_sub(self.margin) as u64;
        let view_bottom = scroll as u64 + viewport_height as u64 + self.margin as u64;

        let mut revealed = Vec::new();
        let mut remaining = Vec::with_capacity(self.observed.len());
        for item in self.observed.drain(..) {
            if item.bottom() > view_top && (item.top as u64) < view_bottom {
                revealed.push(item.key);
            } else {
                remaining.push(item);
            }
        }
        self.observed = remaining;
        revealed
    }

    /// Number of items not yet revealed
    #[inline]
    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn clear(&mut self) {
        self.observed.clear();
    }
}

impl<K: PartialEq> LazyReveal<K> {
    /// Stop watching an item without revealing it
    pub fn unobserve(&mut self, key: &K) {
        self.observed.retain(|item| &item.key != key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_only_intersecting_items() {
        let mut lazy = LazyReveal::new(0);
        lazy.observe("hero", 0, 200);
        lazy.observe("middle", 900, 100);
        lazy.observe("footer", 3000, 300);

        assert_eq!(lazy.reveal(0, 600), vec!["hero"]);
        assert_eq!(lazy.pending(), 2);
        assert_eq!(lazy.reveal(500, 600), vec!["middle"]);
        assert!(lazy.reveal(500, 600).is_empty());
    }

    #[test]
    fn test_each_item_revealed_once() {
        let mut lazy = LazyReveal::new(0);
        lazy.observe(1, 100, 50);
        assert_eq!(lazy.reveal(0, 400), vec![1]);
        assert!(lazy.reveal(0, 400).is_empty());
        assert!(lazy.is_empty());
    }

    #[test]
    fn test_edges_are_exclusive() {
        let mut lazy = LazyReveal::new(0);
        // Ends exactly where the viewport starts
        lazy.observe('a', 0, 100);
        // Starts exactly where the viewport ends
        lazy.observe('b', 400, 50);
        assert!(lazy.reveal(100, 300).is_empty());
    }

    #[test]
    fn test_margin_loads_early() {
        let mut lazy = LazyReveal::new(100);
        lazy.observe("below", 650, 20);
        assert_eq!(lazy.reveal(0, 600), vec!["below"]);
    }

    #[test]
    fn test_zero_height_item_still_revealed() {
        let mut lazy = LazyReveal::new(0);
        lazy.observe("marker", 10, 0);
        assert_eq!(lazy.reveal(0, 20), vec!["marker"]);
    }

    #[test]
    fn test_unobserve() {
        let mut lazy = LazyReveal::new(0);
        lazy.observe("x", 0, 10);
        lazy.unobserve(&"x");
        assert!(lazy.reveal(0, 100).is_empty());
    }
}
