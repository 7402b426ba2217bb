use std::cell::{Cell, RefCell};
use std::io::Read;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use scrollkit_core::{
    AppConfig, ManualClock, ScrollEffects, ScrollVisibilityController, Throttle,
};

pub struct ReplayOptions {
    pub json: bool,
    /// Simulated time between consecutive offsets
    pub interval_ms: u64,
    pub throttle_ms: Option<u64>,
}

/// Controller output after one offset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayRow {
    pub offset: u32,
    /// False when the throttle dropped this offset
    pub handled: bool,
    pub navbar_hidden: bool,
    pub back_to_top_visible: bool,
    pub navbar_compact: bool,
    pub parallax_offset: f64,
}

pub fn run(config: &AppConfig, offsets: Vec<u32>, options: &ReplayOptions) -> Result<()> {
    let offsets = if offsets.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read offsets from stdin")?;
        parse_offsets(&input)?
    } else {
        offsets
    };

    if offsets.is_empty() {
        println!("No offsets given.");
        println!("\nPass them as arguments or on stdin:");
        println!("  scrollkit replay 0 250 400 150");
        return Ok(());
    }

    let rows = replay(config, &offsets, options);
    info!(
        offsets = rows.len(),
        handled = rows.iter().filter(|r| r.handled).count(),
        "Replay finished"
    );

    for row in &rows {
        if options.json {
            println!("{}", serde_json::to_string(row)?);
        } else {
            println!("{}", format_row(row));
        }
    }
    Ok(())
}

/// Parse whitespace-separated offsets
pub fn parse_offsets(input: &str) -> Result<Vec<u32>> {
    input
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .with_context(|| format!("Invalid scroll offset '{}'", token))
        })
        .collect()
}

/// Run offsets through a throttled controller on a simulated clock
pub fn replay(config: &AppConfig, offsets: &[u32], options: &ReplayOptions) -> Vec<ReplayRow> {
    let clock = ManualClock::new();
    let controller = Rc::new(RefCell::new(ScrollVisibilityController::new(
        config.visibility,
    )));
    let latest = Rc::new(Cell::new(0u32));

    let handler = {
        let controller = Rc::clone(&controller);
        let latest = Rc::clone(&latest);
        move || {
            controller.borrow_mut().on_scroll(latest.get());
        }
    };
    // A zero interval lets every call through
    let interval = Duration::from_millis(options.throttle_ms.unwrap_or(0));
    let mut throttle = Throttle::with_clock(handler, interval, clock.clone());

    let mut rows = Vec::with_capacity(offsets.len());
    for (i, &offset) in offsets.iter().enumerate() {
        if i > 0 {
            clock.advance_ms(options.interval_ms);
        }
        latest.set(offset);
        let handled = throttle.call();

        let controller = controller.borrow();
        let flags = controller.flags();
        let effects = ScrollEffects::from_offset(controller.state().offset(), &config.effects);
        rows.push(ReplayRow {
            offset,
            handled,
            navbar_hidden: flags.navbar_hidden(),
            back_to_top_visible: flags.back_to_top_visible(),
            navbar_compact: effects.navbar_compact,
            parallax_offset: effects.parallax_offset,
        });
    }
    rows
}

fn format_row(row: &ReplayRow) -> String {
    let navbar = match (row.navbar_hidden, row.navbar_compact) {
        (true, _) => "hidden",
        (false, true) => "compact",
        (false, false) => "shown",
    };
    let badge = if row.back_to_top_visible { "visible" } else { "hidden" };
    let mut line = format!(
        "{:>8}  navbar {:<7}  back-to-top {:<7}  parallax {:.1}",
        row.offset, navbar, badge, row.parallax_offset
    );
    if !row.handled {
        line.push_str("  (throttled)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(interval_ms: u64, throttle_ms: Option<u64>) -> ReplayOptions {
        ReplayOptions {
            json: false,
            interval_ms,
            throttle_ms,
        }
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!(parse_offsets(" 0 250\n400\t150 ").unwrap(), vec![0, 250, 400, 150]);
        assert!(parse_offsets("").unwrap().is_empty());
        assert!(parse_offsets("10 -5").is_err());
        assert!(parse_offsets("ten").is_err());
    }

    #[test]
    fn test_replay_scroll_sequence() {
        let rows = replay(&AppConfig::default(), &[0, 250, 400, 150], &options(0, None));
        let flags: Vec<(bool, bool)> = rows
            .iter()
            .map(|r| (r.back_to_top_visible, r.navbar_hidden))
            .collect();
        assert_eq!(flags, vec![(false, false), (false, true), (true, true), (false, false)]);
        assert!(rows.iter().all(|r| r.handled));
        assert!(!rows[0].navbar_compact);
        assert!(rows[1].navbar_compact);
        assert!((rows[2].parallax_offset - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_throttled_offsets_keep_previous_flags() {
        // Offsets 10ms apart against a 200ms throttle: only the first is handled
        let rows = replay(&AppConfig::default(), &[100, 250, 400], &options(10, Some(200)));
        assert!(rows[0].handled);
        assert!(!rows[1].handled);
        assert!(!rows[2].handled);
        assert!(!rows[2].back_to_top_visible);
        assert!(!rows[2].navbar_hidden);
    }

    #[test]
    fn test_throttle_reopens_after_interval() {
        let rows = replay(&AppConfig::default(), &[100, 400], &options(250, Some(200)));
        assert!(rows[1].handled);
        assert!(rows[1].back_to_top_visible);
        assert!(rows[1].navbar_hidden);
    }

    #[test]
    fn test_format_row_marks_throttled() {
        let row = ReplayRow {
            offset: 420,
            handled: false,
            navbar_hidden: false,
            back_to_top_visible: true,
            navbar_compact: true,
            parallax_offset: 42.0,
        };
        let line = format_row(&row);
        assert!(line.contains("navbar compact"));
        assert!(line.contains("back-to-top visible"));
        assert!(line.ends_with("(throttled)"));
    }

    #[test]
    fn test_json_row_fields() {
        let rows = replay(&AppConfig::default(), &[350], &options(0, None));
        let value: serde_json::Value = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(value["offset"], 350);
        assert_eq!(value["back_to_top_visible"], true);
        assert_eq!(value["navbar_hidden"], true);
    }
}
