use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

const LABEL: &str = " ▲ Top ";

pub struct BackToTopWidget;

impl BackToTopWidget {
    /// Draw the badge in the bottom-right corner of `area` and remember where
    /// it went so clicks can find it
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
        let width = LABEL.chars().count() as u16;
        if !app.chrome().back_to_top_visible || area.width < width + 2 || area.height < 2 {
            app.back_to_top_area = None;
            return;
        }

        let badge = Rect {
            x: area.right() - width - 2,
            y: area.bottom() - 2,
            width,
            height: 1,
        };
        frame.render_widget(Clear, badge);
        frame.render_widget(
            Paragraph::new(LABEL).style(
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            badge,
        );
        app.back_to_top_area = Some(badge);
    }
}
