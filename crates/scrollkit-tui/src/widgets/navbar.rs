use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, NAVBAR_ROWS};
use crate::theme::Theme;

pub struct NavbarWidget;

impl NavbarWidget {
    /// Draw the navbar over the top of `area`; hidden navbars draw nothing
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        if app.chrome().navbar_hidden || area.height == 0 {
            return;
        }

        let title = Span::styled(
            format!(" {} ", app.document.title),
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
        );

        if app.effects.navbar_compact {
            let bar = Rect { height: 1, ..area };
            frame.render_widget(Clear, bar);
            let line = Line::from(vec![
                Span::styled(" ≡", Style::default().fg(theme.accent)),
                title,
            ]);
            frame.render_widget(
                Paragraph::new(line).style(Style::default().bg(theme.bg2)),
                bar,
            );
            return;
        }

        let bar = Rect {
            height: NAVBAR_ROWS.min(area.height),
            ..area
        };
        frame.render_widget(Clear, bar);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(bar);
        frame.render_widget(block, bar);
        frame.render_widget(Paragraph::new(Line::from(title)), inner);
    }
}
