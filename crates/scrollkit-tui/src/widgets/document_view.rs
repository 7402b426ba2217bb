use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ImageState, NAVBAR_ROWS};
use crate::document::{wrap, Block};
use crate::theme::Theme;

pub struct DocumentWidget;

impl DocumentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let text = Self::build_text(app, theme);
        let paragraph = Paragraph::new(text)
            .style(Style::default().bg(theme.bg0).fg(theme.fg0))
            .scroll((app.top_row(), 0));
        frame.render_widget(paragraph, area);
    }

    /// One `Line` per layout row, so scroll rows match the layout exactly
    fn build_text<'a>(app: &App, theme: &Theme) -> Text<'a> {
        let width = app.layout.width;
        let mut lines: Vec<Line<'a>> = vec![Line::from(""); NAVBAR_ROWS as usize];

        for (idx, block) in app.document.blocks.iter().enumerate() {
            match block {
                Block::Heading { level, text } => {
                    let style = Style::default()
                        .fg(theme.heading(*level))
                        .add_modifier(Modifier::BOLD);
                    for row in wrap(text, width) {
                        lines.push(Line::from(Span::styled(row, style)));
                    }
                }
                Block::Text(text) => {
                    for row in wrap(text, width) {
                        lines.push(Line::from(row));
                    }
                }
                Block::Image { alt, path } => {
                    let frame_style = Style::default().fg(theme.grey0);
                    let (status, status_style) = match app.images.get(&idx) {
                        None => ("loading…".to_string(), Style::default().fg(theme.grey1)),
                        Some(ImageState::Loaded { bytes }) => (
                            format!("{} ({} bytes)", path.display(), bytes),
                            Style::default().fg(theme.green),
                        ),
                        Some(ImageState::Missing(reason)) => (
                            format!("{} unavailable: {}", path.display(), reason),
                            Style::default().fg(theme.red),
                        ),
                    };
                    lines.push(Line::from(vec![
                        Span::styled("┌ image ", frame_style),
                        Span::styled(alt.clone(), Style::default().fg(theme.fg1)),
                    ]));
                    lines.push(Line::from(vec![
                        Span::styled("│ ", frame_style),
                        Span::styled(status, status_style),
                    ]));
                    lines.push(Line::from(Span::styled("└", frame_style)));
                }
                Block::Blank => lines.push(Line::from("")),
            }
        }

        Text::from(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use ratatui::{backend::TestBackend, Terminal};
    use scrollkit_core::AppConfig;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_lines_follow_layout_rows() {
        let text: String = (0..50).map(|i| format!("line {}\n", i)).collect();
        let document = Document::parse(&format!("# Head\n{}", text), PathBuf::from("."), "doc");
        let mut app = App::new(Arc::new(AppConfig::default()), document);
        app.resize(30, 8);

        let theme = Theme::default();
        let text = DocumentWidget::build_text(&app, &theme);
        assert_eq!(text.lines.len() as u32, app.layout.total_rows);

        // 20px rows: 10 rows down puts "line 6" at the top
        app.scroll_rows(10);
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| DocumentWidget::render(frame, frame.area(), &app, &theme))
            .unwrap();
        assert_eq!(row_text(&terminal, 0), "line 6");
    }

    #[test]
    fn test_unrevealed_image_shows_loading() {
        let mut text = String::from("# Pics\n");
        for i in 0..40 {
            text.push_str(&format!("filler {}\n", i));
        }
        text.push_str("![chart](chart.png)\n");
        let document = Document::parse(&text, PathBuf::from("/nonexistent"), "doc");
        let mut app = App::new(Arc::new(AppConfig::default()), document);
        app.resize(30, 8);

        let theme = Theme::default();
        let rendered = DocumentWidget::build_text(&app, &theme);
        let image_top = app.layout.tops[41] as usize;
        assert_eq!(rendered.lines[image_top + 1].to_string(), "│ loading…");
    }
}
