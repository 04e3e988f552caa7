use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overview on top of the marquee
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keymap = &app.config.keymap;
        let area = frame.area();

        let popup_width = 56u16.min(area.width.saturating_sub(4));
        let popup_height = 16u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let bindings = [
            (keymap.quit.as_str(), "quit"),
            (keymap.toggle_pause.as_str(), "pause / resume"),
            (keymap.reverse_direction.as_str(), "reverse direction"),
            (keymap.speed_up.as_str(), "faster"),
            (keymap.speed_down.as_str(), "slower"),
            (keymap.toggle_reduced_motion.as_str(), "reduced motion"),
            (keymap.toggle_theme.as_str(), "light / dark"),
            (keymap.open_link.as_str(), "open hovered link"),
        ];

        let mut lines: Vec<Line> = bindings
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>10}  ", key),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*what, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("{}: {}", app.config.marquee.aria_label, app.accessible_labels().join(", ")),
            Style::default().fg(theme.grey1),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logoloop_core::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    #[test]
    fn test_centered_rect() {
        assert_eq!(centered_rect(10, 4, Rect::new(0, 0, 30, 10)), Rect::new(10, 3, 10, 4));
        assert_eq!(centered_rect(40, 4, Rect::new(0, 0, 30, 10)), Rect::new(0, 3, 40, 4));
    }

    #[test]
    fn test_help_lists_bindings() {
        let app = App::new(Arc::new(AppConfig::default()));
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| PopupWidget::render_help(frame, &app))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Help"));
        assert!(content.contains("reverse direction"));
        assert!(content.contains("<Space>"));
    }
}
