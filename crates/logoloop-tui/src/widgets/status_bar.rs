use logoloop_core::config::Direction;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(Paragraph::new(Self::line(app, area.width)), area);
    }

    fn line(app: &App, width: u16) -> Line<'static> {
        let theme = &app.theme;
        let engine = &app.engine;

        let state_str = if engine.reduced_motion() {
            "STATIC"
        } else if engine.is_hovered() {
            "PAUSED"
        } else {
            "RUNNING"
        };
        let arrow = match engine.direction() {
            Direction::Left => "←",
            Direction::Right => "→",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else if let Some((href, label)) = app.hovered_link() {
            format!(" {} | {} → {}", state_str, label, href)
        } else {
            format!(
                " {} | {} {:.0} | copies: {}",
                state_str,
                arrow,
                engine.speed(),
                engine.layout().copy_count
            )
        };

        let help_hint = " q:quit space:pause r:reverse +/-:speed t:theme ?:help ";
        let padding_len =
            (width as usize).saturating_sub(status_text.width() + help_hint.width());

        Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logoloop_core::config::{AppConfig, MarqueeConfig};
    use logoloop_core::marquee::MarqueeItem;
    use std::sync::Arc;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_running_summary() {
        let app = App::new(Arc::new(AppConfig::default()));
        let line = text(&StatusBarWidget::line(&app, 100));
        assert!(line.starts_with(" RUNNING | ← 120 | copies: 2"), "{}", line);
        assert!(line.ends_with("?:help "));
    }

    #[test]
    fn test_status_message_wins() {
        let mut app = App::new(Arc::new(AppConfig {
            items: vec![MarqueeItem::inline("x")],
            marquee: MarqueeConfig {
                reduced_motion: true,
                ..Default::default()
            },
            ..Default::default()
        }));
        assert!(text(&StatusBarWidget::line(&app, 80)).starts_with(" STATIC"));
        app.set_status("Theme: light");
        assert!(text(&StatusBarWidget::line(&app, 80)).starts_with(" Theme: light"));
    }
}
