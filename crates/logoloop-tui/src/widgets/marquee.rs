//! Marquee panel: the scrolling track, hover tooltip and faded edges

use logoloop_core::marquee::timing::lerp;
use logoloop_core::marquee::{MarqueeItem, PlacedItem};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::themes::fade_color;

pub struct MarqueeWidget;

impl MarqueeWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        Self::render_to_buffer(frame.buffer_mut(), area, app);
    }

    /// Draw the panel into `buf`; `area` is the panel, `app.track` its inside
    pub fn render_to_buffer(buf: &mut Buffer, area: Rect, app: &App) {
        let theme = &app.theme;
        Block::default()
            .title(format!(" {} ", app.config.marquee.aria_label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey1))
            .style(Style::default().fg(theme.fg0).bg(theme.bg0))
            .render(area, buf);

        let track = app.track;
        if track.width == 0 || track.height == 0 {
            return;
        }

        let rows = app.item_rows().min(track.height);
        for placed in &app.placed {
            if let Some(item) = app.items.get(placed.key.item) {
                let hovered = app.hovered_item == Some(placed.key);
                draw_item(buf, track, rows, placed, item, hovered, app);
            }
        }

        if app.config.marquee.fade_out {
            fade_edges(buf, track, fade_color(&app.config.marquee, app.theme_mode()));
        }

        draw_tooltip(buf, track, rows, app);
    }
}

fn draw_item(
    buf: &mut Buffer,
    track: Rect,
    rows: u16,
    placed: &PlacedItem,
    item: &MarqueeItem,
    hovered: bool,
    app: &App,
) {
    let Some((start, end)) = placed.visible_span(track.width) else {
        return;
    };
    let theme = &app.theme;

    let mut style = if item.is_media() {
        Style::default().fg(theme.fg1).bg(theme.bg1)
    } else {
        Style::default().fg(theme.fg0)
    };
    if hovered && app.config.marquee.scale_on_hover {
        style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
    }

    let cells = label_cells(item.display_text(), placed.width);
    let label_row = track.y + rows.saturating_sub(1) / 2;

    for row in track.y..track.y + rows {
        for col in start..end {
            let Some(cell) = buf.cell_mut((track.x + col, row)) else {
                continue;
            };
            cell.set_style(style);
            if row != label_row {
                continue;
            }

            let idx = (col as i32 - placed.x) as usize;
            match cells.get(idx).copied().flatten() {
                // Wide glyph cut by the right edge
                Some(c) if c.width().unwrap_or(1) > 1 && col + 1 >= end => {
                    cell.set_char(' ');
                }
                Some(c) => {
                    cell.set_char(c);
                }
                // Second half of a wide glyph whose first half is scrolled out
                None if col == start => {
                    cell.set_char(' ');
                }
                None => {}
            }
        }
    }
}

/// Glyph per column for `text` centred in `width` columns
///
/// `None` marks the trailing column of a double-width glyph.
fn label_cells(text: &str, width: u16) -> Vec<Option<char>> {
    let width = width as usize;
    let mut glyphs: Vec<Option<char>> = Vec::with_capacity(width);

    let fits = text.width() <= width;
    let budget = if fits { width } else { width.saturating_sub(1) };
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if w == 0 {
            continue;
        }
        if glyphs.len() + w > budget {
            break;
        }
        glyphs.push(Some(c));
        if w > 1 {
            glyphs.push(None);
        }
    }
    if !fits && width > 0 {
        glyphs.push(Some('…'));
    }

    let pad = width.saturating_sub(glyphs.len());
    let left = pad / 2;
    let mut cells = vec![Some(' '); left];
    cells.extend(glyphs);
    cells.resize(width, Some(' '));
    cells
}

/// Columns blended at each edge: 8% of the width, between 2 and 12
pub fn fade_columns(width: u16) -> u16 {
    if width < 4 {
        return width / 2;
    }
    ((width as f32 * 0.08).round() as u16).clamp(2, 12)
}

fn blend(from: Color, to: Color, t: f64) -> Color {
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

fn fade_edges(buf: &mut Buffer, track: Rect, fade: Color) {
    let n = fade_columns(track.width);
    for i in 0..n {
        // 0 at the outer edge, approaching 1 towards the middle
        let t = (i as f64 + 0.5) / n as f64;
        for col in [track.x + i, track.right() - 1 - i] {
            for row in track.top()..track.bottom() {
                if let Some(cell) = buf.cell_mut((col, row)) {
                    cell.fg = blend(fade, cell.fg, t);
                    cell.bg = blend(fade, cell.bg, t);
                }
            }
        }
    }
}

fn draw_tooltip(buf: &mut Buffer, track: Rect, rows: u16, app: &App) {
    let row = track.y + rows;
    if row >= track.bottom() {
        return;
    }
    let Some(key) = app.hovered_item else {
        return;
    };
    let Some(placed) = app.placed.iter().find(|p| p.key == key) else {
        return;
    };
    let Some(label) = app.items.get(key.item).and_then(|item| item.tooltip()) else {
        return;
    };

    let text = format!(" {} ", label);
    let tw = text.width().min(track.width as usize) as i32;
    let center = placed.x + placed.width as i32 / 2;
    let x = (center - tw / 2).clamp(0, track.width as i32 - tw);

    let style = Style::default()
        .fg(app.theme.tooltip_fg)
        .bg(app.theme.tooltip_bg);
    buf.set_stringn(track.x + x as u16, row, &text, tw as usize, style);
}
