use crate::ui::layout::centered_rect;
use crate::ui::text_layout::{truncate_line, wrap_text};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_status_line(frame: &mut Frame<'_>, area: Rect, status: &str) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let text = truncate_line(status, area.width as usize);
    frame.render_widget(
        Paragraph::new(text).style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(24, 24, 24))
                .add_modifier(Modifier::BOLD),
        ),
        area,
    );
}

pub fn render_key_hints(frame: &mut Frame<'_>, area: Rect, hints: &str) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    frame.render_widget(
        Paragraph::new(truncate_line(hints, area.width as usize))
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Largest useful scroll offset for `total` rows in a `viewport`.
pub fn clamp_scroll(scroll: usize, total: usize, viewport: usize) -> usize {
    scroll.min(total.saturating_sub(viewport))
}

/// Single-line path prompt drawn over the current screen.
pub fn render_file_prompt(frame: &mut Frame<'_>, path: &str, cursor_byte: usize) {
    let area = centered_rect(frame.area(), 72, 5);
    if area.width <= 4 || area.height < 3 {
        return;
    }
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Cargar Archivo")
        .style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field_width = inner.width.saturating_sub(8).max(1) as usize;
    let wrapped = wrap_text(path, usize::MAX, cursor_byte);
    let line = wrapped.lines.first().cloned().unwrap_or_default();
    let skip = wrapped.cursor_col.saturating_sub(field_width.saturating_sub(1));
    let visible: String = line.chars().skip(skip).collect();

    let lines = vec![
        Line::from(format!("Ruta: {visible}")),
        Line::styled(
            "enter cargar   esc cancelar",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    let cursor_x = inner
        .x
        .saturating_add(6 + (wrapped.cursor_col - skip) as u16)
        .min(inner.x.saturating_add(inner.width.saturating_sub(1)));
    frame.set_cursor_position((cursor_x, inner.y));
}
