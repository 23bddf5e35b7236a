use crate::state::ExecutionConsole;
use crate::ui::layout::split_console_layout;
use crate::ui::render::clamp_scroll;
use crate::ui::text_layout::wrap_text;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const CONSOLE_KEY_HINTS: &str =
    "ctrl+e ejecutar  ctrl+o cargar archivo  ctrl+z/y deshacer/rehacer  pgup/pgdn salida  f2 discos  ctrl+c salir";

pub fn file_name_line(console: &ExecutionConsole) -> String {
    match console.loaded_file_name() {
        Some(name) => format!("Archivo: {name}"),
        None => String::new(),
    }
}

pub fn render_console(
    frame: &mut Frame<'_>,
    body: Rect,
    console: &ExecutionConsole,
    show_cursor: bool,
) {
    let panes = split_console_layout(body);
    render_input_box(frame, panes.input, console, show_cursor);
    render_output_box(frame, panes.output, console);
    frame.render_widget(
        Paragraph::new(file_name_line(console)).style(Style::default().fg(Color::Cyan)),
        panes.file_line,
    );
}

fn render_input_box(frame: &mut Frame<'_>, area: Rect, console: &ExecutionConsole, show_cursor: bool) {
    let block = Block::default().borders(Borders::ALL).title("Entrada");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let wrapped = wrap_text(
        console.input_text(),
        inner.width as usize,
        console.input_cursor(),
    );
    let visible_rows = inner.height as usize;
    let window_start = wrapped
        .cursor_row
        .saturating_add(1)
        .saturating_sub(visible_rows);
    let rendered: Vec<Line> = wrapped
        .lines
        .iter()
        .skip(window_start)
        .take(visible_rows)
        .map(|line| Line::from(line.clone()))
        .collect();
    frame.render_widget(Paragraph::new(rendered), inner);

    if show_cursor {
        let cursor_y = inner
            .y
            .saturating_add((wrapped.cursor_row - window_start) as u16);
        let cursor_x = inner
            .x
            .saturating_add(wrapped.cursor_col as u16)
            .min(inner.x.saturating_add(inner.width.saturating_sub(1)));
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn render_output_box(frame: &mut Frame<'_>, area: Rect, console: &ExecutionConsole) {
    let title = if console.is_executing() {
        "Salida (ejecutando...)"
    } else {
        "Salida"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let wrapped = wrap_text(console.output_text(), inner.width as usize, 0);
    let scroll = clamp_scroll(
        console.output_scroll(),
        wrapped.lines.len(),
        inner.height as usize,
    );
    let rendered: Vec<Line> = wrapped
        .lines
        .into_iter()
        .skip(scroll)
        .take(inner.height as usize)
        .map(Line::from)
        .collect();
    frame.render_widget(Paragraph::new(rendered), inner);
}
