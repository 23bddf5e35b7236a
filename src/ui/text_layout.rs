use unicode_width::UnicodeWidthChar;

/// Text soft-wrapped to a column width, with the cursor's visual position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

/// Wraps `text` at `width` display columns. Hard breaks are LF, CR or CRLF.
/// `cursor_byte` is clamped to a char boundary.
pub fn wrap_text(text: &str, width: usize, cursor_byte: usize) -> WrappedText {
    let width = width.max(1);
    let cursor_byte = clamp_to_char_boundary_left(text, cursor_byte);
    let mut lines = vec![String::new()];
    let mut used = 0usize;
    let mut cursor = None;
    let mut prev = None;

    for (idx, ch) in text.char_indices() {
        if idx == cursor_byte {
            cursor = Some((lines.len() - 1, used));
        }
        let after_cr = prev == Some('\r');
        prev = Some(ch);
        if ch == '\n' && after_cr {
            continue;
        }
        if ch == '\n' || ch == '\r' {
            lines.push(String::new());
            used = 0;
            continue;
        }

        let ch_width = char_display_width(ch);
        if used + ch_width > width && used > 0 {
            lines.push(String::new());
            used = 0;
        }
        if let Some(line) = lines.last_mut() {
            line.push(ch);
        }
        used += ch_width;
    }

    let (mut cursor_row, mut cursor_col) = cursor.unwrap_or((lines.len() - 1, used));
    if cursor_col >= width {
        cursor_row += 1;
        cursor_col = 0;
    }

    WrappedText {
        lines,
        cursor_row,
        cursor_col,
    }
}

/// Cuts `input` to `width` columns, ending in "..." when something was lost.
pub fn truncate_line(input: &str, width: usize) -> String {
    let width = width.max(1);
    if display_width(input) <= width {
        return input.to_string();
    }
    if width < 4 {
        return take_display_width(input, width);
    }
    let mut out = take_display_width(input, width - 3);
    out.push_str("...");
    out
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(char_display_width).sum()
}

fn take_display_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = char_display_width(ch);
        if used + ch_width > max_width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

fn clamp_to_char_boundary_left(input: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(input.len());
    while cursor > 0 && !input.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_is_one_break_and_lone_cr_is_one_break() {
        let wrapped = wrap_text("a\r\nb\rc", 10, 0);
        assert_eq!(wrapped.lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn long_lines_soft_wrap() {
        let wrapped = wrap_text("mkdisk -size=10", 6, 15);
        assert_eq!(wrapped.lines, vec!["mkdisk", " -size", "=10"]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (2, 3));
    }

    #[test]
    fn cursor_at_full_row_moves_to_next_row() {
        let wrapped = wrap_text("abcd", 4, 4);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 0));
    }

    #[test]
    fn cursor_after_newline_starts_next_row() {
        let wrapped = wrap_text("rep\n", 10, 4);
        assert_eq!(wrapped.lines, vec!["rep", ""]);
        assert_eq!((wrapped.cursor_row, wrapped.cursor_col), (1, 0));
    }

    #[test]
    fn truncate_line_marks_cut_text() {
        assert_eq!(truncate_line("Consola | motor", 40), "Consola | motor");
        assert_eq!(truncate_line("Consola | motor", 10), "Consola...");
        assert_eq!(truncate_line("Consola", 3), "Con");
    }
}
