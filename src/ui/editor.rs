#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub buffer: String,
    pub cursor: usize,
}

/// Editing operations the console input understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditAction {
    Insert(String),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    Undo,
    Redo,
}

/// Multi-line text buffer with a byte cursor that always sits on a char
/// boundary.
#[derive(Default, Debug, Clone)]
pub struct TextEditor {
    buffer: String,
    cursor: usize,
    undo_stack: Vec<EditorSnapshot>,
    redo_stack: Vec<EditorSnapshot>,
    /// Column Up/Down aim for; cleared by every other action.
    goal_column: Option<usize>,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the whole buffer (undoable) and parks the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.push_undo();
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    pub fn apply(&mut self, action: EditAction) {
        if !matches!(action, EditAction::Up | EditAction::Down) {
            self.goal_column = None;
        }
        match action {
            EditAction::Insert(text) => self.insert_str(&text),
            EditAction::Newline => self.insert_str("\n"),
            EditAction::Backspace => self.backspace(),
            EditAction::Delete => self.delete(),
            EditAction::Left => self.cursor = self.prev_char_boundary(self.cursor),
            EditAction::Right => self.cursor = self.next_char_boundary(self.cursor),
            EditAction::Up => self.move_vertical(false),
            EditAction::Down => self.move_vertical(true),
            EditAction::LineStart => self.cursor = self.line_start(self.cursor),
            EditAction::LineEnd => self.cursor = self.line_end(self.cursor),
            EditAction::Undo => self.undo(),
            EditAction::Redo => self.redo(),
        }
    }

    fn clamp_cursor_to_boundary_left(&self, mut idx: usize) -> usize {
        idx = idx.min(self.buffer.len());
        while idx > 0 && !self.buffer.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    }

    fn prev_char_boundary(&self, idx: usize) -> usize {
        let i = self.clamp_cursor_to_boundary_left(idx);
        self.buffer[..i]
            .char_indices()
            .next_back()
            .map(|(start, _)| start)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self, idx: usize) -> usize {
        let i = self.clamp_cursor_to_boundary_left(idx);
        match self.buffer[i..].chars().next() {
            Some(ch) => i + ch.len_utf8(),
            None => self.buffer.len(),
        }
    }

    fn line_start(&self, idx: usize) -> usize {
        let i = self.clamp_cursor_to_boundary_left(idx);
        self.buffer[..i].rfind('\n').map(|pos| pos + 1).unwrap_or(0)
    }

    fn line_end(&self, idx: usize) -> usize {
        let i = self.clamp_cursor_to_boundary_left(idx);
        self.buffer[i..]
            .find('\n')
            .map(|pos| i + pos)
            .unwrap_or(self.buffer.len())
    }

    fn move_vertical(&mut self, down: bool) {
        let start = self.line_start(self.cursor);
        let current = self.buffer[start..self.cursor].chars().count();
        let column = *self.goal_column.get_or_insert(current);

        let target_start = if down {
            let end = self.line_end(self.cursor);
            if end >= self.buffer.len() {
                return;
            }
            end + 1
        } else {
            if start == 0 {
                return;
            }
            self.line_start(start - 1)
        };

        let target_end = self.line_end(target_start);
        self.cursor = self.buffer[target_start..target_end]
            .char_indices()
            .nth(column)
            .map(|(offset, _)| target_start + offset)
            .unwrap_or(target_end);
    }

    fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            buffer: self.buffer.clone(),
            cursor: self.cursor,
        }
    }

    fn push_undo(&mut self) {
        self.undo_stack.push(self.snapshot());
        self.redo_stack.clear();
    }

    fn restore(&mut self, snap: EditorSnapshot) {
        self.buffer = snap.buffer;
        self.cursor = self.clamp_cursor_to_boundary_left(snap.cursor);
    }

    fn insert_str(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        let cursor = self.clamp_cursor_to_boundary_left(self.cursor);
        self.push_undo();
        self.buffer.insert_str(cursor, value);
        self.cursor = cursor + value.len();
    }

    fn backspace(&mut self) {
        let end = self.clamp_cursor_to_boundary_left(self.cursor);
        if end == 0 {
            return;
        }
        let start = self.prev_char_boundary(end);
        self.push_undo();
        self.buffer.replace_range(start..end, "");
        self.cursor = start;
    }

    fn delete(&mut self) {
        let start = self.clamp_cursor_to_boundary_left(self.cursor);
        if start >= self.buffer.len() {
            return;
        }
        let end = self.next_char_boundary(start);
        self.push_undo();
        self.buffer.replace_range(start..end, "");
        self.cursor = start;
    }

    fn undo(&mut self) {
        if let Some(previous) = self.undo_stack.pop() {
            self.redo_stack.push(self.snapshot());
            self.restore(previous);
        }
    }

    fn redo(&mut self) {
        if let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push(self.snapshot());
            self.restore(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextEditor {
        let mut editor = TextEditor::new();
        editor.apply(EditAction::Insert(text.to_string()));
        editor
    }

    #[test]
    fn backspace_and_delete_respect_multibyte_chars() {
        let mut editor = typed("tamaño");
        editor.apply(EditAction::Left);
        editor.apply(EditAction::Backspace);
        assert_eq!(editor.text(), "tamao");
        editor.apply(EditAction::Delete);
        assert_eq!(editor.text(), "tama");
    }

    #[test]
    fn vertical_moves_keep_column_and_clamp() {
        let mut editor = typed("mkdisk -size=10\nrep\nfdisk -size=5");
        editor.apply(EditAction::Up);
        assert_eq!(&editor.text()[editor.cursor()..], "\nfdisk -size=5");
        editor.apply(EditAction::Up);
        assert_eq!(editor.cursor(), 13);
        editor.apply(EditAction::Up);
        assert_eq!(editor.cursor(), 13);
        editor.apply(EditAction::Down);
        assert_eq!(editor.cursor(), 19);
        editor.apply(EditAction::Down);
        assert_eq!(editor.cursor(), editor.text().len());
    }

    #[test]
    fn horizontal_move_resets_goal_column() {
        let mut editor = typed("mkdisk -size=10\nrep\nfdisk -size=5");
        editor.apply(EditAction::Up);
        editor.apply(EditAction::Left);
        editor.apply(EditAction::Up);
        assert_eq!(editor.cursor(), 2);
        editor.apply(EditAction::Down);
        assert_eq!(&editor.text()[editor.cursor()..], "p\nfdisk -size=5");
    }

    #[test]
    fn line_start_and_end() {
        let mut editor = typed("a\nbcd");
        editor.apply(EditAction::LineStart);
        assert_eq!(editor.cursor(), 2);
        editor.apply(EditAction::LineEnd);
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn set_text_is_undoable() {
        let mut editor = typed("viejo");
        editor.set_text("nuevo\ncontenido");
        assert_eq!(editor.cursor(), editor.text().len());
        editor.apply(EditAction::Undo);
        assert_eq!(editor.text(), "viejo");
        editor.apply(EditAction::Redo);
        assert_eq!(editor.text(), "nuevo\ncontenido");
    }
}
