use super::lifecycle::ComponentHandle;
use crate::api::ExecutionFailure;
use crate::batch::{split_commands, CommandBatch};
use crate::runtime::frontend::ScrollAction;
use crate::ui::editor::{EditAction, TextEditor};
use crate::util::display_file_name;
use std::path::{Path, PathBuf};

/// Shown in place of the output whenever an execution fails, whatever the
/// cause.
pub const EXECUTION_FAILURE_MESSAGE: &str = "Error al ejecutar los comandos.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteRejected {
    #[error("ya hay una ejecución en curso")]
    InFlight,
}

/// State of the command console: input buffer, last output, loaded file.
#[derive(Debug, Default)]
pub struct ExecutionConsole {
    handle: ComponentHandle,
    input: TextEditor,
    output_text: String,
    output_scroll: usize,
    loaded_file_name: Option<String>,
    pending_file: Option<PathBuf>,
    executing: bool,
}

impl ExecutionConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> &ComponentHandle {
        &self.handle
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    pub fn input_cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    pub fn output_scroll(&self) -> usize {
        self.output_scroll
    }

    pub fn loaded_file_name(&self) -> Option<&str> {
        self.loaded_file_name.as_deref()
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn edit(&mut self, action: EditAction) {
        self.input.apply(action);
    }

    pub fn scroll_output(&mut self, action: ScrollAction) {
        self.output_scroll = action.apply(self.output_scroll);
    }

    /// Derives the batch to submit. Only one execution may be outstanding.
    pub fn begin_execute(&mut self) -> Result<CommandBatch, ExecuteRejected> {
        if self.executing {
            return Err(ExecuteRejected::InFlight);
        }
        self.executing = true;
        Ok(split_commands(self.input.text()))
    }

    /// Replaces the output with the engine's messages or the fixed failure
    /// string.
    pub fn finish_execute(&mut self, result: Result<Vec<String>, ExecutionFailure>) {
        self.executing = false;
        self.output_scroll = 0;
        self.output_text = match result {
            Ok(messages) => messages.join("\n"),
            Err(failure) => {
                tracing::warn!(error = %failure, "command execution failed");
                EXECUTION_FAILURE_MESSAGE.to_string()
            }
        };
    }

    /// Records the chosen file's name; its content arrives through
    /// [`ExecutionConsole::finish_load_file`].
    pub fn begin_load_file(&mut self, path: &Path) -> String {
        let name = display_file_name(&path.to_string_lossy());
        self.loaded_file_name = Some(name.clone());
        self.pending_file = Some(path.to_path_buf());
        name
    }

    /// Overwrites the input with `content` if `path` is still the most recent
    /// selection. Returns false when the result was stale and ignored.
    pub fn finish_load_file(&mut self, path: &Path, content: String) -> bool {
        if self.pending_file.as_deref() != Some(path) {
            return false;
        }
        self.pending_file = None;
        self.input.set_text(content);
        true
    }

    pub fn abandon_load_file(&mut self, path: &Path) {
        if self.pending_file.as_deref() == Some(path) {
            self.pending_file = None;
        }
    }
}
