use super::mode::RuntimeMode;
use crate::ui::editor::EditAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Console,
    Topology,
}

impl ScreenKind {
    pub fn next(self) -> Self {
        match self {
            ScreenKind::Console => ScreenKind::Topology,
            ScreenKind::Topology => ScreenKind::Console,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ScreenKind::Console => "Consola",
            ScreenKind::Topology => "Discos",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    LineUp,
    LineDown,
    PageUp(usize),
    PageDown(usize),
    Home,
}

impl ScrollAction {
    /// New offset; the renderer clamps it against the content height.
    pub fn apply(self, offset: usize) -> usize {
        match self {
            ScrollAction::LineUp => offset.saturating_sub(1),
            ScrollAction::LineDown => offset.saturating_add(1),
            ScrollAction::PageUp(rows) => offset.saturating_sub(rows),
            ScrollAction::PageDown(rows) => offset.saturating_add(rows),
            ScrollAction::Home => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserInputEvent {
    Edit(EditAction),
    Execute,
    OpenFilePrompt,
    Confirm,
    Cancel,
    TogglePartitions,
    SwitchScreen(ScreenKind),
    NextScreen,
    Scroll(ScrollAction),
    Interrupt,
}

pub trait FrontendAdapter<M: RuntimeMode> {
    fn poll_user_input(&mut self, mode: &M) -> Option<UserInputEvent>;
    fn render(&mut self, mode: &M);
    fn should_quit(&self) -> bool;
}
