use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use diskconsole::app::{build_runtime, TuiMode};
use diskconsole::config::Config;
use diskconsole::runtime::frontend::{FrontendAdapter, ScreenKind, ScrollAction, UserInputEvent};
use diskconsole::runtime::mode::RuntimeMode;
use diskconsole::telemetry;
use diskconsole::terminal::TerminalSession;
use diskconsole::ui::console::{render_console, CONSOLE_KEY_HINTS};
use diskconsole::ui::editor::EditAction;
use diskconsole::ui::layout::split_screen_layout;
use diskconsole::ui::render::{render_file_prompt, render_key_hints, render_status_line};
use diskconsole::ui::topology::{render_topology, TOPOLOGY_KEY_HINTS};
use ratatui::widgets::Clear;
use std::time::Duration;

const PAGE_ROWS: usize = 10;
const PROMPT_HINTS: &str = "enter cargar  esc cancelar  ctrl+c salir";

fn ctrl(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}

/// Keys that mean the same thing on every screen and inside the prompt.
fn map_global_key(key: &KeyEvent) -> Option<UserInputEvent> {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl(key) => Some(UserInputEvent::Interrupt),
        KeyCode::F(1) => Some(UserInputEvent::SwitchScreen(ScreenKind::Console)),
        KeyCode::F(2) => Some(UserInputEvent::SwitchScreen(ScreenKind::Topology)),
        _ => None,
    }
}

fn map_prompt_key(key: &KeyEvent) -> Option<UserInputEvent> {
    let edit = match key.code {
        KeyCode::Enter => return Some(UserInputEvent::Confirm),
        KeyCode::Esc => return Some(UserInputEvent::Cancel),
        KeyCode::Left => EditAction::Left,
        KeyCode::Right => EditAction::Right,
        KeyCode::Home => EditAction::LineStart,
        KeyCode::End => EditAction::LineEnd,
        KeyCode::Backspace => EditAction::Backspace,
        KeyCode::Delete => EditAction::Delete,
        _ => EditAction::Insert(plain_char(key)?.to_string()),
    };
    Some(UserInputEvent::Edit(edit))
}

fn map_console_key(key: &KeyEvent) -> Option<UserInputEvent> {
    if ctrl(key) {
        return match key.code {
            KeyCode::Char('e') => Some(UserInputEvent::Execute),
            KeyCode::Char('o') => Some(UserInputEvent::OpenFilePrompt),
            KeyCode::Char('z') => Some(UserInputEvent::Edit(EditAction::Undo)),
            KeyCode::Char('y') => Some(UserInputEvent::Edit(EditAction::Redo)),
            KeyCode::Home => Some(UserInputEvent::Scroll(ScrollAction::Home)),
            _ => None,
        };
    }

    let edit = match key.code {
        KeyCode::F(5) => return Some(UserInputEvent::Execute),
        KeyCode::PageUp => return Some(UserInputEvent::Scroll(ScrollAction::PageUp(PAGE_ROWS))),
        KeyCode::PageDown => {
            return Some(UserInputEvent::Scroll(ScrollAction::PageDown(PAGE_ROWS)))
        }
        KeyCode::Enter => EditAction::Newline,
        KeyCode::Left => EditAction::Left,
        KeyCode::Right => EditAction::Right,
        KeyCode::Up => EditAction::Up,
        KeyCode::Down => EditAction::Down,
        KeyCode::Home => EditAction::LineStart,
        KeyCode::End => EditAction::LineEnd,
        KeyCode::Backspace => EditAction::Backspace,
        KeyCode::Delete => EditAction::Delete,
        _ => EditAction::Insert(plain_char(key)?.to_string()),
    };
    Some(UserInputEvent::Edit(edit))
}

/// Tab is bound here only: leaving the console drops its input.
fn map_topology_key(key: &KeyEvent) -> Option<UserInputEvent> {
    match key.code {
        KeyCode::Tab => Some(UserInputEvent::NextScreen),
        KeyCode::Char(' ') | KeyCode::Char('t') | KeyCode::Enter => {
            Some(UserInputEvent::TogglePartitions)
        }
        KeyCode::Up => Some(UserInputEvent::Scroll(ScrollAction::LineUp)),
        KeyCode::Down => Some(UserInputEvent::Scroll(ScrollAction::LineDown)),
        KeyCode::PageUp => Some(UserInputEvent::Scroll(ScrollAction::PageUp(PAGE_ROWS))),
        KeyCode::PageDown => Some(UserInputEvent::Scroll(ScrollAction::PageDown(PAGE_ROWS))),
        KeyCode::Home => Some(UserInputEvent::Scroll(ScrollAction::Home)),
        _ => None,
    }
}

fn map_key(key: &KeyEvent, screen: ScreenKind, prompt_open: bool) -> Option<UserInputEvent> {
    if let Some(event) = map_global_key(key) {
        return Some(event);
    }
    if prompt_open {
        return map_prompt_key(key);
    }
    match screen {
        ScreenKind::Console => map_console_key(key),
        ScreenKind::Topology => map_topology_key(key),
    }
}

/// Pasted paths keep only their first line.
fn map_paste(text: String, screen: ScreenKind, prompt_open: bool) -> Option<UserInputEvent> {
    if prompt_open {
        let path = text.lines().next().unwrap_or_default().trim();
        if path.is_empty() {
            return None;
        }
        return Some(UserInputEvent::Edit(EditAction::Insert(path.to_string())));
    }
    match screen {
        ScreenKind::Console if !text.is_empty() => {
            Some(UserInputEvent::Edit(EditAction::Insert(text)))
        }
        _ => None,
    }
}

struct DconFrontend {
    session: TerminalSession,
    quit: bool,
}

impl DconFrontend {
    fn new() -> Result<Self> {
        Ok(Self {
            session: TerminalSession::start()?,
            quit: false,
        })
    }
}

impl FrontendAdapter<TuiMode> for DconFrontend {
    fn poll_user_input(&mut self, mode: &TuiMode) -> Option<UserInputEvent> {
        if mode.quit_requested() {
            self.quit = true;
            return None;
        }

        let Ok(has_event) = event::poll(Duration::from_millis(16)) else {
            self.quit = true;
            return None;
        };
        if !has_event {
            return None;
        }

        let Ok(ev) = event::read() else {
            self.quit = true;
            return None;
        };

        match ev {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                map_key(&key, mode.active_screen(), mode.overlay_active())
            }
            Event::Paste(text) => map_paste(text, mode.active_screen(), mode.overlay_active()),
            _ => None,
        }
    }

    fn render(&mut self, mode: &TuiMode) {
        let status = mode.status_line();
        let drawn = self.session.terminal_mut().draw(|frame| {
            let area = frame.area();
            frame.render_widget(Clear, area);
            let layout = split_screen_layout(area);

            render_status_line(frame, layout.header, &status);
            if let Some(console) = mode.console() {
                render_console(frame, layout.body, console, !mode.overlay_active());
            }
            if let Some(viewer) = mode.topology() {
                render_topology(frame, layout.body, viewer);
            }

            let hints = match (mode.overlay_active(), mode.active_screen()) {
                (true, _) => PROMPT_HINTS,
                (false, ScreenKind::Console) => CONSOLE_KEY_HINTS,
                (false, ScreenKind::Topology) => TOPOLOGY_KEY_HINTS,
            };
            render_key_hints(frame, layout.footer, hints);

            if let Some(prompt) = mode.file_prompt() {
                render_file_prompt(frame, prompt.text(), prompt.cursor());
            }
        });
        if let Err(error) = drawn {
            tracing::error!(%error, "terminal draw failed");
            self.quit = true;
        }
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    config.validate()?;
    if !telemetry::init_tracing(&config) {
        eprintln!(
            "dcon: no se pudo abrir el registro en {}; continuando sin registro",
            config.log_path.display()
        );
    }
    tracing::info!(engine = %config.engine_url, "starting dcon");

    let (mut runtime, ctx) = build_runtime(config)?;
    let mut frontend = DconFrontend::new()?;
    runtime.run(&mut frontend, &ctx).await;
    Ok(())
}
