use crate::api::EngineClient;
use crate::config::Config;
use crate::runtime::context::RuntimeContext;
use crate::runtime::frontend::{ScreenKind, UserInputEvent};
use crate::runtime::mode::RuntimeMode;
use crate::runtime::r#loop::Runtime;
use crate::runtime::UiUpdate;
use crate::state::{ComponentId, ExecutionConsole, TopologyViewer};
use crate::ui::editor::{EditAction, TextEditor};
use anyhow::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// The mounted screen. Replacing it drops the previous component, which
/// cancels whatever it still had in flight.
enum Screen {
    Console(ExecutionConsole),
    Topology(TopologyViewer),
}

impl Screen {
    fn mount(kind: ScreenKind) -> Self {
        match kind {
            ScreenKind::Console => Screen::Console(ExecutionConsole::new()),
            ScreenKind::Topology => Screen::Topology(TopologyViewer::new()),
        }
    }

    fn kind(&self) -> ScreenKind {
        match self {
            Screen::Console(_) => ScreenKind::Console,
            Screen::Topology(_) => ScreenKind::Topology,
        }
    }

    fn component(&self) -> ComponentId {
        match self {
            Screen::Console(console) => console.handle().id(),
            Screen::Topology(viewer) => viewer.handle().id(),
        }
    }
}

pub struct TuiMode {
    screen: Screen,
    file_prompt: Option<TextEditor>,
    notice: Option<String>,
    engine_url: String,
    quit: bool,
}

impl TuiMode {
    pub fn new(engine_url: impl Into<String>) -> Self {
        Self {
            screen: Screen::mount(ScreenKind::Console),
            file_prompt: None,
            notice: None,
            engine_url: engine_url.into(),
            quit: false,
        }
    }

    pub fn active_screen(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn console(&self) -> Option<&ExecutionConsole> {
        match &self.screen {
            Screen::Console(console) => Some(console),
            Screen::Topology(_) => None,
        }
    }

    pub fn topology(&self) -> Option<&TopologyViewer> {
        match &self.screen {
            Screen::Topology(viewer) => Some(viewer),
            Screen::Console(_) => None,
        }
    }

    pub fn overlay_active(&self) -> bool {
        self.file_prompt.is_some()
    }

    pub fn file_prompt(&self) -> Option<&TextEditor> {
        self.file_prompt.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn status_line(&self) -> String {
        let mut status = format!(
            "Proyecto 1 MIA | {} | motor: {}",
            self.screen.kind().title(),
            self.engine_url
        );
        if self.console().is_some_and(ExecutionConsole::is_executing) {
            status.push_str(" | ejecutando...");
        }
        if let Some(notice) = &self.notice {
            status.push_str(" | ");
            status.push_str(notice);
        }
        status
    }

    fn switch_to(&mut self, kind: ScreenKind, ctx: &RuntimeContext) {
        if self.screen.kind() == kind {
            return;
        }
        tracing::debug!(from = ?self.screen.kind(), to = ?kind, "switching screen");
        self.file_prompt = None;
        self.notice = None;
        self.screen = Screen::mount(kind);
        self.on_screen_shown(ctx);
    }

    fn on_screen_shown(&mut self, ctx: &RuntimeContext) {
        if let Screen::Topology(viewer) = &mut self.screen {
            if viewer.begin_fetch() {
                ctx.spawn_fetch_disks(viewer.handle());
            }
        }
    }

    fn on_prompt_event(&mut self, event: UserInputEvent, ctx: &RuntimeContext) {
        match event {
            UserInputEvent::Edit(EditAction::Newline) => {}
            UserInputEvent::Edit(action) => {
                if let Some(prompt) = self.file_prompt.as_mut() {
                    prompt.apply(action);
                }
            }
            UserInputEvent::Confirm => {
                let path = self
                    .file_prompt
                    .take()
                    .map(|prompt| prompt.text().trim().to_string())
                    .unwrap_or_default();
                if path.is_empty() {
                    return;
                }
                if let Screen::Console(console) = &mut self.screen {
                    let path = PathBuf::from(path);
                    let name = console.begin_load_file(&path);
                    tracing::info!(file = %name, "loading command file");
                    ctx.spawn_load_file(console.handle(), path);
                }
            }
            UserInputEvent::Cancel => self.file_prompt = None,
            _ => {}
        }
    }

    fn execute(&mut self, ctx: &RuntimeContext) {
        let Screen::Console(console) = &mut self.screen else {
            return;
        };
        match console.begin_execute() {
            Ok(batch) => {
                self.notice = None;
                ctx.spawn_execute(console.handle(), batch);
            }
            Err(rejected) => self.notice = Some(rejected.to_string()),
        }
    }
}

impl RuntimeMode for TuiMode {
    fn on_mount(&mut self, ctx: &RuntimeContext) {
        self.on_screen_shown(ctx);
    }

    fn on_frontend_event(&mut self, event: UserInputEvent, ctx: &RuntimeContext) {
        match event {
            UserInputEvent::Interrupt => {
                self.quit = true;
                return;
            }
            UserInputEvent::SwitchScreen(kind) => {
                self.switch_to(kind, ctx);
                return;
            }
            UserInputEvent::NextScreen => {
                self.switch_to(self.screen.kind().next(), ctx);
                return;
            }
            _ => {}
        }

        if self.file_prompt.is_some() {
            self.on_prompt_event(event, ctx);
            return;
        }

        match event {
            UserInputEvent::Execute => self.execute(ctx),
            UserInputEvent::OpenFilePrompt => {
                if self.console().is_some() {
                    self.file_prompt = Some(TextEditor::new());
                }
            }
            other => match (&mut self.screen, other) {
                (Screen::Console(console), UserInputEvent::Edit(action)) => console.edit(action),
                (Screen::Console(console), UserInputEvent::Scroll(action)) => {
                    console.scroll_output(action)
                }
                (Screen::Topology(viewer), UserInputEvent::TogglePartitions) => {
                    viewer.toggle_partitions()
                }
                (Screen::Topology(viewer), UserInputEvent::Scroll(action)) => {
                    viewer.scroll_by(action)
                }
                _ => {}
            },
        }
    }

    fn on_update(&mut self, update: UiUpdate, _ctx: &RuntimeContext) {
        if update.component() != self.screen.component() {
            tracing::debug!(component = ?update.component(), "update for a discarded component ignored");
            return;
        }

        match (&mut self.screen, update) {
            (Screen::Console(console), UiUpdate::ExecutionFinished { result, .. }) => {
                console.finish_execute(result);
                self.notice = None;
            }
            (Screen::Console(console), UiUpdate::FileLoaded { path, result, .. }) => match result {
                Ok(content) => {
                    if !console.finish_load_file(&path, content) {
                        tracing::debug!(path = %path.display(), "superseded file load ignored");
                    }
                }
                Err(detail) => {
                    tracing::warn!(path = %path.display(), %detail, "command file read failed");
                    console.abandon_load_file(&path);
                    self.notice = Some(format!("No se pudo leer el archivo: {detail}"));
                }
            },
            (Screen::Topology(viewer), UiUpdate::TopologyFetched { result, .. }) => {
                viewer.finish_fetch(result);
            }
            _ => {}
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Wires the engine client, update channel and initial screen together.
pub fn build_runtime(config: Config) -> Result<(Runtime<TuiMode>, RuntimeContext)> {
    let client = EngineClient::new(&config)?;
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let ctx = RuntimeContext::new(client, update_tx);
    let mode = TuiMode::new(config.engine_url);
    Ok((Runtime::new(mode, update_rx), ctx))
}
