use super::context::RuntimeContext;
use super::frontend::UserInputEvent;
use super::update::UiUpdate;

pub trait RuntimeMode {
    /// Called once before the first frame.
    fn on_mount(&mut self, _ctx: &RuntimeContext) {}
    fn on_frontend_event(&mut self, event: UserInputEvent, ctx: &RuntimeContext);
    fn on_update(&mut self, update: UiUpdate, ctx: &RuntimeContext);
    fn quit_requested(&self) -> bool;
}
