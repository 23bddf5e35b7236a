use super::update::UiUpdate;
use tokio::sync::mpsc;

use super::{context::RuntimeContext, frontend::FrontendAdapter, mode::RuntimeMode};

/// Single-threaded UI loop: apply finished background work, draw, then
/// handle at most one input event per tick.
pub struct Runtime<M: RuntimeMode> {
    pub mode: M,
    update_rx: mpsc::UnboundedReceiver<UiUpdate>,
}

impl<M: RuntimeMode> Runtime<M> {
    pub fn new(mode: M, update_rx: mpsc::UnboundedReceiver<UiUpdate>) -> Self {
        Self { mode, update_rx }
    }

    pub async fn run<F: FrontendAdapter<M>>(&mut self, frontend: &mut F, ctx: &RuntimeContext) {
        self.mode.on_mount(ctx);
        loop {
            self.drain_updates(ctx);
            frontend.render(&self.mode);

            if let Some(event) = frontend.poll_user_input(&self.mode) {
                self.mode.on_frontend_event(event, ctx);
            }
            if frontend.should_quit() || self.mode.quit_requested() {
                break;
            }
            tokio::task::yield_now().await;
        }
        tracing::info!("ui loop finished");
    }

    /// Applies every update already queued; returns how many were applied.
    pub fn drain_updates(&mut self, ctx: &RuntimeContext) -> usize {
        let mut applied = 0;
        loop {
            match self.update_rx.try_recv() {
                Ok(update) => {
                    self.mode.on_update(update, ctx);
                    applied += 1;
                }
                Err(mpsc::error::TryRecvError::Empty)
                | Err(mpsc::error::TryRecvError::Disconnected) => break,
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockReply;
    use crate::api::mock_client::MockEngine;
    use crate::api::EngineClient;
    use crate::runtime::frontend::UserInputEvent;
    use std::collections::VecDeque;
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingMode {
        mounted: usize,
        events: Vec<UserInputEvent>,
    }

    impl RuntimeMode for CountingMode {
        fn on_mount(&mut self, _ctx: &RuntimeContext) {
            self.mounted += 1;
        }

        fn on_frontend_event(&mut self, event: UserInputEvent, _ctx: &RuntimeContext) {
            self.events.push(event);
        }

        fn on_update(&mut self, _update: UiUpdate, _ctx: &RuntimeContext) {}

        fn quit_requested(&self) -> bool {
            false
        }
    }

    struct ScriptedFrontend {
        events: VecDeque<UserInputEvent>,
        renders: usize,
    }

    impl FrontendAdapter<CountingMode> for ScriptedFrontend {
        fn poll_user_input(&mut self, _mode: &CountingMode) -> Option<UserInputEvent> {
            self.events.pop_front()
        }

        fn render(&mut self, _mode: &CountingMode) {
            self.renders += 1;
        }

        fn should_quit(&self) -> bool {
            self.events.is_empty()
        }
    }

    #[tokio::test]
    async fn run_mounts_once_and_feeds_events_until_quit() {
        let client = EngineClient::new_mock(Arc::new(MockEngine::new(Vec::<MockReply>::new())));
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let ctx = RuntimeContext::new(client, update_tx);
        let mut runtime = Runtime::new(CountingMode::default(), update_rx);
        let mut frontend = ScriptedFrontend {
            events: VecDeque::from(vec![UserInputEvent::Execute, UserInputEvent::NextScreen]),
            renders: 0,
        };

        runtime.run(&mut frontend, &ctx).await;

        assert_eq!(runtime.mode.mounted, 1);
        assert_eq!(
            runtime.mode.events,
            vec![UserInputEvent::Execute, UserInputEvent::NextScreen]
        );
        assert_eq!(frontend.renders, 2);
    }
}
