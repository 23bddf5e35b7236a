use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(u64);

/// Identity and cancellation scope of one mounted screen component.
///
/// Work spawned on behalf of a component carries its id and a child of its
/// token. Dropping the handle cancels the token, so outstanding tasks stop
/// without reporting back.
#[derive(Debug)]
pub struct ComponentHandle {
    id: ComponentId,
    token: CancellationToken,
}

impl ComponentHandle {
    pub fn new() -> Self {
        Self {
            id: ComponentId(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed)),
            token: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}

impl Default for ComponentHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ComponentHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
