use crate::api::client::{EngineRoute, MockReply, MockResponder};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub type RecordedRequest = (EngineRoute, Option<Value>);

/// Scripted engine: answers requests from a queue and records what it saw.
#[derive(Clone)]
pub struct MockEngine {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockEngine {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl MockResponder for MockEngine {
    fn respond(&self, route: EngineRoute, payload: Option<&Value>) -> MockReply {
        self.requests.lock().unwrap().push((route, payload.cloned()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                MockReply::TransportFault("MockEngine: no more replies configured".to_string())
            })
    }
}
