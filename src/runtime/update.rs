use crate::api::{ExecutionFailure, TopologyError};
use crate::state::ComponentId;
use crate::types::Disk;
use std::path::PathBuf;

/// Completion of background work, addressed to the component that asked.
#[derive(Debug)]
pub enum UiUpdate {
    ExecutionFinished {
        component: ComponentId,
        result: Result<Vec<String>, ExecutionFailure>,
    },
    TopologyFetched {
        component: ComponentId,
        result: Result<Vec<Disk>, TopologyError>,
    },
    FileLoaded {
        component: ComponentId,
        path: PathBuf,
        result: Result<String, String>,
    },
}

impl UiUpdate {
    pub fn component(&self) -> ComponentId {
        match self {
            UiUpdate::ExecutionFinished { component, .. }
            | UiUpdate::TopologyFetched { component, .. }
            | UiUpdate::FileLoaded { component, .. } => *component,
        }
    }
}
