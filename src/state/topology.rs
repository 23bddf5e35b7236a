use super::lifecycle::ComponentHandle;
use crate::api::TopologyError;
use crate::runtime::frontend::ScrollAction;
use crate::types::Disk;

/// Page-wide show/hide flag for every disk's partition block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionVisibility {
    #[default]
    Visible,
    Hidden,
}

impl PartitionVisibility {
    pub fn toggled(self) -> Self {
        match self {
            PartitionVisibility::Visible => PartitionVisibility::Hidden,
            PartitionVisibility::Hidden => PartitionVisibility::Visible,
        }
    }

    pub fn is_visible(self) -> bool {
        self == PartitionVisibility::Visible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Default)]
pub struct TopologyViewer {
    handle: ComponentHandle,
    disks: Vec<Disk>,
    error_message: Option<String>,
    partitions: PartitionVisibility,
    phase: FetchPhase,
    scroll: usize,
}

impl TopologyViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> &ComponentHandle {
        &self.handle
    }

    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn partitions(&self) -> PartitionVisibility {
        self.partitions
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_by(&mut self, action: ScrollAction) {
        self.scroll = action.apply(self.scroll);
    }

    /// True exactly once per viewer: the caller should then issue the fetch.
    pub fn begin_fetch(&mut self) -> bool {
        if self.phase != FetchPhase::Idle {
            return false;
        }
        self.phase = FetchPhase::Loading;
        true
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<Disk>, TopologyError>) {
        match result {
            Ok(disks) => {
                self.disks = disks;
                self.error_message = None;
                self.phase = FetchPhase::Loaded;
            }
            Err(error) => {
                tracing::warn!(%error, "topology fetch failed");
                self.disks.clear();
                self.error_message = Some(format!("Error al obtener los discos: {error}"));
                self.phase = FetchPhase::Failed;
            }
        }
    }

    pub fn toggle_partitions(&mut self) {
        self.partitions = self.partitions.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(size: i64) -> Disk {
        Disk {
            size,
            unit: "m".to_string(),
            fit: "ff".to_string(),
            path: None,
            partitions: None,
        }
    }

    #[test]
    fn toggle_pairs_return_to_initial_visible() {
        let mut viewer = TopologyViewer::new();
        assert_eq!(viewer.partitions(), PartitionVisibility::Visible);
        viewer.toggle_partitions();
        assert_eq!(viewer.partitions(), PartitionVisibility::Hidden);
        viewer.toggle_partitions();
        assert_eq!(viewer.partitions(), PartitionVisibility::Visible);
    }

    #[test]
    fn fetch_is_requested_only_once() {
        let mut viewer = TopologyViewer::new();
        assert!(viewer.begin_fetch());
        assert!(!viewer.begin_fetch());
        viewer.finish_fetch(Ok(vec![disk(10)]));
        assert!(!viewer.begin_fetch());
        assert_eq!(viewer.phase(), FetchPhase::Loaded);
        assert_eq!(viewer.disks().len(), 1);
    }

    #[test]
    fn empty_topology_is_reported_as_error() {
        let mut viewer = TopologyViewer::new();
        viewer.begin_fetch();
        viewer.finish_fetch(Err(TopologyError::Empty));
        assert!(viewer.disks().is_empty());
        assert_eq!(viewer.phase(), FetchPhase::Failed);
        assert_eq!(
            viewer.error_message(),
            Some("Error al obtener los discos: No hay discos disponibles en la respuesta.")
        );
    }
}
