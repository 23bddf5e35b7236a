use super::update::UiUpdate;
use crate::api::EngineClient;
use crate::batch::CommandBatch;
use crate::state::{ComponentHandle, ComponentId};
use std::future::Future;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Shared services passed into every `RuntimeMode` callback.
///
/// Every `spawn_*` call runs its work as a tokio task scoped to the
/// requesting component: when that component is torn down the task is
/// abandoned at its next await point and nothing is reported.
pub struct RuntimeContext {
    client: EngineClient,
    update_tx: mpsc::UnboundedSender<UiUpdate>,
}

impl RuntimeContext {
    pub fn new(client: EngineClient, update_tx: mpsc::UnboundedSender<UiUpdate>) -> Self {
        Self { client, update_tx }
    }

    pub fn engine_url(&self) -> &str {
        self.client.engine_url()
    }

    pub fn spawn_execute(&self, owner: &ComponentHandle, batch: CommandBatch) -> JoinHandle<()> {
        let client = self.client.clone();
        tracing::debug!(commands = batch.len(), "submitting command batch");
        self.spawn_scoped(
            owner,
            async move { client.execute(&batch).await },
            |component, result| UiUpdate::ExecutionFinished { component, result },
        )
    }

    pub fn spawn_fetch_disks(&self, owner: &ComponentHandle) -> JoinHandle<()> {
        let client = self.client.clone();
        self.spawn_scoped(
            owner,
            async move { client.fetch_disks().await },
            |component, result| UiUpdate::TopologyFetched { component, result },
        )
    }

    /// Reads `path` as text, replacing invalid UTF-8 sequences.
    pub fn spawn_load_file(&self, owner: &ComponentHandle, path: PathBuf) -> JoinHandle<()> {
        let read_path = path.clone();
        self.spawn_scoped(
            owner,
            async move {
                tokio::fs::read(&read_path)
                    .await
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .map_err(|error| error.to_string())
            },
            move |component, result| UiUpdate::FileLoaded {
                component,
                path,
                result,
            },
        )
    }

    fn spawn_scoped<T, F, U>(&self, owner: &ComponentHandle, work: F, into_update: U) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        U: FnOnce(ComponentId, T) -> UiUpdate + Send + 'static,
    {
        let component = owner.id();
        let token = owner.child_token();
        let update_tx = self.update_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(?component, "component torn down, dropping pending result");
                }
                value = work => {
                    if update_tx.send(into_update(component, value)).is_err() {
                        tracing::debug!(?component, "runtime gone, dropping result");
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockReply;
    use crate::api::mock_client::MockEngine;
    use std::io::Write;
    use std::sync::Arc;

    fn context_with(replies: Vec<MockReply>) -> (RuntimeContext, mpsc::UnboundedReceiver<UiUpdate>) {
        let client = EngineClient::new_mock(Arc::new(MockEngine::new(replies)));
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (RuntimeContext::new(client, update_tx), update_rx)
    }

    #[tokio::test]
    async fn execute_result_is_addressed_to_its_owner() {
        let (ctx, mut update_rx) = context_with(vec![MockReply::Json {
            status: 200,
            body: r#"{"messages":["Disco creado"]}"#.to_string(),
        }]);
        let owner = ComponentHandle::new();

        ctx.spawn_execute(&owner, vec!["mkdisk -size=5".to_string()])
            .await
            .expect("task");

        match update_rx.try_recv().expect("update") {
            UiUpdate::ExecutionFinished { component, result } => {
                assert_eq!(component, owner.id());
                assert_eq!(result.expect("messages"), vec!["Disco creado"]);
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[tokio::test]
    async fn torn_down_owner_receives_nothing() {
        let (ctx, mut update_rx) = context_with(vec![MockReply::Json {
            status: 200,
            body: "[]".to_string(),
        }]);
        let owner = ComponentHandle::new();
        let task = ctx.spawn_fetch_disks(&owner);
        drop(owner);

        task.await.expect("task");
        assert!(update_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn file_load_reports_content_and_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "mkdisk -size=3\r\nrep").expect("write");
        let (ctx, mut update_rx) = context_with(Vec::new());
        let owner = ComponentHandle::new();

        ctx.spawn_load_file(&owner, file.path().to_path_buf())
            .await
            .expect("task");

        match update_rx.try_recv().expect("update") {
            UiUpdate::FileLoaded { path, result, .. } => {
                assert_eq!(path, file.path());
                assert_eq!(result.expect("content"), "mkdisk -size=3\r\nrep");
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_reports_error_detail() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (ctx, mut update_rx) = context_with(Vec::new());
        let owner = ComponentHandle::new();

        ctx.spawn_load_file(&owner, dir.path().join("no-existe.smia"))
            .await
            .expect("task");

        match update_rx.try_recv().expect("update") {
            UiUpdate::FileLoaded { result, .. } => assert!(result.is_err()),
            other => panic!("unexpected update: {other:?}"),
        }
    }
}
