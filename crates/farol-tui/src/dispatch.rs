//! Background execution of runtime calls.
//!
//! The dashboard loop never awaits the runtime itself. Each request runs
//! on its own task and reports back through the event channel. A mutating
//! action and the refresh that follows it run in the same task, so the
//! refresh always observes the runtime after the action returned.

use std::sync::Arc;

use farol_common::types::{ActionKind, Container};
use farol_runtime::actions::ActionExecutor;
use farol_runtime::command::CommandRunner;
use farol_runtime::inventory::InventoryBuilder;
use farol_runtime::store::InventoryStore;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::event::AppEvent;

/// An operator intent resolved to a concrete runtime call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    /// Start the container.
    Start(Container),
    /// Stop the container.
    Stop(Container),
    /// Remove the container.
    Remove(Container),
    /// Create a detached container.
    Create {
        /// Name for the new container.
        name: String,
        /// Image to run.
        image: String,
    },
    /// Read the live state of the container.
    Inspect(Container),
}

impl ActionRequest {
    /// The operation this request performs.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Start(_) => ActionKind::Start,
            Self::Stop(_) => ActionKind::Stop,
            Self::Remove(_) => ActionKind::Remove,
            Self::Create { .. } => ActionKind::Create,
            Self::Inspect(_) => ActionKind::Inspect,
        }
    }

    /// Name of the container the request is about.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Start(c) | Self::Stop(c) | Self::Remove(c) | Self::Inspect(c) => &c.name,
            Self::Create { name, .. } => name,
        }
    }
}

/// Spawns runtime calls and posts their results to the dashboard loop.
#[derive(Debug)]
pub struct Dispatcher<R> {
    executor: Arc<ActionExecutor<R>>,
    builder: Arc<InventoryBuilder<R>>,
    store: Arc<InventoryStore>,
    events: UnboundedSender<AppEvent>,
}

impl<R: CommandRunner> Dispatcher<R> {
    /// Creates a dispatcher sharing `runner` between actions and refreshes.
    #[must_use]
    pub fn new(runner: Arc<R>, store: Arc<InventoryStore>, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            executor: Arc::new(ActionExecutor::new(Arc::clone(&runner))),
            builder: Arc::new(InventoryBuilder::new(runner)),
            store,
            events,
        }
    }

    /// Runs `request` in the background; mutating requests are followed by
    /// a refresh once they succeed.
    pub fn dispatch(&self, request: ActionRequest) -> JoinHandle<()> {
        let executor = Arc::clone(&self.executor);
        let builder = Arc::clone(&self.builder);
        let store = Arc::clone(&self.store);
        let events = self.events.clone();

        tokio::spawn(async move {
            let kind = request.kind();
            let target = request.target().to_string();
            tracing::debug!(op = %kind, target = %target, "dispatching action");

            let result = match request {
                ActionRequest::Start(c) => executor.start(&c.id).await,
                ActionRequest::Stop(c) => executor.stop(&c.id).await,
                ActionRequest::Remove(c) => executor.remove(&c.id).await,
                ActionRequest::Create { name, image } => executor.create(&name, &image).await,
                ActionRequest::Inspect(container) => {
                    let running = executor.inspect(&container.id).await;
                    let _ = events.send(AppEvent::Inspected { container, running });
                    return;
                }
            };

            let succeeded = result.is_ok();
            if events.send(AppEvent::ActionFinished { kind, target, result }).is_err() {
                return;
            }
            if succeeded {
                let refreshed = store.refresh(&builder).await;
                let _ = events.send(AppEvent::Refreshed(refreshed));
            }
        })
    }

    /// Rebuilds the inventory in the background.
    pub fn refresh(&self) -> JoinHandle<()> {
        let builder = Arc::clone(&self.builder);
        let store = Arc::clone(&self.store);
        let events = self.events.clone();

        tokio::spawn(async move {
            let refreshed = store.refresh(&builder).await;
            let _ = events.send(AppEvent::Refreshed(refreshed));
        })
    }
}

#[cfg(test)]
mod tests {
    use farol_common::error::FarolError;
    use farol_common::types::ContainerId;
    use farol_runtime::snapshot::Snapshot;
    use farol_runtime::testing::{Reply, ScriptedRunner};
    use tokio::sync::mpsc;

    use super::*;

    fn web(running: bool) -> Container {
        Container {
            id: ContainerId::new("a1"),
            image: "nginx".into(),
            name: "web".into(),
            running,
        }
    }

    fn setup(runner: &Arc<ScriptedRunner>) -> (Dispatcher<ScriptedRunner>, Arc<InventoryStore>, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Arc::new(InventoryStore::new(Snapshot::empty()));
        (Dispatcher::new(Arc::clone(runner), Arc::clone(&store), tx), store, rx)
    }

    #[tokio::test]
    async fn successful_start_is_followed_by_refresh() {
        let runner = Arc::new(ScriptedRunner::with_listing("a1|nginx|web\n", "a1\n"));
        let (dispatcher, store, mut rx) = setup(&runner);

        dispatcher.dispatch(ActionRequest::Start(web(false))).await.unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(AppEvent::ActionFinished { kind: ActionKind::Start, result: Ok(()), .. })
        ));
        assert!(matches!(rx.recv().await, Some(AppEvent::Refreshed(Ok(_)))));
        assert_eq!(store.running().len(), 1);

        let calls = runner.call_lines();
        assert_eq!(calls[0], "start a1");
        assert!(calls[1].starts_with("ps -a"));
        assert!(calls[2].starts_with("ps --format"));
    }

    #[tokio::test]
    async fn failed_stop_skips_refresh() {
        let runner = Arc::new(
            ScriptedRunner::with_listing("a1|nginx|web\n", "a1\n")
                .on(&["stop"], Reply::Exit(1, "no such container".into())),
        );
        let (dispatcher, store, mut rx) = setup(&runner);

        dispatcher.dispatch(ActionRequest::Stop(web(true))).await.unwrap();

        match rx.recv().await {
            Some(AppEvent::ActionFinished { result: Err(FarolError::Action { output, .. }), .. }) => {
                assert!(output.contains("no such container"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(rx.try_recv().is_err());
        assert!(store.all().is_empty());
        assert_eq!(runner.call_lines(), vec!["stop a1"]);
    }

    #[tokio::test]
    async fn invalid_create_reports_validation_without_runtime_call() {
        let runner = Arc::new(ScriptedRunner::new());
        let (dispatcher, _store, mut rx) = setup(&runner);

        dispatcher
            .dispatch(ActionRequest::Create { name: String::new(), image: "nginx".into() })
            .await
            .unwrap();

        match rx.recv().await {
            Some(AppEvent::ActionFinished { result: Err(err), .. }) => assert!(err.is_validation()),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn inspect_reports_live_state_without_refresh() {
        let runner = Arc::new(ScriptedRunner::new().on(&["inspect"], Reply::Success("false\n".into())));
        let (dispatcher, _store, mut rx) = setup(&runner);

        dispatcher.dispatch(ActionRequest::Inspect(web(true))).await.unwrap();

        match rx.recv().await {
            Some(AppEvent::Inspected { container, running }) => {
                assert_eq!(container.name, "web");
                assert_eq!(running, Some(false));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn explicit_refresh_reports_query_errors() {
        let runner = Arc::new(ScriptedRunner::new().on(&["ps"], Reply::SpawnError("docker not found".into())));
        let (dispatcher, _store, mut rx) = setup(&runner);

        dispatcher.refresh().await.unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(AppEvent::Refreshed(Err(FarolError::RuntimeQuery { .. })))
        ));
    }

    #[test]
    fn request_reports_kind_and_target() {
        let create = ActionRequest::Create { name: "db".into(), image: "postgres".into() };
        assert_eq!(create.kind(), ActionKind::Create);
        assert_eq!(create.target(), "db");
        assert_eq!(ActionRequest::Remove(web(false)).target(), "web");
    }
}
