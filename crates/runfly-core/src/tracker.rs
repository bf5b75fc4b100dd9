// ── Tracker facade ──
//
// Entry point for consumers: owns the store, the API service, and the
// background deploy watchers. UI layers clone the facade and call its
// methods; all results come back through the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::action::Action;
use crate::config::ServerConfig;
use crate::error::CoreError;
use crate::model::{ProjectId, RunId, User, UserAccess, UserId};
use crate::services::{CollaboratorsService, DeployService, ProjectsService};
use crate::store::{StateStream, Store};
use crate::workflows;

/// Tunables for the tracker facade.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Delay between deploy status polls.
    pub deploy_poll_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            deploy_poll_interval: Duration::from_secs(5),
        }
    }
}

/// One live deploy watcher. The generation guards cleanup: a watcher
/// replaced mid-flight must not remove its successor's entry.
struct DeployWatcher {
    token: CancellationToken,
    generation: u64,
}

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<TrackerInner>`. Generic over the service
/// bundle so tests drive it with scripted backends; production uses
/// the HTTP client from `runfly-api`.
pub struct Tracker<S> {
    inner: Arc<TrackerInner<S>>,
}

impl<S> Clone for Tracker<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct TrackerInner<S> {
    config: TrackerConfig,
    store: Store,
    api: S,
    cancel: CancellationToken,
    deploy_watchers: Mutex<HashMap<RunId, DeployWatcher>>,
    watcher_seq: AtomicU64,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl<S> Tracker<S> {
    pub fn new(api: S, config: TrackerConfig) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                config,
                store: Store::new(),
                api,
                cancel: CancellationToken::new(),
                deploy_watchers: Mutex::new(HashMap::new()),
                watcher_seq: AtomicU64::new(0),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    pub fn subscribe(&self) -> StateStream {
        self.inner.store.subscribe()
    }

    /// Stop all background watchers and wait for them to finish.
    pub async fn stop(&self) {
        self.inner.cancel.cancel();
        self.inner.deploy_watchers.lock().await.clear();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("tracker stopped");
    }
}

// ── Production wiring ─────────────────────────────────────────────

/// Tracker over the production HTTP client.
pub type HttpTracker = Tracker<runfly_api::ApiClient>;

impl HttpTracker {
    /// Build a tracker over the HTTP client a [`ServerConfig`] describes.
    pub fn connect(server: &ServerConfig, config: TrackerConfig) -> Result<Self, CoreError> {
        Ok(Self::new(server.api_client()?, config))
    }
}

// ── Catalogue ─────────────────────────────────────────────────────

impl<S: ProjectsService> Tracker<S> {
    pub async fn load_projects(&self) {
        workflows::projects::load_projects(&self.inner.store, &self.inner.api).await;
    }

    pub async fn load_runs(&self, project_id: &ProjectId) {
        workflows::projects::load_runs(&self.inner.store, &self.inner.api, project_id).await;
    }

    pub fn select_project(&self, project_id: ProjectId) {
        self.inner.store.dispatch(Action::ProjectSelected(project_id));
    }
}

// ── Collaboration ─────────────────────────────────────────────────

impl<S: CollaboratorsService> Tracker<S> {
    pub async fn send_invitation(&self, project_id: &ProjectId, email: &str, access: UserAccess) {
        workflows::collaboration::send_invitation(
            &self.inner.store,
            &self.inner.api,
            project_id,
            email,
            access,
        )
        .await;
    }

    pub async fn change_owner(&self, project_id: &ProjectId, email: &str) {
        workflows::collaboration::change_owner(&self.inner.store, &self.inner.api, project_id, email)
            .await;
    }

    pub async fn change_access(&self, project_id: &ProjectId, user: &User, access: UserAccess) {
        workflows::collaboration::change_access(
            &self.inner.store,
            &self.inner.api,
            project_id,
            user,
            access,
        )
        .await;
    }

    pub async fn remove_access(&self, project_id: &ProjectId, user_id: &UserId) {
        workflows::collaboration::remove_access(
            &self.inner.store,
            &self.inner.api,
            project_id,
            user_id,
        )
        .await;
    }

    pub async fn load_collaborators(&self, project_id: &ProjectId, author_id: &UserId) {
        workflows::collaboration::load_collaborators(
            &self.inner.store,
            &self.inner.api,
            project_id,
            author_id,
        )
        .await;
    }

    pub fn reset_invitation(&self) {
        workflows::collaboration::reset_invitation(&self.inner.store);
    }

    pub fn reset_owner_change(&self) {
        workflows::collaboration::reset_owner_change(&self.inner.store);
    }

    pub fn reset_access_change(&self, user_id: &UserId) {
        workflows::collaboration::reset_access_change(&self.inner.store, user_id);
    }

    pub fn reset_access_removal(&self, user_id: &UserId) {
        workflows::collaboration::reset_access_removal(&self.inner.store, user_id);
    }

    pub fn reset_collaborator_load(&self, project_id: &ProjectId) {
        workflows::collaboration::reset_collaborator_load(&self.inner.store, project_id);
    }
}

// ── Deployment ────────────────────────────────────────────────────

impl<S: DeployService + 'static> Tracker<S> {
    /// Open the deploy panel for a run. Unless a watcher is already
    /// reporting on it, the last known status is refreshed once so a
    /// reopened panel never shows stale data.
    pub async fn open_deploy_panel(&self, run_id: RunId) {
        self.inner
            .store
            .dispatch(Action::DeployPanelOpened(run_id.clone()));
        let watched = self.inner.deploy_watchers.lock().await.contains_key(&run_id);
        if !watched {
            workflows::deploy::refresh_status(&self.inner.store, &self.inner.api, &run_id).await;
        }
    }

    /// Close the deploy panel: stop the watcher, if any, then clear
    /// the panel state. A deploy already accepted server-side keeps
    /// going — only client-side observation ends here.
    pub async fn close_deploy_panel(&self, run_id: &RunId) {
        if let Some(watcher) = self.inner.deploy_watchers.lock().await.remove(run_id) {
            watcher.token.cancel();
            debug!(run_id = %run_id, "deploy watcher cancelled");
        }
        self.inner
            .store
            .dispatch(Action::DeployPanelClosed(run_id.clone()));
    }

    /// Start deployment and spawn the status watcher. A watcher
    /// already running for the same run is cancelled and replaced.
    pub async fn deploy(&self, run_id: RunId) {
        let token = self.inner.cancel.child_token();
        let generation = self.inner.watcher_seq.fetch_add(1, Ordering::Relaxed);
        {
            let mut watchers = self.inner.deploy_watchers.lock().await;
            if let Some(previous) = watchers.insert(
                run_id.clone(),
                DeployWatcher {
                    token: token.clone(),
                    generation,
                },
            ) {
                previous.token.cancel();
                debug!(run_id = %run_id, "deploy watcher replaced");
            }
        }

        let tracker = self.clone();
        let handle = tokio::spawn(async move {
            workflows::deploy::deploy_until_ready(
                &tracker.inner.store,
                &tracker.inner.api,
                &run_id,
                tracker.inner.config.deploy_poll_interval,
                token,
            )
            .await;

            let mut watchers = tracker.inner.deploy_watchers.lock().await;
            if watchers
                .get(&run_id)
                .is_some_and(|w| w.generation == generation)
            {
                watchers.remove(&run_id);
            }
        });
        self.inner.task_handles.lock().await.push(handle);
    }

    /// Tear down a live deployment.
    pub async fn shutdown_deployment(&self, run_id: &RunId) {
        workflows::deploy::shutdown(&self.inner.store, &self.inner.api, run_id).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{DeployStatusInfo, DeploymentMeta};
    use crate::store::select;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;

    fn deployed() -> DeployStatusInfo {
        DeployStatusInfo::Deployed {
            meta: DeploymentMeta {
                endpoint: "https://api.example.com/predict/r1".into(),
                token: None,
            },
        }
    }

    struct DeployStub {
        polls: StdMutex<VecDeque<DeployStatusInfo>>,
        fallback: DeployStatusInfo,
        status_calls: AtomicUsize,
    }

    impl DeployStub {
        fn endless_deploying() -> Self {
            Self {
                polls: StdMutex::new(VecDeque::new()),
                fallback: DeployStatusInfo::Deploying,
                status_calls: AtomicUsize::new(0),
            }
        }

        fn scripted(polls: Vec<DeployStatusInfo>) -> Self {
            Self {
                polls: StdMutex::new(polls.into()),
                fallback: DeployStatusInfo::Deploying,
                status_calls: AtomicUsize::new(0),
            }
        }

        fn status_calls(&self) -> usize {
            self.status_calls.load(Ordering::SeqCst)
        }
    }

    impl DeployService for Arc<DeployStub> {
        async fn deploy(&self, _run_id: &RunId) -> Result<DeployStatusInfo, runfly_api::Error> {
            Ok(DeployStatusInfo::Deploying)
        }

        async fn status(&self, _run_id: &RunId) -> Result<DeployStatusInfo, runfly_api::Error> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            let next = self.polls.lock().unwrap().pop_front();
            Ok(next.unwrap_or_else(|| self.fallback.clone()))
        }

        async fn shutdown(&self, _run_id: &RunId) -> Result<DeployStatusInfo, runfly_api::Error> {
            Ok(DeployStatusInfo::idle())
        }
    }

    fn quick_config() -> TrackerConfig {
        TrackerConfig {
            deploy_poll_interval: Duration::from_millis(50),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn open_panel_refreshes_stale_status() {
        let stub = Arc::new(DeployStub::scripted(vec![deployed()]));
        let tracker = Tracker::new(Arc::clone(&stub), quick_config());
        let r1 = RunId::from("r1");

        tracker.open_deploy_panel(r1.clone()).await;

        let state = tracker.store().state();
        assert_eq!(select::active_run(&state), Some(&r1));
        assert_eq!(select::deploy_status(&state, &r1), Some(&deployed()));
    }

    #[tokio::test(start_paused = true)]
    async fn deploy_reaches_deployed_and_clears_watcher() {
        let stub = Arc::new(DeployStub::scripted(vec![
            DeployStatusInfo::Deploying,
            deployed(),
        ]));
        let tracker = Tracker::new(Arc::clone(&stub), quick_config());
        let r1 = RunId::from("r1");

        tracker.deploy(r1.clone()).await;
        while select::deploy_status(&tracker.store().state(), &r1) != Some(&deployed()) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        // Terminal state observed; the watcher unregisters itself.
        while tracker.inner.deploy_watchers.lock().await.contains_key(&r1) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(stub.status_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn close_panel_stops_polling() {
        let stub = Arc::new(DeployStub::endless_deploying());
        let tracker = Tracker::new(Arc::clone(&stub), quick_config());
        let r1 = RunId::from("r1");

        tracker.open_deploy_panel(r1.clone()).await;
        tracker.deploy(r1.clone()).await;
        while stub.status_calls() < 3 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        tracker.close_deploy_panel(&r1).await;
        let calls_at_close = stub.status_calls();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(stub.status_calls(), calls_at_close);
        let state = tracker.store().state();
        assert_eq!(select::active_run(&state), None);
        // Last known status survives the close.
        assert_eq!(select::deploy_status(&state, &r1), Some(&DeployStatusInfo::Deploying));
    }

    #[tokio::test(start_paused = true)]
    async fn redeploy_replaces_the_watcher() {
        let stub = Arc::new(DeployStub::endless_deploying());
        let tracker = Tracker::new(Arc::clone(&stub), quick_config());
        let r1 = RunId::from("r1");

        tracker.deploy(r1.clone()).await;
        tracker.deploy(r1.clone()).await;

        let watchers = tracker.inner.deploy_watchers.lock().await;
        assert_eq!(watchers.len(), 1);
        drop(watchers);

        // Exactly one watcher keeps polling after the replacement.
        while stub.status_calls() < 2 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let sample_start = stub.status_calls();
        tokio::time::sleep(Duration::from_millis(200)).await;
        let polled = stub.status_calls() - sample_start;
        assert!(polled <= 5, "expected a single poller, saw {polled} polls in 200ms");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_joins_watchers_and_freezes_state() {
        let stub = Arc::new(DeployStub::endless_deploying());
        let tracker = Tracker::new(Arc::clone(&stub), quick_config());
        let r1 = RunId::from("r1");

        tracker.deploy(r1.clone()).await;
        while stub.status_calls() < 2 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        tracker.stop().await;
        let calls_at_stop = stub.status_calls();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(stub.status_calls(), calls_at_stop);
    }
}
