// ── Store handle ──
//
// Single writer over a `watch` channel of state snapshots. Dispatch
// folds the action inside `send_modify`, so concurrent dispatchers
// serialize on the channel's own lock and every subscriber observes
// whole snapshots only.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::Stream;
use tracing::trace;

use crate::action::Action;

use super::state::{reduce, AppState};

/// Handle to the application state. Cheap to clone; all clones share
/// the same snapshot channel.
#[derive(Clone)]
pub struct Store {
    tx: Arc<watch::Sender<Arc<AppState>>>,
}

impl Store {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(AppState::default()));
        Self { tx: Arc::new(tx) }
    }

    /// Fold one action into the current snapshot and publish the result.
    pub fn dispatch(&self, action: Action) {
        trace!(?action, "dispatch");
        self.tx.send_modify(|current| {
            *current = Arc::new(reduce(current, &action));
        });
    }

    /// The latest snapshot.
    pub fn state(&self) -> Arc<AppState> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.tx.subscribe())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscription to state snapshots.
///
/// Offers both point-in-time reads and change notification, either via
/// `changed()` or by converting into a `Stream`.
pub struct StateStream {
    current: Arc<AppState>,
    receiver: watch::Receiver<Arc<AppState>>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<AppState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time.
    pub fn current(&self) -> &Arc<AppState> {
        &self.current
    }

    /// The latest snapshot, which may be newer than `current()`.
    pub fn latest(&self) -> Arc<AppState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot. Returns `None` once the store has
    /// been dropped.
    pub async fn changed(&mut self) -> Option<Arc<AppState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` of snapshots for combinator use.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding a snapshot per published change.
pub struct StateWatchStream {
    inner: WatchStream<Arc<AppState>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<AppState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // `Arc<AppState>` is Unpin, so the inner WatchStream is too.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::ProjectId;
    use crate::store::Phase;
    use pretty_assertions::assert_eq;

    #[test]
    fn dispatch_publishes_a_new_snapshot() {
        let store = Store::new();
        let before = store.state();
        store.dispatch(Action::ProjectsLoad(Phase::Request));
        let after = store.state();

        assert!(after.projects.loading.is_requesting());
        // The earlier snapshot is untouched.
        assert!(!before.projects.loading.is_requesting());
    }

    #[test]
    fn clones_share_one_channel() {
        let store = Store::new();
        let other = store.clone();
        other.dispatch(Action::ProjectSelected(ProjectId::from("p1")));
        assert_eq!(store.state().projects.selected, Some(ProjectId::from("p1")));
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let store = Store::new();
        let mut sub = store.subscribe();
        assert_eq!(sub.current().projects.selected, None);

        store.dispatch(Action::ProjectSelected(ProjectId::from("p2")));
        let snap = sub.changed().await.unwrap();
        assert_eq!(snap.projects.selected, Some(ProjectId::from("p2")));
    }

    #[tokio::test]
    async fn changed_resolves_none_after_store_drop() {
        let store = Store::new();
        let mut sub = store.subscribe();
        drop(store);
        assert!(sub.changed().await.is_none());
    }
}
