//! Data bridge — forwards state snapshots from the tracker into the
//! TUI action loop.
//!
//! The tracker publishes immutable [`AppState`](runfly_core::AppState)
//! snapshots over a watch channel; this task turns each one into an
//! [`Action::StateChanged`] so screens update like any other event.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use runfly_core::HttpTracker;

use crate::action::Action;

/// Spawn the bridge task. It ends when the cancellation token fires,
/// the action channel closes, or the tracker's store is dropped.
pub fn spawn(
    tracker: &HttpTracker,
    action_tx: UnboundedSender<Action>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let mut stream = tracker.subscribe();

    tokio::spawn(async move {
        // Seed screens with the snapshot that existed before the
        // bridge started; changed() only reports later ones.
        let initial = stream.current().clone();
        if action_tx.send(Action::StateChanged(initial)).is_err() {
            return;
        }

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,

                changed = stream.changed() => {
                    let Some(snapshot) = changed else { break };
                    if action_tx.send(Action::StateChanged(snapshot)).is_err() {
                        break;
                    }
                }
            }
        }
        debug!("data bridge stopped");
    })
}
