// ── Deployment workflows ──
//
// The poll loop is the one workflow with a lifetime beyond a single
// call: deploy, then observe status on an interval until a terminal
// state lands. Cancellation is checked before every await that could
// dispatch, so once the panel closes no further state change can come
// out of this task — terminal or not.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::model::{DeployStatusInfo, RunId};
use crate::services::DeployService;
use crate::store::{Phase, Store};

/// Deploy the run's model, then poll status until terminal.
///
/// Dispatches `Deploying` up front, the server's answer after the
/// deploy call, and every polled status after that. Returns when a
/// terminal status lands or `cancel` fires, whichever comes first.
pub async fn deploy_until_ready(
    store: &Store,
    service: &impl DeployService,
    run_id: &RunId,
    poll_interval: Duration,
    cancel: CancellationToken,
) {
    store.dispatch(Action::DeployStatusChanged {
        run_id: run_id.clone(),
        info: DeployStatusInfo::Deploying,
    });

    let accepted = tokio::select! {
        biased;
        () = cancel.cancelled() => return,
        result = service.deploy(run_id) => result,
    };
    if dispatch_poll(store, run_id, accepted) {
        return;
    }

    let mut interval = tokio::time::interval(poll_interval);
    interval.tick().await; // skip the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            _ = interval.tick() => {}
        }

        let polled = tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            result = service.status(run_id) => result,
        };
        if dispatch_poll(store, run_id, polled) {
            return;
        }
    }
}

/// Dispatch one poll outcome. Returns `true` when the loop must stop:
/// the status is terminal, or the call failed and the failure itself
/// is the terminal state.
fn dispatch_poll(
    store: &Store,
    run_id: &RunId,
    result: Result<DeployStatusInfo, runfly_api::Error>,
) -> bool {
    match result {
        Ok(info) => {
            let terminal = info.is_terminal();
            store.dispatch(Action::DeployStatusChanged {
                run_id: run_id.clone(),
                info,
            });
            terminal
        }
        Err(error) => {
            store.dispatch(Action::DeployStatusChanged {
                run_id: run_id.clone(),
                info: DeployStatusInfo::failed(error.user_message()),
            });
            true
        }
    }
}

/// Tear a deployment down. Success moves the status to whatever the
/// server reports (normally idle); failure surfaces through the
/// shutdown lifecycle and leaves the status where it was.
pub async fn shutdown(store: &Store, service: &impl DeployService, run_id: &RunId) {
    store.dispatch(Action::Shutdown {
        run_id: run_id.clone(),
        phase: Phase::Request,
    });
    match service.shutdown(run_id).await {
        Ok(info) => {
            store.dispatch(Action::Shutdown {
                run_id: run_id.clone(),
                phase: Phase::Success,
            });
            store.dispatch(Action::DeployStatusChanged {
                run_id: run_id.clone(),
                info,
            });
        }
        Err(error) => store.dispatch(Action::Shutdown {
            run_id: run_id.clone(),
            phase: Phase::Failure(error.user_message()),
        }),
    }
}

/// One-shot status read, used when a panel reopens on a run whose last
/// known status may be stale. A failed read lands as a failed status.
pub async fn refresh_status(store: &Store, service: &impl DeployService, run_id: &RunId) {
    let info = match service.status(run_id).await {
        Ok(info) => info,
        Err(error) => DeployStatusInfo::failed(error.user_message()),
    };
    store.dispatch(Action::DeployStatusChanged {
        run_id: run_id.clone(),
        info,
    });
}
