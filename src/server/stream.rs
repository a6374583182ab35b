// Streaming adapter
//
// Bridges the optimizer's progress channel to an incrementally flushed
// NDJSON response body. This is the only component touching the transport;
// it knows nothing about refinement semantics.

use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;

use axum::body::{Body, Bytes};
use futures::stream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;

use crate::config::constants::STREAM_POLL_INTERVAL_MS;
use crate::optimizer::{Optimizer, ProgressEvent, RunConfig};
use crate::providers::RoleBindings;

/// Start an optimization run in the background and return a response body
/// that streams its progress events, one JSON object per line.
///
/// Dropping the body (client disconnect) cancels the pump, which in turn
/// aborts the background run - no orphaned work outlives the connection.
pub fn optimize_stream(bindings: RoleBindings, templates_dir: PathBuf, config: RunConfig) -> Body {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let optimizer = Optimizer::new(bindings, &templates_dir, event_tx);

    let run = AbortOnDropHandle::new(tokio::spawn(async move { optimizer.run(config).await }));

    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<Bytes>();
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();

    tokio::spawn(pump(run, event_rx, line_tx, cancel));

    Body::from_stream(stream::poll_fn(move |cx| {
        let _ = &guard; // cancels the pump when the body is dropped
        line_rx.poll_recv(cx).map(|line| line.map(Ok::<_, Infallible>))
    }))
}

/// Forward progress events to the response channel until the run finishes,
/// then flush stragglers and emit exactly one terminal event.
async fn pump(
    mut run: AbortOnDropHandle<anyhow::Result<String>>,
    mut events: mpsc::UnboundedReceiver<ProgressEvent>,
    out: mpsc::UnboundedSender<Bytes>,
    cancel: CancellationToken,
) {
    let poll_interval = Duration::from_millis(STREAM_POLL_INTERVAL_MS);

    while !run.is_finished() {
        tokio::select! {
            _ = cancel.cancelled() => {
                // Client went away; AbortOnDropHandle reaps the run on return
                tracing::debug!("Client disconnected, aborting optimization run");
                return;
            }
            received = timeout(poll_interval, events.recv()) => match received {
                Ok(Some(event)) => {
                    if send_line(&out, &event).is_err() {
                        return;
                    }
                }
                // Producer dropped: the run is completing, move on to drain
                Ok(None) => break,
                // Bounded wait elapsed - re-check run completion
                Err(_) => continue,
            },
        }
    }

    // Final non-blocking drain: events produced between the last poll and
    // task completion must not be lost
    while let Ok(event) = events.try_recv() {
        if send_line(&out, &event).is_err() {
            return;
        }
    }

    let terminal = match (&mut run).await {
        Ok(Ok(final_prompt)) => ProgressEvent::result(final_prompt),
        Ok(Err(e)) => ProgressEvent::error(format!("Optimization failed: {e:#}")),
        Err(e) => ProgressEvent::error(format!("Optimization task failed: {e}")),
    };
    let _ = send_line(&out, &terminal);
}

fn send_line(
    out: &mpsc::UnboundedSender<Bytes>,
    event: &ProgressEvent,
) -> Result<(), mpsc::error::SendError<Bytes>> {
    out.send(Bytes::from(event.to_ndjson()))
}
