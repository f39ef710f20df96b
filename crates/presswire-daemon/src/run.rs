//! The capture-dispatch run loop
//!
//! Wires the pipeline together: build the filter, open the session, then
//! classify and dispatch every captured frame until shutdown. Filter and
//! session construction errors are fatal; everything after is logged and
//! skipped, so a single bad frame or failed delivery never stops capture.

use crate::dispatch::Dispatcher;
use anyhow::Result;
use presswire_capture::{arp_source_filter, classify_frame, CaptureSession, Classification};
use presswire_core::{Button, ButtonSet};
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Build the filter, open the capture session, and listen until shutdown.
pub async fn run(nic: &str, buttons: ButtonSet) -> Result<()> {
    let filter = arp_source_filter(&buttons)?;
    info!(filter = %filter, "Capture filter built");

    let mut session = CaptureSession::open(nic, &filter)?;
    let dispatcher = Dispatcher::new()?;

    info!(
        interface = %session.interface(),
        buttons = buttons.len(),
        "Listening for button presses"
    );

    let handle = Handle::current();
    let capture = tokio::task::spawn_blocking(move || {
        listen(&mut session, &buttons, &dispatcher, &handle);
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = capture => {
            result?;
            info!("Capture session closed");
        }
    }

    Ok(())
}

/// Blocking capture loop: classify each frame, hand matches to dispatch
/// tasks, and keep pulling.
///
/// Each press is delivered on its own task so a slow callback target cannot
/// delay the next frame; completion order across presses is not guaranteed.
fn listen(
    session: &mut CaptureSession,
    buttons: &ButtonSet,
    dispatcher: &Dispatcher,
    handle: &Handle,
) {
    for frame in session.frames() {
        match classify_frame(frame.data(), buttons) {
            Ok(Classification::Match(button)) => {
                info!(button = %button.label, "Button pressed");
                handle.spawn(deliver(dispatcher.clone(), button.clone()));
            }
            Ok(Classification::Unknown(source)) => {
                info!(mac = %source, "Announcement from unrecognized sender");
            }
            Err(e) => {
                warn!(error = %e, "Skipping malformed frame");
            }
        }
    }
}

/// One delivery per press; failures are logged here and go no further.
async fn deliver(dispatcher: Dispatcher, button: Button) {
    match dispatcher.dispatch(&button).await {
        Ok(outcome) if outcome.status.is_success() => {
            info!(
                button = %button.label,
                status = %outcome.status,
                body = %outcome.body,
                "Callback delivered"
            );
        }
        Ok(outcome) => {
            warn!(
                button = %button.label,
                status = %outcome.status,
                body = %outcome.body,
                "Callback delivered but target returned non-success"
            );
        }
        Err(e) => {
            warn!(button = %button.label, error = %e, "Callback delivery failed");
        }
    }
}
