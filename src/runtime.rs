//! Async event loop driving a [`KeyboardController`].
//!
//! The loop waits on the next touch event and the next repeat deadline at
//! the same time, so held keys repeat without the host polling.

use std::future;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::controller::{KeyboardController, KeyboardHost};
use crate::tracking::TouchEvent;

/// Runs `controller` until `events` closes, then hands it back.
pub async fn run<H: KeyboardHost>(
    mut controller: KeyboardController<H>,
    mut events: mpsc::Receiver<TouchEvent>,
) -> KeyboardController<H> {
    loop {
        let deadline = controller.next_deadline();

        tokio::select! {
            event = events.recv() => match event {
                Some(event) => controller.handle(event, Instant::now().into_std()),
                None => break,
            },
            () = sleep_until(deadline) => {
                controller.advance_to(Instant::now().into_std());
            }
        }
    }

    debug!("touch event channel closed");
    controller
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(Instant::from_std(deadline)).await,
        None => future::pending().await,
    }
}
