//! Drivers for the dropzone's progress bar: the fixed-cadence simulation and real
//! transfer events.

use crate::dropzone::Dropzone;
use std::time::Duration;
use studyai_core::constants::PROGRESS_TICK_INTERVAL;
use studyai_core::TransferProgress;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Advances a dropzone on a fixed interval until it leaves the uploading state, then
/// waits out the result display window.
///
/// The simulation does not reflect the actual transfer; use [`track_transfer`] when a
/// real upload is running.
#[derive(Debug, Clone, Copy)]
pub struct ProgressTicker {
    period: Duration,
}

impl Default for ProgressTicker {
    fn default() -> Self {
        Self::new(PROGRESS_TICK_INTERVAL)
    }
}

impl ProgressTicker {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns once the dropzone is back to idle. The timer is dropped on return.
    pub async fn drive(&self, dropzone: &mut Dropzone) {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while dropzone.state().is_uploading() {
            interval.tick().await;
            let progress = dropzone.tick();
            tracing::trace!(progress, "Progress tick");
        }

        if let Some(deadline) = dropzone.display_deadline() {
            time::sleep_until(deadline).await;
            dropzone.expire(Instant::now());
        }
    }
}

/// Feed transfer events into the dropzone until the sender side is dropped.
///
/// Returns the last event seen. Completion or failure is up to the caller.
pub async fn track_transfer(
    dropzone: &mut Dropzone,
    mut events: UnboundedReceiver<TransferProgress>,
) -> Option<TransferProgress> {
    let mut last = None;
    while let Some(event) = events.recv().await {
        dropzone.record_transfer(event.sent, event.total);
        last = Some(event);
    }
    last
}
