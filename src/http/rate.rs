use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Spaces launches at least `interval` apart.
///
/// Only issuance is paced; how long earlier requests take has no effect.
pub(super) struct Pacer {
    interval: Duration,
    last_launch: Option<Instant>,
}

impl Pacer {
    pub(super) const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_launch: None,
        }
    }

    /// Waits until at least `interval` has passed since the last [`mark`].
    ///
    /// [`mark`]: Pacer::mark
    pub(super) async fn wait(&self) {
        if let Some(next) = self
            .last_launch
            .and_then(|last| last.checked_add(self.interval))
        {
            sleep_until(next).await;
        }
    }

    /// Records that a launch happened now. Call it once the launch can no
    /// longer be delayed, so time spent waiting for a permit is not counted
    /// towards the next gap.
    pub(super) fn mark(&mut self) {
        self.last_launch = Some(Instant::now());
    }
}
