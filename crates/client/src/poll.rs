use async_trait::async_trait;
use std::time::Duration;

/// Fixed interval between inclusion-tracker polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Suspension primitive used between tracker polls.
///
/// The polling loops are identical in both execution modes; only how
/// the wait between iterations is performed differs. Swap the sleeper
/// on a tracker to choose a mode.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend for `interval` before the next poll.
    async fn sleep(&self, interval: Duration);
}

/// Cooperative suspension via the tokio timer. The default: the task
/// yields and the thread stays free between polls.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldSleeper;

#[async_trait]
impl Sleeper for YieldSleeper {
    async fn sleep(&self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Thread-blocking suspension. Occupies the calling thread between
/// polls; for callers driving a tracker to completion with a blocking
/// executor, outside a cooperative runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingSleeper;

#[async_trait]
impl Sleeper for BlockingSleeper {
    async fn sleep(&self, interval: Duration) {
        std::thread::sleep(interval);
    }
}
