//! Inter-batch pacing.

use std::time::Duration;

use async_trait::async_trait;

/// Awaited by the simulator after every batch, including the last.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Wall-clock pacing with a fixed delay.
pub struct FixedDelay(pub Duration);

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.0).await;
    }
}
