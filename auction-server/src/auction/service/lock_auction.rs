use {
    super::Service,
    crate::{
        auction::entities,
        kernel::error::AuctionError,
    },
    tokio::sync::OwnedMutexGuard,
};

/// A timed-out wait is retried this many times before giving up.
const LOCK_RETRIES: usize = 1;

impl Service {
    /// Enters the auction's critical section. Waiters are served in arrival order and
    /// the section is left when the returned guard is dropped, on every exit path.
    #[tracing::instrument(skip_all, fields(auction_id = %auction_id))]
    pub async fn lock_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<OwnedMutexGuard<()>, AuctionError> {
        let lock = self
            .repo
            .get_or_create_in_memory_auction_lock(auction_id)
            .await;
        // A single acquire future keeps the waiter's place in the queue across retries.
        let acquire = lock.lock_owned();
        tokio::pin!(acquire);
        for attempt in 0..=LOCK_RETRIES {
            match tokio::time::timeout(self.config.lock_timeout, &mut acquire).await {
                Ok(guard) => return Ok(guard),
                Err(_) => {
                    tracing::warn!(
                        attempt,
                        timeout = ?self.config.lock_timeout,
                        "Timed out waiting for auction lock"
                    );
                }
            }
        }
        Err(AuctionError::Concurrency)
    }
}
