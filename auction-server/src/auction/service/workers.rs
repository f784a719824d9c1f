use {
    super::Service,
    crate::server::{
        EXIT_CHECK_INTERVAL,
        SHOULD_EXIT,
    },
    anyhow::Result,
    std::sync::atomic::Ordering,
};

impl Service {
    pub async fn run_lock_cleanup_loop(&self) -> Result<()> {
        tracing::info!("Starting auction lock cleanup...");
        let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);
        let mut cleanup_interval = tokio::time::interval(self.config.lock_cleanup_interval);

        while !SHOULD_EXIT.load(Ordering::Acquire) {
            tokio::select! {
                _ = cleanup_interval.tick() => {
                    self.cleanup_auction_locks().await;
                }
                _ = exit_check_interval.tick() => {}
            }
        }
        tracing::info!("Shutting down auction lock cleanup...");
        Ok(())
    }

    /// Drops lock entries nobody holds for auctions that are closed or gone.
    pub async fn cleanup_auction_locks(&self) -> usize {
        let mut removed = 0;
        for auction_id in self.repo.get_in_memory_auction_lock_ids().await {
            if self.repo.remove_in_memory_auction_lock(&auction_id).await {
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(removed, "Removed unused auction locks");
        }
        removed
    }
}
