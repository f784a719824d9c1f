use {
    super::Repository,
    crate::auction::entities,
    std::sync::Arc,
};

impl Repository {
    /// Drops the lock entry of an auction that is closed or unknown. Locks of open auctions are kept.
    pub async fn remove_in_memory_auction_lock(&self, auction_id: &entities::AuctionId) -> bool {
        let mut mutex_guard = self.in_memory_store.auction_lock.lock().await;
        let is_open = self
            .in_memory_store
            .auctions
            .get(auction_id)
            .is_some_and(|auction| auction.is_open());
        if is_open {
            return false;
        }
        match mutex_guard.get(auction_id) {
            // Whenever there is no task borrowing a lock for this key, we can remove it from the locks HashMap.
            Some(auction_lock) if Arc::strong_count(auction_lock) == 1 => {
                mutex_guard.remove(auction_id);
                true
            }
            _ => false,
        }
    }

    /// Ids of every auction that currently has a lock entry.
    pub async fn get_in_memory_auction_lock_ids(&self) -> Vec<entities::AuctionId> {
        self.in_memory_store
            .auction_lock
            .lock()
            .await
            .keys()
            .copied()
            .collect()
    }
}
