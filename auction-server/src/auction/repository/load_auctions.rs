use {
    super::Repository,
    crate::kernel::error::AuctionError,
};

impl Repository {
    /// Restores the in-memory store from the database. Returns the number of auctions loaded.
    #[tracing::instrument(skip_all)]
    pub async fn load_auctions(&self) -> Result<usize, AuctionError> {
        let auctions = self.db.get_auctions().await.map_err(|e| {
            tracing::error!(error = ?e, "DB: Failed to load auctions");
            AuctionError::TemporarilyUnavailable
        })?;
        let count = auctions.len();
        for auction in auctions {
            self.in_memory_store.auctions.insert(auction.id, auction);
        }
        Ok(count)
    }
}
