use {
    super::Repository,
    crate::{
        auction::entities,
        kernel::error::AuctionError,
    },
};

impl Repository {
    // NOTE: Do not call this function directly. Instead call `create_auction` from `Service`.
    pub async fn add_auction(&self, auction: entities::Auction) -> Result<(), AuctionError> {
        self.db.add_auction(&auction).await.map_err(|e| {
            tracing::error!(error = ?e, auction_id = %auction.id, "DB: Failed to insert auction");
            AuctionError::TemporarilyUnavailable
        })?;
        self.in_memory_store.auctions.insert(auction.id, auction);
        Ok(())
    }
}
