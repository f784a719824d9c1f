use {
    super::Repository,
    crate::{
        auction::entities,
        kernel::error::AuctionError,
    },
};

impl Repository {
    /// Must be called while holding the auction lock, with the snapshot read under that lock.
    pub async fn add_bid(
        &self,
        mut auction: entities::Auction,
        bid: entities::Bid,
    ) -> Result<entities::Auction, AuctionError> {
        self.db.add_bid(&bid).await.map_err(|e| {
            tracing::error!(error = ?e, bid = %bid, "DB: Failed to insert bid");
            AuctionError::TemporarilyUnavailable
        })?;
        auction.bids.push(bid);
        self.in_memory_store
            .auctions
            .insert(auction.id, auction.clone());
        Ok(auction)
    }
}
