use {
    super::Repository,
    crate::{
        auction::entities,
        kernel::{
            entities::Username,
            error::AuctionError,
        },
    },
    time::OffsetDateTime,
};

impl Repository {
    #[tracing::instrument(skip_all, name = "conclude_auction_repo", fields(auction_id = %auction.id))]
    pub async fn conclude_auction(
        &self,
        mut auction: entities::Auction,
        winner: Username,
    ) -> Result<entities::Auction, AuctionError> {
        auction.close(winner, OffsetDateTime::now_utc());
        self.db.conclude_auction(&auction).await.map_err(|e| {
            tracing::error!(error = ?e, auction_id = %auction.id, "DB: Failed to conclude auction");
            AuctionError::TemporarilyUnavailable
        })?;
        self.in_memory_store
            .auctions
            .insert(auction.id, auction.clone());
        Ok(auction)
    }
}
