use {
    super::Repository,
    crate::{
        auction::entities,
        kernel::error::AuctionError,
    },
};

impl Repository {
    /// Must be called while holding the auction lock, with the snapshot read under that lock.
    pub async fn add_member(
        &self,
        mut auction: entities::Auction,
        member: entities::Member,
    ) -> Result<entities::Auction, AuctionError> {
        self.db.add_member(auction.id, &member).await.map_err(|e| {
            tracing::error!(error = ?e, auction_id = %auction.id, username = member.username, "DB: Failed to insert member");
            AuctionError::TemporarilyUnavailable
        })?;
        auction.members.push(member);
        self.in_memory_store
            .auctions
            .insert(auction.id, auction.clone());
        Ok(auction)
    }
}
