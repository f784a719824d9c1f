use {
    super::Repository,
    crate::{
        auction::entities,
        kernel::{
            entities::BrokerId,
            error::AuctionError,
        },
    },
};

impl Repository {
    /// Must be called while holding the auction lock, with the snapshot read under that lock.
    pub async fn update_member_representation(
        &self,
        mut auction: entities::Auction,
        username: &str,
        broker_id: BrokerId,
    ) -> Result<entities::Auction, AuctionError> {
        let member = auction
            .members
            .iter_mut()
            .find(|m| m.username == username)
            .ok_or(AuctionError::MemberNotFound)?;
        member.represented_broker_id = Some(broker_id);

        self.db
            .update_member_representation(auction.id, member)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, auction_id = %auction.id, username, "DB: Failed to update member representation");
                AuctionError::TemporarilyUnavailable
            })?;
        self.in_memory_store
            .auctions
            .insert(auction.id, auction.clone());
        Ok(auction)
    }
}
