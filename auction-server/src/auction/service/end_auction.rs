use {
    super::Service,
    crate::{
        auction::entities,
        kernel::{
            entities::Username,
            error::AuctionError,
        },
    },
};

pub struct EndAuctionInput {
    pub auction_id: entities::AuctionId,
    pub username:   Username,
    pub winner:     Username,
}

impl Service {
    /// Closes the auction for good and records the winner.
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id, username = %input.username, winner = %input.winner),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn end_auction(&self, input: EndAuctionInput) -> Result<(), AuctionError> {
        {
            let _guard = self.lock_auction(input.auction_id).await?;
            let auction = self
                .repo
                .get_in_memory_auction_by_id(input.auction_id)
                .ok_or(AuctionError::AuctionNotFound)?;
            auction.ensure_open()?;
            if !auction.can_be_ended_by(&input.username) {
                return Err(AuctionError::PermissionDenied);
            }
            if !auction.is_member(&input.winner) {
                return Err(AuctionError::InvalidWinner(format!(
                    "{} is not a member of this auction",
                    input.winner
                )));
            }
            if !auction.has_bid_from(&input.winner) {
                return Err(AuctionError::InvalidWinner(format!(
                    "{} has not placed any bid",
                    input.winner
                )));
            }

            self.repo.conclude_auction(auction, input.winner).await?;
        }
        tracing::info!("Auction ended");
        self.repo
            .remove_in_memory_auction_lock(&input.auction_id)
            .await;
        Ok(())
    }
}
