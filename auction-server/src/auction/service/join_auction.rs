use {
    super::Service,
    crate::{
        auction::entities,
        kernel::{
            entities::{
                BrokerId,
                Location,
                Username,
            },
            error::AuctionError,
        },
    },
    time::OffsetDateTime,
};

pub struct JoinAuctionInput {
    pub auction_id: entities::AuctionId,
    pub username:   Username,
    pub location:   Location,
    /// Empty when the member names no broker.
    pub broker_id:  BrokerId,
}

impl Service {
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id, username = %input.username),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn join_auction(&self, input: JoinAuctionInput) -> Result<(), AuctionError> {
        input.location.validate()?;
        let _guard = self.lock_auction(input.auction_id).await?;
        let auction = self
            .repo
            .get_in_memory_auction_by_id(input.auction_id)
            .ok_or(AuctionError::AuctionNotFound)?;

        let now = OffsetDateTime::now_utc();
        auction.ensure_accepting_at(now)?;
        if auction.is_member(&input.username) {
            return Err(AuctionError::AlreadyJoined);
        }

        let member = entities::Member::new(
            input.username,
            input.location,
            None,
            Some(input.broker_id),
            now,
        );
        self.repo.add_member(auction, member).await?;
        tracing::info!("Member joined auction");
        Ok(())
    }
}
