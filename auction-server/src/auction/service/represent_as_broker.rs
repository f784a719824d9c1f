use {
    super::Service,
    crate::{
        auction::entities,
        kernel::{
            entities::{
                BrokerId,
                Username,
            },
            error::AuctionError,
        },
    },
};

pub struct RepresentAsBrokerInput {
    pub auction_id: entities::AuctionId,
    /// Member handing over bidding authority.
    pub username:   Username,
    pub broker_id:  BrokerId,
}

impl Service {
    /// Lets `broker_id` bid for the member. A later call replaces the previous broker.
    /// Returns the username of the represented member.
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id, username = %input.username, broker_id = %input.broker_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn represent_as_broker(
        &self,
        input: RepresentAsBrokerInput,
    ) -> Result<Username, AuctionError> {
        if input.broker_id.trim().is_empty() {
            return Err(AuctionError::Validation(
                "broker_id must not be empty".to_string(),
            ));
        }
        let _guard = self.lock_auction(input.auction_id).await?;
        let auction = self
            .repo
            .get_in_memory_auction_by_id(input.auction_id)
            .ok_or(AuctionError::AuctionNotFound)?;
        auction.ensure_open()?;
        if !auction.is_member(&input.username) {
            return Err(AuctionError::MemberNotFound);
        }

        self.repo
            .update_member_representation(auction, &input.username, input.broker_id)
            .await?;
        tracing::info!("Member is now represented by broker");
        Ok(input.username)
    }
}
