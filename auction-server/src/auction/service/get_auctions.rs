use {
    super::Service,
    crate::{
        auction::{
            entities,
            repository::AUCTION_PAGE_SIZE_CAP,
        },
        kernel::{
            entities::{
                BrokerId,
                Page,
                Pagination,
                Username,
            },
            error::AuctionError,
        },
    },
};

pub struct GetAuctionsInput {
    pub username:  Username,
    /// Empty for no broker.
    pub broker_id: BrokerId,
    pub skip:      i64,
    pub limit:     i64,
}

impl Service {
    /// Auctions the user owns or joined, widened to the broker's rooms when a broker id is given.
    #[tracing::instrument(
        skip_all,
        fields(username = %input.username, broker_id = %input.broker_id, total),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn get_auctions(
        &self,
        input: GetAuctionsInput,
    ) -> Result<Page<entities::Auction>, AuctionError> {
        let pagination = Pagination::new(input.skip, input.limit, AUCTION_PAGE_SIZE_CAP);
        let broker_id = Some(input.broker_id.as_str()).filter(|id| !id.is_empty());
        let auctions = self
            .repo
            .get_in_memory_auctions(|auction| auction.is_listed_for(&input.username, broker_id));
        let total = auctions.len();
        tracing::Span::current().record("total", total);
        Ok(Page {
            items: pagination.apply(auctions),
            total,
        })
    }
}
