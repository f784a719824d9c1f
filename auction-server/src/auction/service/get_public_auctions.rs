use {
    super::Service,
    crate::{
        auction::{
            entities::{
                self,
                Privacy,
            },
            repository::AUCTION_PAGE_SIZE_CAP,
        },
        kernel::{
            entities::{
                Page,
                Pagination,
                Username,
            },
            error::AuctionError,
        },
    },
};

pub struct GetPublicAuctionsInput {
    pub username: Username,
    pub skip:     i64,
    pub limit:    i64,
}

impl Service {
    #[tracing::instrument(
        skip_all,
        fields(username = %input.username, total),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn get_public_auctions(
        &self,
        input: GetPublicAuctionsInput,
    ) -> Result<Page<entities::Auction>, AuctionError> {
        let pagination = Pagination::new(input.skip, input.limit, AUCTION_PAGE_SIZE_CAP);
        let auctions = self
            .repo
            .get_in_memory_auctions(|auction| auction.privacy == Privacy::Public);
        let total = auctions.len();
        tracing::Span::current().record("total", total);
        Ok(Page {
            items: pagination.apply(auctions),
            total,
        })
    }
}
