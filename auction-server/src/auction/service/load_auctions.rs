use {
    super::Service,
    crate::kernel::error::AuctionError,
};

impl Service {
    /// Rebuilds in-memory state from storage. Called once on startup before any request is served.
    pub async fn load_auctions(&self) -> Result<usize, AuctionError> {
        let count = self.repo.load_auctions().await?;
        tracing::info!(count, "Loaded auctions from storage");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            entities::{
                test_auction,
                AuctionType,
                Bid,
            },
            repository::MockDatabase,
        },
        anyhow::anyhow,
    };

    #[tokio::test]
    async fn test_load_restores_auctions_with_members_and_bids() {
        let mut auction = test_auction("owner", AuctionType::Descending);
        auction.bids.push(Bid::new(
            auction.id,
            "owner".to_string(),
            "owner".to_string(),
            12.5,
            auction.creation_time,
        ));
        let expected = auction.clone();
        let mut db = MockDatabase::default();
        db.expect_get_auctions()
            .returning(move || Ok(vec![auction.clone()]));
        let service = Service::new_with_mocks(db);

        assert_eq!(service.load_auctions().await, Ok(1));
        assert_eq!(service.get_stored_auction(expected.id), expected);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let mut db = MockDatabase::default();
        db.expect_get_auctions()
            .returning(|| Err(anyhow!("connection refused")));
        let service = Service::new_with_mocks(db);

        assert_eq!(
            service.load_auctions().await,
            Err(AuctionError::TemporarilyUnavailable)
        );
    }
}
