use {
    super::{
        verification::verify_bid,
        Service,
    },
    crate::{
        auction::entities,
        kernel::{
            entities::Username,
            error::AuctionError,
        },
    },
    time::OffsetDateTime,
};

pub struct PlaceBidInput {
    pub auction_id: entities::AuctionId,
    pub username:   Username,
    pub amount:     f64,
}

impl Service {
    /// Validates the bid against the auction as it is once the lock is held, so of two
    /// racing bids only the first to arrive is compared against the older state.
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id, username = %input.username, amount = input.amount, bid_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn place_bid(&self, input: PlaceBidInput) -> Result<entities::Bid, AuctionError> {
        let _guard = self.lock_auction(input.auction_id).await?;
        let auction = self
            .repo
            .get_in_memory_auction_by_id(input.auction_id)
            .ok_or(AuctionError::AuctionNotFound)?;

        let now = OffsetDateTime::now_utc();
        auction.ensure_accepting_at(now)?;
        let verified = verify_bid(&auction, &input.username, input.amount)?;

        let bid = entities::Bid::new(
            auction.id,
            verified.bidder,
            verified.placed_by,
            verified.amount,
            now,
        );
        tracing::Span::current().record("bid_id", bid.id.to_string());
        self.repo.add_bid(auction, bid.clone()).await?;
        tracing::info!(bid = %bid, on_behalf = bid.is_placed_by_broker(), "Bid accepted");
        Ok(bid)
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
            },
            repository::MockDatabase,
            service::{
                end_auction::EndAuctionInput,
                represent_as_broker::RepresentAsBrokerInput,
                tests::{
                    accepting_db,
                    auction_create,
                    create_test_auction,
                    join_test_auction,
                },
            },
        },
        anyhow::anyhow,
    };

    fn bid_input(auction_id: entities::AuctionId, username: &str, amount: f64) -> PlaceBidInput {
        PlaceBidInput {
            auction_id,
            username: username.to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_ascending_auction_lifecycle() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("ascending", "private")).await;
        join_test_auction(&service, auction_id, "alice").await;

        service
            .place_bid(bid_input(auction_id, "alice", 10.0))
            .await
            .unwrap();
        let lower = service.place_bid(bid_input(auction_id, "alice", 5.0)).await;
        assert!(matches!(lower, Err(AuctionError::InvalidBid(_))));

        service
            .end_auction(EndAuctionInput {
                auction_id,
                username: "owner".to_string(),
                winner: "alice".to_string(),
            })
            .await
            .unwrap();

        let after_close = service.place_bid(bid_input(auction_id, "alice", 20.0)).await;
        assert_eq!(after_close.err(), Some(AuctionError::AuctionClosed));
        let auction = service.get_stored_auction(auction_id);
        assert_eq!(auction.bids.len(), 1);
        assert_eq!(auction.winner.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_ascending_bid_log_strictly_increases() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("ascending", "public")).await;
        join_test_auction(&service, auction_id, "alice").await;
        join_test_auction(&service, auction_id, "bob").await;

        let attempts = [
            ("alice", 3.0),
            ("bob", 2.0),
            ("bob", 7.5),
            ("alice", 7.5),
            ("alice", 9.0),
            ("bob", 1.0),
            ("bob", 12.0),
        ];
        for (username, amount) in attempts {
            let _ = service.place_bid(bid_input(auction_id, username, amount)).await;
        }

        let amounts: Vec<f64> = service
            .get_stored_auction(auction_id)
            .bids
            .iter()
            .map(|bid| bid.amount)
            .collect();
        assert_eq!(amounts, vec![3.0, 7.5, 9.0, 12.0]);
    }

    #[tokio::test]
    async fn test_descending_bid_log_strictly_decreases() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("descending", "public")).await;
        join_test_auction(&service, auction_id, "alice").await;

        for amount in [100.0, 120.0, 90.0, 90.0, 40.0, 41.0] {
            let _ = service.place_bid(bid_input(auction_id, "alice", amount)).await;
        }

        let amounts: Vec<f64> = service
            .get_stored_auction(auction_id)
            .bids
            .iter()
            .map(|bid| bid.amount)
            .collect();
        assert_eq!(amounts, vec![100.0, 90.0, 40.0]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_equal_bids_accept_exactly_one() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("ascending", "public")).await;
        join_test_auction(&service, auction_id, "alice").await;
        join_test_auction(&service, auction_id, "bob").await;

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.place_bid(bid_input(auction_id, "alice", 10.0)).await }
        });
        let second = tokio::spawn({
            let service = service.clone();
            async move { service.place_bid(bid_input(auction_id, "bob", 10.0)).await }
        });
        let results = [first.await.unwrap(), second.await.unwrap()];

        let accepted = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(accepted, 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(AuctionError::InvalidBid(_)))));
        assert_eq!(service.get_stored_auction(auction_id).bids.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_concurrent_bids_keep_log_increasing() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("ascending", "public")).await;
        join_test_auction(&service, auction_id, "alice").await;

        let handles: Vec<_> = (1..=50)
            .map(|i| {
                let service = service.clone();
                let amount = f64::from((i * 37) % 50 + 1);
                tokio::spawn(async move {
                    service.place_bid(bid_input(auction_id, "alice", amount)).await
                })
            })
            .collect();
        for handle in handles {
            let _ = handle.await.unwrap();
        }

        let bids = service.get_stored_auction(auction_id).bids;
        assert!(!bids.is_empty());
        assert!(bids.windows(2).all(|pair| pair[0].amount < pair[1].amount));
    }

    #[tokio::test]
    async fn test_broker_bids_on_behalf_of_member() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("ascending", "public")).await;
        join_test_auction(&service, auction_id, "alice").await;
        service
            .represent_as_broker(RepresentAsBrokerInput {
                auction_id,
                username: "alice".to_string(),
                broker_id: "broker-x".to_string(),
            })
            .await
            .unwrap();

        let bid = service
            .place_bid(bid_input(auction_id, "broker-x", 4.0))
            .await
            .unwrap();
        assert_eq!(bid.bidder, "alice");
        assert_eq!(bid.placed_by, "broker-x");
        assert!(bid.is_placed_by_broker());
    }

    #[tokio::test]
    async fn test_non_member_cannot_bid() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("ascending", "public")).await;

        let result = service.place_bid(bid_input(auction_id, "mallory", 4.0)).await;
        assert_eq!(result.err(), Some(AuctionError::NotMember));
    }

    #[tokio::test]
    async fn test_bid_after_closing_time_fails() {
        let service = Service::new_with_mocks(MockDatabase::default());
        let mut auction = test_auction("owner", AuctionType::Ascending);
        auction.closing_time = OffsetDateTime::now_utc() - time::Duration::seconds(1);
        let auction_id = auction.id;
        service.insert_auction(auction);

        let result = service.place_bid(bid_input(auction_id, "owner", 4.0)).await;
        assert_eq!(result.err(), Some(AuctionError::AuctionClosed));
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_bid_log_unchanged() {
        let mut db = MockDatabase::default();
        db.expect_add_bid()
            .returning(|_| Err(anyhow!("disk full")));
        let service = Service::new_with_mocks(db);
        let auction = test_auction("owner", AuctionType::Ascending);
        let auction_id = auction.id;
        service.insert_auction(auction.clone());

        let result = service.place_bid(bid_input(auction_id, "owner", 4.0)).await;

        assert_eq!(result.err(), Some(AuctionError::TemporarilyUnavailable));
        assert_eq!(service.get_stored_auction(auction_id), auction);
    }
}
