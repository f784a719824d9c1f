use {
    super::repository::{
        self,
        Database,
        Repository,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
};

pub mod create_auction;
pub mod end_auction;
pub mod get_auction;
pub mod get_auctions;
pub mod get_public_auctions;
pub mod join_auction;
pub mod load_auctions;
pub mod lock_auction;
pub mod place_bid;
pub mod represent_as_broker;
pub mod verification;
pub mod workers;

pub struct Config {
    /// Longest a single attempt waits for an auction lock.
    pub lock_timeout:          Duration,
    /// How often unused lock entries of closed auctions are dropped.
    pub lock_cleanup_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_timeout:          Duration::from_secs(5),
            lock_cleanup_interval: Duration::from_secs(60),
        }
    }
}

pub struct ServiceInner {
    config: Config,
    repo:   Arc<Repository>,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(db: impl Database, config: Config) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Arc::new(repository::Repository::new(db)),
            config,
        }))
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::{
            create_auction::CreateAuctionInput,
            join_auction::JoinAuctionInput,
            Config,
            Service,
            ServiceInner,
        },
        crate::{
            auction::{
                entities,
                repository::{
                    MockDatabase,
                    Repository,
                },
            },
            kernel::entities::Location,
        },
        std::{
            sync::Arc,
            time::Duration,
        },
        time::{
            format_description::well_known::Rfc3339,
            OffsetDateTime,
        },
    };

    impl Service {
        pub fn new_with_mocks(db: MockDatabase) -> Self {
            Service(Arc::new(ServiceInner {
                config: Config {
                    lock_timeout:          Duration::from_millis(200),
                    lock_cleanup_interval: Duration::from_millis(50),
                },
                repo:   Arc::new(Repository::new(db)),
            }))
        }

        /// Puts an auction straight into the in-memory store, bypassing validation.
        pub fn insert_auction(&self, auction: entities::Auction) {
            self.repo
                .in_memory_store
                .auctions
                .insert(auction.id, auction);
        }

        pub fn get_stored_auction(&self, auction_id: entities::AuctionId) -> entities::Auction {
            self.repo
                .get_in_memory_auction_by_id(auction_id)
                .expect("auction is missing from the store")
        }
    }

    /// A database that accepts every write.
    pub fn accepting_db() -> MockDatabase {
        let mut db = MockDatabase::default();
        db.expect_add_auction().returning(|_| Ok(()));
        db.expect_add_member().returning(|_, _| Ok(()));
        db.expect_update_member_representation()
            .returning(|_, _| Ok(()));
        db.expect_add_bid().returning(|_| Ok(()));
        db.expect_conclude_auction().returning(|_| Ok(()));
        db.expect_get_auctions().returning(|| Ok(vec![]));
        db
    }

    pub fn auction_create(auction_type: &str, privacy: &str) -> entities::AuctionCreate {
        let closing_time = OffsetDateTime::now_utc() + time::Duration::hours(1);
        entities::AuctionCreate {
            room_name:        "Solar panels".to_string(),
            privacy:          privacy.to_string(),
            auction_type:     auction_type.to_string(),
            closing_time:     closing_time.format(&Rfc3339).expect("valid timestamp"),
            reference_sector: "energy".to_string(),
            reference_type:   "solar".to_string(),
            quantity:         100.0,
            offer_id:         "offer-1".to_string(),
            template_type:    "standard".to_string(),
            members:          vec![],
            broker_id:        "broker-1".to_string(),
            location:         None,
            reserve_price:    None,
        }
    }

    pub async fn create_test_auction(
        service: &Service,
        owner: &str,
        auction: entities::AuctionCreate,
    ) -> entities::AuctionId {
        service
            .create_auction(CreateAuctionInput {
                owner: owner.to_string(),
                auction,
            })
            .await
            .expect("auction should be created")
    }

    pub async fn join_test_auction(service: &Service, auction_id: entities::AuctionId, username: &str) {
        service
            .join_auction(JoinAuctionInput {
                auction_id,
                username: username.to_string(),
                location: Location::new(1.0, 2.0),
                broker_id: String::new(),
            })
            .await
            .expect("join should succeed");
    }
}
