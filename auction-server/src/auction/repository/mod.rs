use {
    super::entities,
    dashmap::DashMap,
    std::collections::HashMap,
    tokio::sync::Mutex,
};

mod add_auction;
mod add_bid;
mod add_member;
mod conclude_auction;
mod get_in_memory_auction_by_id;
mod get_in_memory_auctions;
mod get_or_create_in_memory_auction_lock;
mod load_auctions;
mod models;
mod remove_in_memory_auction_lock;
mod update_member_representation;

pub use models::*;

pub const AUCTION_PAGE_SIZE_CAP: usize = 100;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Latest snapshot of every auction. Writers replace a whole entry, so readers never see half a change.
    pub auctions:     DashMap<entities::AuctionId, entities::Auction>,
    pub auction_lock: Mutex<HashMap<entities::AuctionId, entities::AuctionLock>>,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
    pub db:              Box<dyn Database>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db:              Box::new(db),
        }
    }
}
