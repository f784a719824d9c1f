use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Auctions matching `filter`, newest first.
    pub fn get_in_memory_auctions<F>(&self, filter: F) -> Vec<entities::Auction>
    where
        F: Fn(&entities::Auction) -> bool,
    {
        let mut auctions: Vec<entities::Auction> = self
            .in_memory_store
            .auctions
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        auctions.sort_by(|a, b| {
            b.creation_time
                .cmp(&a.creation_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        auctions
    }
}
