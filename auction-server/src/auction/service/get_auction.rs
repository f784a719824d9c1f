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

pub struct GetAuctionInput {
    pub auction_id: entities::AuctionId,
    pub username:   Username,
}

impl Service {
    /// Full detail of an auction: the room, its members and its bids.
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id, username = %input.username),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn get_auction(
        &self,
        input: GetAuctionInput,
    ) -> Result<entities::Auction, AuctionError> {
        let auction = self
            .repo
            .get_in_memory_auction_by_id(input.auction_id)
            .ok_or(AuctionError::AuctionNotFound)?;
        if !auction.is_visible_to(&input.username) {
            return Err(AuctionError::AccessDenied);
        }
        Ok(auction)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            repository::MockDatabase,
            service::tests::{
                accepting_db,
                auction_create,
                create_test_auction,
                join_test_auction,
            },
        },
    };

    fn get_input(auction_id: entities::AuctionId, username: &str) -> GetAuctionInput {
        GetAuctionInput {
            auction_id,
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn test_private_auction_only_visible_to_members() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("ascending", "private")).await;
        join_test_auction(&service, auction_id, "alice").await;

        for member in ["owner", "alice"] {
            let auction = service.get_auction(get_input(auction_id, member)).await.unwrap();
            assert_eq!(auction.id, auction_id);
            assert_eq!(auction.members.len(), 2);
        }
        for stranger in ["bob", "broker-1", ""] {
            let result = service.get_auction(get_input(auction_id, stranger)).await;
            assert_eq!(result.err(), Some(AuctionError::AccessDenied));
        }
    }

    #[tokio::test]
    async fn test_public_auction_visible_to_anyone() {
        let service = Service::new_with_mocks(accepting_db());
        let auction_id =
            create_test_auction(&service, "owner", auction_create("descending", "public")).await;

        let auction = service
            .get_auction(get_input(auction_id, "bob"))
            .await
            .unwrap();
        assert_eq!(auction.owner, "owner");
    }

    #[tokio::test]
    async fn test_missing_auction_is_not_found() {
        let service = Service::new_with_mocks(MockDatabase::default());
        let result = service
            .get_auction(get_input(uuid::Uuid::new_v4(), "bob"))
            .await;
        assert_eq!(result.err(), Some(AuctionError::AuctionNotFound));
    }
}
