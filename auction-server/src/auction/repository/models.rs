#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::kernel::{
        db::DB,
        entities::Location,
    },
    anyhow::anyhow,
    async_trait::async_trait,
    sqlx::FromRow,
    std::{
        collections::HashMap,
        fmt::Debug,
    },
    time::OffsetDateTime,
    tracing::instrument,
    uuid::Uuid,
};

#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:               Uuid,
    pub owner:            String,
    pub room_name:        String,
    pub privacy:          String,
    pub auction_type:     String,
    pub closing_time:     OffsetDateTime,
    pub reference_sector: String,
    pub reference_type:   String,
    pub quantity:         f64,
    pub offer_id:         String,
    pub template_type:    String,
    pub broker_id:        String,
    pub location_x:       Option<f64>,
    pub location_y:       Option<f64>,
    pub reserve_price:    Option<f64>,
    pub creation_time:    OffsetDateTime,
    pub status:           String,
    pub winner:           Option<String>,
    pub conclusion_time:  Option<OffsetDateTime>,
}

#[derive(Clone, FromRow, Debug)]
pub struct Member {
    pub auction_id:            Uuid,
    pub username:              String,
    pub location_x:            f64,
    pub location_y:            f64,
    pub offer_id:              Option<String>,
    pub broker_id:             Option<String>,
    pub represented_broker_id: Option<String>,
    pub join_time:             OffsetDateTime,
}

#[derive(Clone, FromRow, Debug)]
pub struct Bid {
    pub id:            Uuid,
    pub auction_id:    Uuid,
    pub bidder:        String,
    pub placed_by:     String,
    pub amount:        f64,
    pub creation_time: OffsetDateTime,
}

impl From<Member> for entities::Member {
    fn from(member: Member) -> Self {
        Self {
            username:              member.username,
            location:              Location::new(member.location_x, member.location_y),
            offer_id:              member.offer_id,
            broker_id:             member.broker_id,
            represented_broker_id: member.represented_broker_id,
            join_time:             member.join_time,
        }
    }
}

impl From<Bid> for entities::Bid {
    fn from(bid: Bid) -> Self {
        Self {
            id:            bid.id,
            auction_id:    bid.auction_id,
            bidder:        bid.bidder,
            placed_by:     bid.placed_by,
            amount:        bid.amount,
            creation_time: bid.creation_time,
        }
    }
}

impl Auction {
    pub fn get_auction_entity(
        self,
        members: Vec<entities::Member>,
        bids: Vec<entities::Bid>,
    ) -> anyhow::Result<entities::Auction> {
        let location = match (self.location_x, self.location_y) {
            (Some(x), Some(y)) => Some(Location::new(x, y)),
            _ => None,
        };
        Ok(entities::Auction {
            id: self.id,
            privacy: self
                .privacy
                .parse::<entities::Privacy>()
                .map_err(|_| anyhow!("Unknown privacy {} for auction {}", self.privacy, self.id))?,
            auction_type: self.auction_type.parse::<entities::AuctionType>().map_err(|_| {
                anyhow!(
                    "Unknown auction type {} for auction {}",
                    self.auction_type,
                    self.id
                )
            })?,
            status: self
                .status
                .parse::<entities::AuctionStatus>()
                .map_err(|_| anyhow!("Unknown status {} for auction {}", self.status, self.id))?,
            owner: self.owner,
            room_name: self.room_name,
            closing_time: self.closing_time,
            reference_sector: self.reference_sector,
            reference_type: self.reference_type,
            quantity: self.quantity,
            offer_id: self.offer_id,
            template_type: self.template_type,
            broker_id: self.broker_id,
            location,
            reserve_price: self.reserve_price,
            creation_time: self.creation_time,
            winner: self.winner,
            conclusion_time: self.conclusion_time,
            members,
            bids,
        })
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()>;
    async fn add_member(
        &self,
        auction_id: entities::AuctionId,
        member: &entities::Member,
    ) -> anyhow::Result<()>;
    async fn update_member_representation(
        &self,
        auction_id: entities::AuctionId,
        member: &entities::Member,
    ) -> anyhow::Result<()>;
    async fn add_bid(&self, bid: &entities::Bid) -> anyhow::Result<()>;
    async fn conclude_auction(&self, auction: &entities::Auction) -> anyhow::Result<()>;
    async fn get_auctions(&self) -> anyhow::Result<Vec<entities::Auction>>;
}

#[async_trait]
impl Database for DB {
    #[instrument(name = "db_add_auction", skip_all, fields(auction_id = %auction.id))]
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        let mut tx = self.begin().await?;
        sqlx::query(
            "INSERT INTO auction (id, owner, room_name, privacy, auction_type, closing_time, reference_sector, reference_type, quantity, offer_id, template_type, broker_id, location_x, location_y, reserve_price, creation_time, status) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
        )
        .bind(auction.id)
        .bind(&auction.owner)
        .bind(&auction.room_name)
        .bind(auction.privacy.as_ref())
        .bind(auction.auction_type.as_ref())
        .bind(auction.closing_time)
        .bind(&auction.reference_sector)
        .bind(&auction.reference_type)
        .bind(auction.quantity)
        .bind(&auction.offer_id)
        .bind(&auction.template_type)
        .bind(&auction.broker_id)
        .bind(auction.location.map(|l| l.x))
        .bind(auction.location.map(|l| l.y))
        .bind(auction.reserve_price)
        .bind(auction.creation_time)
        .bind(auction.status.as_ref())
        .execute(&mut *tx)
        .await?;
        for member in auction.members.iter() {
            insert_member(&mut tx, auction.id, member).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    #[instrument(name = "db_add_member", skip_all, fields(auction_id = %auction_id))]
    async fn add_member(
        &self,
        auction_id: entities::AuctionId,
        member: &entities::Member,
    ) -> anyhow::Result<()> {
        let mut tx = self.begin().await?;
        insert_member(&mut tx, auction_id, member).await?;
        tx.commit().await?;
        Ok(())
    }

    #[instrument(name = "db_update_member_representation", skip_all, fields(auction_id = %auction_id))]
    async fn update_member_representation(
        &self,
        auction_id: entities::AuctionId,
        member: &entities::Member,
    ) -> anyhow::Result<()> {
        let result = sqlx::query(
            "UPDATE auction_member SET represented_broker_id = $1 WHERE auction_id = $2 AND username = $3",
        )
        .bind(&member.represented_broker_id)
        .bind(auction_id)
        .bind(&member.username)
        .execute(self)
        .await?;
        if result.rows_affected() != 1 {
            return Err(anyhow!(
                "Member {} of auction {} not found in database",
                member.username,
                auction_id
            ));
        }
        Ok(())
    }

    #[instrument(name = "db_add_bid", skip_all, fields(auction_id = %bid.auction_id, bid_id = %bid.id))]
    async fn add_bid(&self, bid: &entities::Bid) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO bid (id, auction_id, bidder, placed_by, amount, creation_time) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(bid.id)
        .bind(bid.auction_id)
        .bind(&bid.bidder)
        .bind(&bid.placed_by)
        .bind(bid.amount)
        .bind(bid.creation_time)
        .execute(self)
        .await?;
        Ok(())
    }

    #[instrument(name = "db_conclude_auction", skip_all, fields(auction_id = %auction.id))]
    async fn conclude_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        let result = sqlx::query(
            "UPDATE auction SET status = $1, winner = $2, conclusion_time = $3 WHERE id = $4 AND winner IS NULL",
        )
        .bind(auction.status.as_ref())
        .bind(&auction.winner)
        .bind(auction.conclusion_time)
        .bind(auction.id)
        .execute(self)
        .await?;
        if result.rows_affected() != 1 {
            return Err(anyhow!("Auction {} was already concluded", auction.id));
        }
        Ok(())
    }

    #[instrument(name = "db_get_auctions", skip_all)]
    async fn get_auctions(&self) -> anyhow::Result<Vec<entities::Auction>> {
        let auctions: Vec<Auction> = sqlx::query_as("SELECT * FROM auction ORDER BY creation_time ASC")
            .fetch_all(self)
            .await?;
        let members: Vec<Member> =
            sqlx::query_as("SELECT * FROM auction_member ORDER BY join_time ASC, seq ASC")
                .fetch_all(self)
                .await?;
        let bids: Vec<Bid> = sqlx::query_as("SELECT * FROM bid ORDER BY seq ASC")
            .fetch_all(self)
            .await?;

        let mut members_by_auction: HashMap<Uuid, Vec<entities::Member>> = HashMap::new();
        for member in members {
            members_by_auction
                .entry(member.auction_id)
                .or_default()
                .push(member.into());
        }
        let mut bids_by_auction: HashMap<Uuid, Vec<entities::Bid>> = HashMap::new();
        for bid in bids {
            bids_by_auction.entry(bid.auction_id).or_default().push(bid.into());
        }

        auctions
            .into_iter()
            .map(|auction| {
                let members = members_by_auction.remove(&auction.id).unwrap_or_default();
                let bids = bids_by_auction.remove(&auction.id).unwrap_or_default();
                auction.get_auction_entity(members, bids)
            })
            .collect()
    }
}

async fn insert_member(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    auction_id: entities::AuctionId,
    member: &entities::Member,
) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO auction_member (auction_id, username, location_x, location_y, offer_id, broker_id, represented_broker_id, join_time) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(auction_id)
    .bind(&member.username)
    .bind(member.location.x)
    .bind(member.location.y)
    .bind(&member.offer_id)
    .bind(&member.broker_id)
    .bind(&member.represented_broker_id)
    .bind(member.join_time)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
