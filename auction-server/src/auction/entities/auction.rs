use {
    super::{
        bid::Bid,
        member::{
            Member,
            MemberCreate,
        },
    },
    crate::kernel::{
        entities::{
            BrokerId,
            Location,
            Username,
        },
        error::AuctionError,
    },
    std::sync::Arc,
    strum::{
        AsRefStr,
        Display,
        EnumString,
    },
    time::OffsetDateTime,
    tokio::sync::Mutex,
    uuid::Uuid,
};

pub type AuctionId = Uuid;
pub type AuctionLock = Arc<Mutex<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Privacy {
    Public,
    Private,
}

/// Direction in which successive accepted bids must move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AuctionType {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AuctionStatus {
    Open,
    Closed,
}

/// Auction room as requested by its owner, before validation.
#[derive(Clone, Debug)]
pub struct AuctionCreate {
    pub room_name:        String,
    pub privacy:          String,
    pub auction_type:     String,
    /// RFC 3339 timestamp.
    pub closing_time:     String,
    pub reference_sector: String,
    pub reference_type:   String,
    pub quantity:         f64,
    pub offer_id:         String,
    pub template_type:    String,
    pub members:          Vec<MemberCreate>,
    pub broker_id:        BrokerId,
    pub location:         Option<Location>,
    pub reserve_price:    Option<f64>,
}

/// Parses an auction id coming from a caller. Anything unparsable cannot name an auction.
pub fn parse_auction_id(auction_id: &str) -> Result<AuctionId, AuctionError> {
    auction_id
        .parse::<AuctionId>()
        .map_err(|_| AuctionError::AuctionNotFound)
}

/// An auction room together with its members and bid log.
#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:               AuctionId,
    pub owner:            Username,
    pub room_name:        String,
    pub privacy:          Privacy,
    pub auction_type:     AuctionType,
    pub closing_time:     OffsetDateTime,
    pub reference_sector: String,
    pub reference_type:   String,
    pub quantity:         f64,
    pub offer_id:         String,
    pub template_type:    String,
    pub broker_id:        BrokerId,
    pub location:         Option<Location>,
    pub reserve_price:    Option<f64>,
    pub creation_time:    OffsetDateTime,
    pub status:           AuctionStatus,
    pub winner:           Option<Username>,
    pub conclusion_time:  Option<OffsetDateTime>,

    pub members: Vec<Member>,
    pub bids:    Vec<Bid>,
}

impl Auction {
    pub fn is_open(&self) -> bool {
        self.status == AuctionStatus::Open
    }

    pub fn ensure_open(&self) -> Result<(), AuctionError> {
        if !self.is_open() {
            return Err(AuctionError::AuctionClosed);
        }
        Ok(())
    }

    /// Joins and bids are refused once the closing time has passed, even before a winner is chosen.
    pub fn ensure_accepting_at(&self, now: OffsetDateTime) -> Result<(), AuctionError> {
        self.ensure_open()?;
        if now >= self.closing_time {
            return Err(AuctionError::AuctionClosed);
        }
        Ok(())
    }

    pub fn get_member(&self, username: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.username == username)
    }

    pub fn is_member(&self, username: &str) -> bool {
        self.get_member(username).is_some()
    }

    pub fn is_visible_to(&self, username: &str) -> bool {
        self.privacy == Privacy::Public || self.is_member(username)
    }

    pub fn can_be_ended_by(&self, username: &str) -> bool {
        self.owner == username || (!self.broker_id.is_empty() && self.broker_id == username)
    }

    pub fn has_bid_from(&self, username: &str) -> bool {
        self.bids.iter().any(|bid| bid.bidder == username)
    }

    /// Members that delegated their bidding to `broker_id`.
    pub fn members_represented_by(&self, broker_id: &str) -> Vec<&Member> {
        self.members
            .iter()
            .filter(|m| m.is_represented_by(broker_id))
            .collect()
    }

    pub fn highest_bid_amount(&self) -> Option<f64> {
        self.bids.iter().map(|bid| bid.amount).reduce(f64::max)
    }

    pub fn lowest_bid_amount(&self) -> Option<f64> {
        self.bids.iter().map(|bid| bid.amount).reduce(f64::min)
    }

    /// Whether the auction belongs in `username`'s listing, optionally widened to a broker's rooms.
    /// The broker widening only adds rooms visible to `username`.
    pub fn is_listed_for(&self, username: &str, broker_id: Option<&str>) -> bool {
        if self.owner == username || self.is_member(username) {
            return true;
        }
        if !self.is_visible_to(username) {
            return false;
        }
        match broker_id {
            Some(broker_id) => {
                self.broker_id == broker_id
                    || self.members.iter().any(|m| {
                        m.broker_id.as_deref() == Some(broker_id) || m.is_represented_by(broker_id)
                    })
            }
            None => false,
        }
    }

    pub fn close(&mut self, winner: Username, conclusion_time: OffsetDateTime) {
        self.status = AuctionStatus::Closed;
        self.winner = Some(winner);
        self.conclusion_time = Some(conclusion_time);
    }
}
