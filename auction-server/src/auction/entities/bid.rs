use {
    super::AuctionId,
    crate::kernel::entities::Username,
    std::fmt::{
        Display,
        Formatter,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type BidId = Uuid;

/// A recorded bid. Never modified after it is appended to the auction's bid log.
#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub id:            BidId,
    pub auction_id:    AuctionId,
    /// Member the bid is made for.
    pub bidder:        Username,
    /// Caller that submitted the bid: the bidder itself or the broker representing them.
    pub placed_by:     Username,
    pub amount:        f64,
    pub creation_time: OffsetDateTime,
}

impl Bid {
    pub fn new(
        auction_id: AuctionId,
        bidder: Username,
        placed_by: Username,
        amount: f64,
        creation_time: OffsetDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            auction_id,
            bidder,
            placed_by,
            amount,
            creation_time,
        }
    }

    pub fn is_placed_by_broker(&self) -> bool {
        self.bidder != self.placed_by
    }
}

impl Display for Bid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bid({} {} by {})", self.id, self.amount, self.bidder)
    }
}
