use crate::{
    auction::entities::{
        self,
        AuctionType,
    },
    kernel::{
        entities::Username,
        error::AuctionError,
    },
};

/// The member a bid is placed for once the caller has been resolved.
#[derive(Debug, PartialEq)]
pub struct VerifiedBid {
    pub bidder:    Username,
    pub placed_by: Username,
    pub amount:    f64,
}

/// Resolves who `caller` bids for: themself when they are a member, otherwise the
/// single member that delegated bidding to them.
pub fn resolve_bidder(auction: &entities::Auction, caller: &str) -> Result<Username, AuctionError> {
    if auction.is_member(caller) {
        return Ok(caller.to_string());
    }
    match auction.members_represented_by(caller).as_slice() {
        [] => Err(AuctionError::NotMember),
        [member] => Ok(member.username.clone()),
        members => Err(AuctionError::Validation(format!(
            "{} represents {} members of this auction, bid as one of them directly",
            caller,
            members.len()
        ))),
    }
}

/// Checks `amount` against the direction of the auction and the best bid so far.
pub fn verify_bid_amount(auction: &entities::Auction, amount: f64) -> Result<(), AuctionError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AuctionError::InvalidBid(format!(
            "Bid amount {} must be a positive number",
            amount
        )));
    }
    match auction.auction_type {
        AuctionType::Ascending => {
            let (floor, what) = match auction.highest_bid_amount() {
                Some(highest) => (highest, "the highest bid"),
                None => (auction.reserve_price.unwrap_or(0.0), "the reserve price"),
            };
            if amount <= floor {
                return Err(AuctionError::InvalidBid(format!(
                    "Bid {} must be greater than {} {}",
                    amount, what, floor
                )));
            }
        }
        AuctionType::Descending => {
            let ceiling = match auction.lowest_bid_amount() {
                Some(lowest) => Some((lowest, "the lowest bid")),
                None => auction.reserve_price.map(|price| (price, "the reserve price")),
            };
            if let Some((ceiling, what)) = ceiling {
                if amount >= ceiling {
                    return Err(AuctionError::InvalidBid(format!(
                        "Bid {} must be lower than {} {}",
                        amount, what, ceiling
                    )));
                }
            }
        }
    }
    Ok(())
}

pub fn verify_bid(
    auction: &entities::Auction,
    caller: &str,
    amount: f64,
) -> Result<VerifiedBid, AuctionError> {
    let bidder = resolve_bidder(auction, caller)?;
    verify_bid_amount(auction, amount)?;
    Ok(VerifiedBid {
        bidder,
        placed_by: caller.to_string(),
        amount,
    })
}
