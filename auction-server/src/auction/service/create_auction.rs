use {
    super::Service,
    crate::{
        auction::entities::{
            self,
            AuctionStatus,
            AuctionType,
            Privacy,
        },
        kernel::{
            entities::{
                Location,
                Username,
            },
            error::AuctionError,
        },
    },
    std::collections::HashSet,
    time::{
        format_description::well_known::Rfc3339,
        OffsetDateTime,
    },
    uuid::Uuid,
};

pub struct CreateAuctionInput {
    pub owner:   Username,
    pub auction: entities::AuctionCreate,
}

fn non_empty(field: &str, value: &str) -> Result<(), AuctionError> {
    if value.trim().is_empty() {
        return Err(AuctionError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Builds the initial member list. The owner is always a member; when the list names the
/// owner that entry is kept, otherwise the owner sits at the room's location.
fn build_members(
    owner: &str,
    auction: &entities::AuctionCreate,
    now: OffsetDateTime,
) -> Result<Vec<entities::Member>, AuctionError> {
    let mut seen = HashSet::new();
    let mut members = Vec::with_capacity(auction.members.len() + 1);
    for member in auction.members.iter() {
        non_empty("member username", &member.username)?;
        member.location.validate()?;
        if !seen.insert(member.username.as_str()) {
            return Err(AuctionError::DuplicateMember(member.username.clone()));
        }
        members.push(entities::Member::new(
            member.username.clone(),
            member.location,
            Some(member.offer_id.clone()),
            None,
            now,
        ));
    }
    if !seen.contains(owner) {
        members.insert(
            0,
            entities::Member::new(
                owner.to_string(),
                auction.location.unwrap_or_default(),
                Some(auction.offer_id.clone()),
                None,
                now,
            ),
        );
    }
    Ok(members)
}

pub fn validate_auction_create(
    owner: &str,
    auction: entities::AuctionCreate,
    now: OffsetDateTime,
) -> Result<entities::Auction, AuctionError> {
    non_empty("owner", owner)?;
    non_empty("room_name", &auction.room_name)?;
    let privacy = auction.privacy.parse::<Privacy>().map_err(|_| {
        AuctionError::Validation(format!(
            "privacy must be public or private, got {}",
            auction.privacy
        ))
    })?;
    let auction_type = auction.auction_type.parse::<AuctionType>().map_err(|_| {
        AuctionError::Validation(format!(
            "auction_type must be ascending or descending, got {}",
            auction.auction_type
        ))
    })?;
    let closing_time = OffsetDateTime::parse(&auction.closing_time, &Rfc3339).map_err(|e| {
        AuctionError::Validation(format!(
            "closing_time {} is not an RFC 3339 timestamp: {}",
            auction.closing_time, e
        ))
    })?;
    if closing_time <= now {
        return Err(AuctionError::Validation(format!(
            "closing_time {} is not in the future",
            auction.closing_time
        )));
    }
    if !auction.quantity.is_finite() || auction.quantity <= 0.0 {
        return Err(AuctionError::Validation(format!(
            "quantity must be greater than zero, got {}",
            auction.quantity
        )));
    }
    if let Some(reserve_price) = auction.reserve_price {
        if !reserve_price.is_finite() || reserve_price < 0.0 {
            return Err(AuctionError::Validation(format!(
                "reserve_price must be a non-negative number, got {}",
                reserve_price
            )));
        }
    }
    auction
        .location
        .as_ref()
        .map(Location::validate)
        .transpose()?;
    let members = build_members(owner, &auction, now)?;

    Ok(entities::Auction {
        id: Uuid::new_v4(),
        owner: owner.to_string(),
        room_name: auction.room_name,
        privacy,
        auction_type,
        closing_time,
        reference_sector: auction.reference_sector,
        reference_type: auction.reference_type,
        quantity: auction.quantity,
        offer_id: auction.offer_id,
        template_type: auction.template_type,
        broker_id: auction.broker_id,
        location: auction.location,
        reserve_price: auction.reserve_price,
        creation_time: now,
        status: AuctionStatus::Open,
        winner: None,
        conclusion_time: None,
        members,
        bids: vec![],
    })
}

impl Service {
    #[tracing::instrument(
        skip_all,
        fields(auction_id, owner = %input.owner),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn create_auction(
        &self,
        input: CreateAuctionInput,
    ) -> Result<entities::AuctionId, AuctionError> {
        let auction =
            validate_auction_create(&input.owner, input.auction, OffsetDateTime::now_utc())?;
        let auction_id = auction.id;
        tracing::Span::current().record("auction_id", auction_id.to_string());

        self.repo.add_auction(auction).await?;
        tracing::info!(auction_id = %auction_id, "Auction created");
        Ok(auction_id)
    }
}
