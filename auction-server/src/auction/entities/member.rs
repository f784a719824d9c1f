use {
    crate::kernel::entities::{
        BrokerId,
        Location,
        Username,
    },
    time::OffsetDateTime,
};

#[derive(Clone, Debug, PartialEq)]
pub struct MemberCreate {
    pub username: Username,
    pub location: Location,
    pub offer_id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub username:              Username,
    pub location:              Location,
    pub offer_id:              Option<String>,
    /// Broker named by the member when joining. Only a reference, the broker lives elsewhere.
    pub broker_id:             Option<BrokerId>,
    /// Broker currently allowed to bid on the member's behalf.
    pub represented_broker_id: Option<BrokerId>,
    pub join_time:             OffsetDateTime,
}

impl Member {
    pub fn new(
        username: Username,
        location: Location,
        offer_id: Option<String>,
        broker_id: Option<BrokerId>,
        join_time: OffsetDateTime,
    ) -> Self {
        Self {
            username,
            location,
            offer_id,
            broker_id: broker_id.filter(|id| !id.is_empty()),
            represented_broker_id: None,
            join_time,
        }
    }

    pub fn is_represented_by(&self, broker_id: &str) -> bool {
        self.represented_broker_id.as_deref() == Some(broker_id)
    }
}
