use std::fmt::{
    Display,
    Formatter,
};

#[derive(Debug, Clone, PartialEq)]
pub enum AuctionError {
    /// The request contained malformed input
    Validation(String),
    /// The auction was not found
    AuctionNotFound,
    /// The caller is not a member of the auction
    MemberNotFound,
    /// The caller may not perform this operation on the auction
    PermissionDenied,
    /// The auction is private and the caller is not one of its members
    AccessDenied,
    /// The auction no longer accepts changes
    AuctionClosed,
    /// The user is already a member of the auction
    AlreadyJoined,
    /// The bid does not improve on the current best bid
    InvalidBid(String),
    /// The chosen winner is not a member with at least one bid
    InvalidWinner(String),
    /// The member list names the same user more than once
    DuplicateMember(String),
    /// The bidder neither is a member nor represents one
    NotMember,
    /// The auction lock could not be acquired in time
    Concurrency,
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl AuctionError {
    /// Stable machine-readable identifier of the failure.
    pub fn code(&self) -> &'static str {
        match self {
            AuctionError::Validation(_) => "validation_error",
            AuctionError::AuctionNotFound => "auction_not_found",
            AuctionError::MemberNotFound => "member_not_found",
            AuctionError::PermissionDenied => "permission_denied",
            AuctionError::AccessDenied => "access_denied",
            AuctionError::AuctionClosed => "auction_closed",
            AuctionError::AlreadyJoined => "already_joined",
            AuctionError::InvalidBid(_) => "invalid_bid",
            AuctionError::InvalidWinner(_) => "invalid_winner",
            AuctionError::DuplicateMember(_) => "duplicate_member",
            AuctionError::NotMember => "not_member",
            AuctionError::Concurrency => "concurrency_error",
            AuctionError::TemporarilyUnavailable => "temporarily_unavailable",
        }
    }

    pub fn message(&self) -> String {
        match self {
            AuctionError::Validation(msg) => format!("Validation failed: {}", msg),
            AuctionError::AuctionNotFound => {
                "Auction with the specified id was not found".to_string()
            }
            AuctionError::MemberNotFound => "You are not a member of this auction".to_string(),
            AuctionError::PermissionDenied => {
                "Only the auction owner or its broker can do this".to_string()
            }
            AuctionError::AccessDenied => "You do not have access to this auction".to_string(),
            AuctionError::AuctionClosed => "The auction is closed".to_string(),
            AuctionError::AlreadyJoined => "You have already joined this auction".to_string(),
            AuctionError::InvalidBid(msg) => format!("Invalid bid: {}", msg),
            AuctionError::InvalidWinner(msg) => format!("Invalid winner: {}", msg),
            AuctionError::DuplicateMember(username) => {
                format!("Member {} is listed more than once", username)
            }
            AuctionError::NotMember => {
                "Only members of the auction or their brokers can bid".to_string()
            }
            AuctionError::Concurrency => {
                "The auction is busy, please try again".to_string()
            }
            AuctionError::TemporarilyUnavailable => {
                "This service is temporarily unavailable".to_string()
            }
        }
    }

    pub fn to_code_and_message(&self) -> (&'static str, String) {
        (self.code(), self.message())
    }

    /// Rule violations are final; only transient failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AuctionError::Concurrency | AuctionError::TemporarilyUnavailable
        )
    }
}

impl Display for AuctionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for AuctionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AuctionError::AuctionClosed.code(), "auction_closed");
        assert_eq!(
            AuctionError::InvalidBid("too low".to_string()).to_code_and_message(),
            ("invalid_bid", "Invalid bid: too low".to_string())
        );
        assert_eq!(
            AuctionError::DuplicateMember("alice".to_string()).to_string(),
            "duplicate_member: Member alice is listed more than once"
        );
    }

    #[test]
    fn test_only_transient_errors_are_retryable() {
        assert!(AuctionError::Concurrency.is_retryable());
        assert!(!AuctionError::AlreadyJoined.is_retryable());
        assert!(!AuctionError::InvalidBid(String::new()).is_retryable());
    }
}
