mod auction;
mod bid;
mod member;

pub use {
    auction::*,
    bid::*,
    member::*,
};

#[cfg(test)]
pub use auction::tests::test_auction;
