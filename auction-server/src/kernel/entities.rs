use {
    super::error::AuctionError,
    serde::{
        Deserialize,
        Serialize,
    },
};

pub type Username = String;
pub type BrokerId = String;

/// A point on the plane where a participant is located.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn validate(&self) -> Result<(), AuctionError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(AuctionError::Validation(format!(
                "Location ({}, {}) must have finite coordinates",
                self.x, self.y
            )));
        }
        Ok(())
    }
}

/// Window over a listing. Built from untrusted skip/limit values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub skip:  usize,
    pub limit: usize,
}

impl Pagination {
    /// Negative values clamp to zero and `limit` is capped at `cap`.
    pub fn new(skip: i64, limit: i64, cap: usize) -> Self {
        let skip = usize::try_from(skip.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Self {
            skip,
            limit: limit.min(cap),
        }
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

/// One page of a listing plus the size of the whole listing.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps_negative_values() {
        let pagination = Pagination::new(-5, -1, 100);
        assert_eq!(pagination, Pagination { skip: 0, limit: 0 });
    }

    #[test]
    fn test_pagination_caps_limit() {
        let pagination = Pagination::new(3, 10_000, 100);
        assert_eq!(pagination, Pagination {
            skip:  3,
            limit: 100,
        });
        let items: Vec<usize> = (0..10).collect();
        assert_eq!(
            Pagination::new(8, 5, 100).apply(items),
            vec![8, 9]
        );
    }

    #[test]
    fn test_location_must_be_finite() {
        assert!(Location::new(1.0, 2.0).validate().is_ok());
        assert!(matches!(
            Location::new(f64::NAN, 2.0).validate(),
            Err(AuctionError::Validation(_))
        ));
        assert!(Location::new(0.0, f64::INFINITY).validate().is_err());
    }
}
