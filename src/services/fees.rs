use rust_decimal::Decimal;

/// Optional entrance-fee range from the query string, normalized so that a
/// missing minimum means 0 and a missing maximum means unbounded. Stored
/// null fees are coalesced to 0 before comparison, so free farms always
/// pass the default minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeRange {
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl FeeRange {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    /// No bounds supplied at all: the filter is a no-op.
    pub fn is_unbounded(self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Inclusive `[min, max]` bounds with absent values normalized.
    pub fn bounds(self) -> (Decimal, Decimal) {
        (
            self.min.unwrap_or(Decimal::ZERO),
            self.max.unwrap_or(Decimal::MAX),
        )
    }
}
