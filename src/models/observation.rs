//! One price sample and the move it represents.

use chrono::{DateTime, Local};
use rust_decimal::Decimal;

/// A single sample of the cross price.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Asset ticker, e.g. `ZEC`.
    pub asset: String,
    /// Price recorded by the previous sample (or this one, on the first).
    pub previous: Decimal,
    /// Price fetched for this sample.
    pub price: Decimal,
    /// Local wall-clock time the sample was recorded.
    pub timestamp: DateTime<Local>,
    /// Signed move from `previous` to `price`, in percent.
    pub percent: Decimal,
}

impl Observation {
    /// Records a sample taken now.
    pub fn new(asset: impl Into<String>, previous: Decimal, price: Decimal) -> Self {
        Self::at(asset, previous, price, Local::now())
    }

    /// Records a sample with an explicit timestamp.
    pub fn at(
        asset: impl Into<String>,
        previous: Decimal,
        price: Decimal,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            asset: asset.into(),
            previous,
            price,
            timestamp,
            percent: percent_change(previous, price),
        }
    }
}

/// Signed percentage change from `previous` to `new`.
///
/// The move is expressed relative to the *new* price:
/// `(new - previous) * 100 / new`. A zero `new` price yields zero.
pub fn percent_change(previous: Decimal, new: Decimal) -> Decimal {
    if new.is_zero() {
        return Decimal::ZERO;
    }
    (new - previous)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(new))
        .unwrap_or(Decimal::ZERO)
}
