use rust_decimal::Decimal;
use serde::Deserialize;

/// Response of the `avgPrice` endpoint, e.g.
/// `{"mins":5,"price":"31.20150000","closeTime":1700000000000}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvgPriceResponse {
    /// Averaging window in minutes.
    #[serde(default)]
    pub mins: Option<u32>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Last trade time of the window, epoch milliseconds.
    #[serde(default)]
    pub close_time: Option<u64>,
}
