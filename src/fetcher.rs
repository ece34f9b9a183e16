//! Average price lookups and the derived cross price.
//!
//! The asset is priced in a stable quote (`ZECUSDT`), the fiat currency is
//! priced in the same quote (`EURUSDT`), and the two are composed into the
//! asset's price in fiat. Each call to [`PriceSource::cross_price`] issues
//! both requests; nothing is cached and nothing is retried.

use rust_decimal::Decimal;
use tracing::debug;

use crate::Result;
use crate::config::MarketConfig;
use crate::models::AvgPriceResponse;

/// Anything that can produce the current cross price.
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    /// Returns the current price of `asset` denominated in `fiat`.
    async fn cross_price(&self, asset: &str, fiat: &str) -> Result<Decimal>;
}

/// HTTP client for an `avgPrice` style endpoint.
pub struct AvgPriceClient {
    http: reqwest::Client,
    endpoint: String,
    stable: String,
}

impl AvgPriceClient {
    /// Builds a client from the market section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Http`](crate::AlertError::Http) if the HTTP
    /// client cannot be constructed.
    pub fn new(config: &MarketConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            stable: config.stable.clone(),
        })
    }

    /// Fetches the average price of one exchange symbol, e.g. `ZECUSDT`.
    ///
    /// # Errors
    ///
    /// Returns an [`AlertError`](crate::AlertError) if the request fails, the
    /// server answers with an error status, or the body has no usable
    /// `price` field.
    pub async fn avg_price(&self, symbol: &str) -> Result<Decimal> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("symbol", symbol)])
            .send()
            .await?;

        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: AvgPriceResponse = serde_json::from_str(&body)?;

        debug!(symbol, price = %parsed.price, "average price");
        Ok(parsed.price)
    }
}

impl PriceSource for AvgPriceClient {
    async fn cross_price(&self, asset: &str, fiat: &str) -> Result<Decimal> {
        let asset_price = self.avg_price(&format!("{asset}{}", self.stable)).await?;
        let fiat_price = self.avg_price(&format!("{fiat}{}", self.stable)).await?;
        cross_price(asset_price, fiat_price)
    }
}

/// Composes `asset/stable` and `fiat/stable` into `asset/fiat`.
///
/// # Errors
///
/// Returns [`AlertError::MalformedMessage`](crate::AlertError::MalformedMessage)
/// if the fiat price is not positive.
pub fn cross_price(asset_price: Decimal, fiat_price: Decimal) -> Result<Decimal> {
    if fiat_price <= Decimal::ZERO {
        return Err(crate::AlertError::MalformedMessage(format!(
            "fiat price must be positive, got {fiat_price}"
        )));
    }
    let stable_per_fiat = Decimal::ONE / fiat_price;
    asset_price.checked_mul(stable_per_fiat).ok_or_else(|| {
        crate::AlertError::MalformedMessage(format!(
            "cross price overflows: {asset_price} / {fiat_price}"
        ))
    })
}
