//! Data types for price API payloads and recorded samples.

pub mod observation;
pub mod price;

pub use observation::{Observation, percent_change};
pub use price::AvgPriceResponse;
