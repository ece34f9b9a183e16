//! Reusable pieces of the price view.

pub mod banner;
pub mod price_table;
pub mod status_bar;
