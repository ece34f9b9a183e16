//! Application state for the TUI.

use std::collections::VecDeque;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::config::AppConfig;
use crate::models::Observation;

/// Maximum number of samples shown in the price table.
pub const MAX_ROWS_DISPLAYED: usize = 15;

/// Everything the view needs to draw one frame.
pub struct App {
    /// Asset ticker, e.g. `ZEC`.
    pub asset: String,
    /// Currency prices are shown in, e.g. `EUR`.
    pub fiat: String,
    /// Move that rings the alert.
    pub trigger: Decimal,
    /// Pause between samples.
    pub interval: Duration,

    /// Most recent samples, oldest first.
    pub rows: VecDeque<Observation>,
    /// Error shown on the status line until the next sample.
    pub status: Option<String>,

    /// Samples recorded since startup.
    pub samples: u64,
    /// Alerts played since startup.
    pub alerts: u64,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            asset: config.market.ticker.clone(),
            fiat: config.market.fiat.clone(),
            trigger: config.alert.trigger,
            interval: config.interval,
            rows: VecDeque::with_capacity(MAX_ROWS_DISPLAYED + 1),
            status: None,
            samples: 0,
            alerts: 0,
        }
    }

    /// Appends a sample, dropping the oldest beyond [`MAX_ROWS_DISPLAYED`].
    ///
    /// A new sample also clears the status line.
    pub fn push_observation(&mut self, observation: Observation) {
        self.rows.push_back(observation);
        while self.rows.len() > MAX_ROWS_DISPLAYED {
            self.rows.pop_front();
        }
        self.samples += 1;
        self.status = None;
    }

    /// Counts a played alert.
    pub fn note_alert(&mut self) {
        self.alerts += 1;
    }

    /// Sets an error message on the status line.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_app() -> App {
        let config = AppConfig {
            market: crate::config::MarketConfig {
                ticker: "ZEC".into(),
                fiat: "EUR".into(),
                stable: "USDT".into(),
                endpoint: "http://localhost".into(),
                request_timeout: Duration::from_secs(1),
            },
            alert: crate::config::AlertConfig {
                trigger: dec!(0.03),
                sound_file: "alert.wav".into(),
            },
            interval: Duration::from_secs(15),
            log_file: None,
        };
        App::new(&config)
    }

    #[test]
    fn keeps_latest_fifteen_in_order() {
        let mut app = test_app();
        for i in 1..=16 {
            app.push_observation(Observation::new("ZEC", dec!(1), Decimal::from(i)));
        }

        assert_eq!(app.rows.len(), MAX_ROWS_DISPLAYED);
        let prices: Vec<Decimal> = app.rows.iter().map(|o| o.price).collect();
        let expected: Vec<Decimal> = (2..=16).map(Decimal::from).collect();
        assert_eq!(prices, expected);
        assert_eq!(app.samples, 16);
    }

    #[test]
    fn new_sample_clears_status() {
        let mut app = test_app();
        app.show_error("Sound playback failed");
        assert!(app.status.is_some());

        app.push_observation(Observation::new("ZEC", dec!(1), dec!(1)));
        assert!(app.status.is_none());
    }
}
