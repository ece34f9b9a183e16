//! Application configuration loaded from environment variables.
//!
//! Every value has a default, so the watcher runs without any setup:
//! - `ZCASH_ALERT_TICKER` — asset to watch (default `ZEC`)
//! - `ZCASH_ALERT_FIAT` — currency the price is shown in (default `EUR`)
//! - `ZCASH_ALERT_STABLE` — common quote both pairs are priced in (default `USDT`)
//! - `ZCASH_ALERT_TRIGGER` — percentage move that rings the alert (default `0.03`)
//! - `ZCASH_ALERT_SOUND` — sound file played on alert (default `alert.wav`)
//! - `ZCASH_ALERT_INTERVAL_SECS` — seconds between samples (default `15`)
//! - `ZCASH_ALERT_ENDPOINT` — average price endpoint (default Binance `avgPrice`)
//! - `ZCASH_ALERT_TIMEOUT_SECS` — per-request timeout (default `10`)
//! - `ZCASH_ALERT_LOG_FILE` — when set, tracing output is appended here

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

/// Default average price endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.binance.com/api/v3/avgPrice";

pub const DEFAULT_TICKER: &str = "ZEC";
pub const DEFAULT_FIAT: &str = "EUR";
pub const DEFAULT_STABLE: &str = "USDT";
pub const DEFAULT_TRIGGER: Decimal = Decimal::from_parts(3, 0, 0, false, 2);
pub const DEFAULT_SOUND_FILE: &str = "alert.wav";
pub const DEFAULT_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub market: MarketConfig,
    pub alert: AlertConfig,
    /// Pause between the end of one sample and the start of the next.
    pub interval: Duration,
    pub log_file: Option<PathBuf>,
}

/// Which prices to fetch and from where.
#[derive(Clone, Debug)]
pub struct MarketConfig {
    pub ticker: String,
    pub fiat: String,
    pub stable: String,
    pub endpoint: String,
    pub request_timeout: Duration,
}

impl MarketConfig {
    /// Exchange symbol for the asset, e.g. `ZECUSDT`.
    pub fn asset_symbol(&self) -> String {
        format!("{}{}", self.ticker, self.stable)
    }

    /// Exchange symbol for the fiat leg, e.g. `EURUSDT`.
    pub fn fiat_symbol(&self) -> String {
        format!("{}{}", self.fiat, self.stable)
    }
}

/// When and how to ring.
#[derive(Clone, Debug)]
pub struct AlertConfig {
    pub trigger: Decimal,
    pub sound_file: PathBuf,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`AlertError::Config`](crate::AlertError::Config) if a variable is
/// set to a value that does not parse or is out of range.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let ticker = code_var("ZCASH_ALERT_TICKER", DEFAULT_TICKER)?;
    let fiat = code_var("ZCASH_ALERT_FIAT", DEFAULT_FIAT)?;
    let stable = code_var("ZCASH_ALERT_STABLE", DEFAULT_STABLE)?;

    let trigger = parsed_var("ZCASH_ALERT_TRIGGER", DEFAULT_TRIGGER)?;
    if trigger.is_sign_negative() {
        return Err(crate::AlertError::Config(format!(
            "ZCASH_ALERT_TRIGGER must not be negative, got {trigger}"
        )));
    }

    let interval = seconds_var("ZCASH_ALERT_INTERVAL_SECS", DEFAULT_INTERVAL_SECS)?;
    let request_timeout = seconds_var("ZCASH_ALERT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

    let endpoint =
        non_empty_var("ZCASH_ALERT_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let sound_file = non_empty_var("ZCASH_ALERT_SOUND")
        .unwrap_or_else(|| DEFAULT_SOUND_FILE.to_string())
        .into();
    let log_file = non_empty_var("ZCASH_ALERT_LOG_FILE").map(PathBuf::from);

    Ok(AppConfig {
        market: MarketConfig {
            ticker,
            fiat,
            stable,
            endpoint,
            request_timeout,
        },
        alert: AlertConfig {
            trigger,
            sound_file,
        },
        interval,
        log_file,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Reads an asset or currency code, upper-cased.
fn code_var(name: &str, default: &str) -> crate::Result<String> {
    let code = non_empty_var(name)
        .unwrap_or_else(|| default.to_string())
        .to_ascii_uppercase();
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(crate::AlertError::Config(format!(
            "{name} must be alphanumeric, got {code:?}"
        )));
    }
    Ok(code)
}

fn parsed_var<T>(name: &str, default: T) -> crate::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| crate::AlertError::Config(format!("{name}={raw:?}: {e}"))),
        None => Ok(default),
    }
}

fn seconds_var(name: &str, default: u64) -> crate::Result<Duration> {
    let secs: u64 = parsed_var(name, default)?;
    if secs == 0 {
        return Err(crate::AlertError::Config(format!(
            "{name} must be greater than zero"
        )));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 9] = [
        "ZCASH_ALERT_TICKER",
        "ZCASH_ALERT_FIAT",
        "ZCASH_ALERT_STABLE",
        "ZCASH_ALERT_TRIGGER",
        "ZCASH_ALERT_SOUND",
        "ZCASH_ALERT_INTERVAL_SECS",
        "ZCASH_ALERT_ENDPOINT",
        "ZCASH_ALERT_TIMEOUT_SECS",
        "ZCASH_ALERT_LOG_FILE",
    ];

    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    /// Helper that clears every config var, applies `vars`, runs `f`, then
    /// restores the originals.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> = ALL_VARS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: every test touching these vars holds ENV_LOCK.
        unsafe {
            for k in ALL_VARS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.market.ticker, "ZEC");
            assert_eq!(config.market.fiat, "EUR");
            assert_eq!(config.market.asset_symbol(), "ZECUSDT");
            assert_eq!(config.market.fiat_symbol(), "EURUSDT");
            assert_eq!(config.market.endpoint, DEFAULT_ENDPOINT);
            assert_eq!(config.alert.trigger.to_string(), "0.03");
            assert_eq!(config.alert.sound_file, PathBuf::from("alert.wav"));
            assert_eq!(config.interval, Duration::from_secs(15));
            assert!(config.log_file.is_none());
        });
    }

    #[test]
    fn codes_are_upper_cased() {
        with_env(
            &[("ZCASH_ALERT_TICKER", "btc"), ("ZCASH_ALERT_FIAT", "gbp")],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.market.asset_symbol(), "BTCUSDT");
                assert_eq!(config.market.fiat_symbol(), "GBPUSDT");
            },
        );
    }

    #[test]
    fn rejects_non_alphanumeric_code() {
        with_env(&[("ZCASH_ALERT_TICKER", "ZEC&x=1")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("ZCASH_ALERT_TICKER"));
        });
    }

    #[test]
    fn parses_custom_trigger_and_interval() {
        with_env(
            &[
                ("ZCASH_ALERT_TRIGGER", "0.5"),
                ("ZCASH_ALERT_INTERVAL_SECS", "60"),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.alert.trigger.to_string(), "0.5");
                assert_eq!(config.interval, Duration::from_secs(60));
            },
        );
    }

    #[test]
    fn rejects_zero_interval() {
        with_env(&[("ZCASH_ALERT_INTERVAL_SECS", "0")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("greater than zero"));
        });
    }

    #[test]
    fn rejects_negative_trigger() {
        with_env(&[("ZCASH_ALERT_TRIGGER", "-1")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("must not be negative"));
        });
    }

    #[test]
    fn rejects_garbage_trigger() {
        with_env(&[("ZCASH_ALERT_TRIGGER", "three percent")], || {
            assert!(fetch_config().is_err());
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("ZCASH_ALERT_TICKER", ""),
                ("ZCASH_ALERT_ENDPOINT", ""),
                ("ZCASH_ALERT_LOG_FILE", ""),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.market.ticker, "ZEC");
                assert_eq!(config.market.endpoint, DEFAULT_ENDPOINT);
                assert!(config.log_file.is_none());
            },
        );
    }
}
