//! The polling loop.
//!
//! Each iteration fetches the cross price, derives the move since the last
//! sample, shows it, and rings if the move crosses the trigger. Stages run
//! strictly one after another; the loop then sleeps for the configured
//! interval. [`Monitor::tick`] runs one iteration and reports what happened
//! as a [`Step`]; [`run`] repeats it until the API becomes unreachable or the
//! user quits.

use std::time::Duration;

use rust_decimal::Decimal;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, warn};

use crate::AlertError;
use crate::alert::{AlertOutcome, Alerter, SoundPlayer};
use crate::fetcher::PriceSource;
use crate::models::Observation;
use crate::tui::{App, Event, EventSource, Present};

/// Result of one iteration.
#[derive(Debug)]
pub enum Step {
    /// A sample was recorded with this move, in percent.
    Recorded(Decimal),
    /// The sample was unusable; the loop carries on at the next interval.
    Skipped(AlertError),
    /// The loop must stop.
    Terminated(AlertError),
}

/// Why [`run`] returned.
#[derive(Debug)]
pub enum Exit {
    /// The user pressed a quit key or the process got SIGINT.
    Interrupted,
    /// The price API could not be reached.
    Network(AlertError),
    /// The terminal could not be drawn to.
    Terminal(AlertError),
}

/// Drives the fetch, compare, present, alert sequence.
pub struct Monitor<S, P> {
    asset: String,
    fiat: String,
    source: S,
    alerter: Alerter<P>,
    previous: Option<Decimal>,
}

impl<S: PriceSource, P: SoundPlayer> Monitor<S, P> {
    pub fn new(
        asset: impl Into<String>,
        fiat: impl Into<String>,
        source: S,
        alerter: Alerter<P>,
    ) -> Self {
        Self {
            asset: asset.into(),
            fiat: fiat.into(),
            source,
            alerter,
            previous: None,
        }
    }

    /// Price recorded by the last successful sample.
    pub fn previous(&self) -> Option<Decimal> {
        self.previous
    }

    /// Builds the sample for a freshly fetched price.
    ///
    /// The very first sample compares the price with itself, so it always
    /// shows a zero move.
    pub fn observe(&self, price: Decimal) -> Observation {
        let previous = self.previous.unwrap_or(price);
        Observation::new(self.asset.as_str(), previous, price)
    }

    /// Runs one iteration: fetch, compare, present, alert.
    ///
    /// Network-class fetch failures terminate; any other fetch failure skips
    /// the sample and leaves the running price untouched. Alert failures are
    /// shown and never affect the outcome.
    pub async fn tick(&mut self, app: &mut App, view: &mut impl Present) -> Step {
        let price = match self.source.cross_price(&self.asset, &self.fiat).await {
            Ok(price) => price,
            Err(e) if e.is_network() => {
                error!("price API unreachable: {e}");
                return Step::Terminated(e);
            }
            Err(e) => {
                warn!("skipping sample: {e}");
                app.show_error(format!("Skipped sample: {e}"));
                if let Err(draw_err) = view.present(app) {
                    return Step::Terminated(draw_err);
                }
                return Step::Skipped(e);
            }
        };

        let observation = self.observe(price);
        let percent = observation.percent;
        debug!(price = %price, previous = %observation.previous, %percent, "sample");

        app.push_observation(observation);
        if let Err(e) = view.present(app) {
            return Step::Terminated(e);
        }

        match self.alerter.check(percent).await {
            AlertOutcome::Quiet => {}
            AlertOutcome::Played => app.note_alert(),
            AlertOutcome::Failed(message) => {
                app.show_error(message);
                if let Err(e) = view.present(app) {
                    return Step::Terminated(e);
                }
            }
        }

        self.previous = Some(price);
        Step::Recorded(percent)
    }
}

/// Repeats [`Monitor::tick`] every `interval` until told to stop.
///
/// Quit keys and SIGINT are honoured while fetching and while sleeping.
/// Resizes are redrawn through the view's throttle, including those that
/// arrive mid-fetch.
pub async fn run<S, P, V, E>(
    monitor: &mut Monitor<S, P>,
    app: &mut App,
    view: &mut V,
    events: &mut E,
    interval: Duration,
) -> Exit
where
    S: PriceSource,
    P: SoundPlayer,
    V: Present,
    E: EventSource,
{
    info!(asset = %monitor.asset, fiat = %monitor.fiat, ?interval, "watching");
    if let Err(e) = view.present(app) {
        return Exit::Terminal(e);
    }

    loop {
        let mut resized = false;
        let step = tokio::select! {
            step = monitor.tick(app, view) => step,
            () = quit_requested(events, &mut resized) => return Exit::Interrupted,
            _ = tokio::signal::ctrl_c() => return Exit::Interrupted,
        };
        if resized {
            view.request_redraw();
        }

        match step {
            Step::Recorded(_) | Step::Skipped(_) => {}
            Step::Terminated(e) if e.is_network() => return Exit::Network(e),
            Step::Terminated(e) => return Exit::Terminal(e),
        }

        let wake_at = Instant::now() + interval;
        loop {
            let redraw_at = view.next_redraw();
            tokio::select! {
                () = sleep_until(wake_at) => break,
                () = sleep_until(redraw_at.unwrap_or(wake_at)), if redraw_at.is_some() => {
                    if let Err(e) = view.flush(app) {
                        return Exit::Terminal(e);
                    }
                }
                event = events.next() => match event {
                    Event::Quit => return Exit::Interrupted,
                    Event::Resize => view.request_redraw(),
                    Event::Other => {}
                },
                _ = tokio::signal::ctrl_c() => return Exit::Interrupted,
            }
        }
    }
}

/// Resolves once the user asks to leave, noting any resize on the way.
async fn quit_requested(events: &mut impl EventSource, resized: &mut bool) {
    loop {
        match events.next().await {
            Event::Quit => return,
            Event::Resize => *resized = true,
            Event::Other => {}
        }
    }
}
