//! Terminal User Interface for the price watcher.
//!
//! A single full-screen view: banner on top, the most recent samples in a
//! table, and a status line at the bottom.

pub mod app;
pub mod components;
pub mod event;
pub mod renderer;
pub mod ui;

pub use app::App;
pub use event::{Event, EventSource, Events};
pub use renderer::{Present, Renderer};
pub use ui::render;
