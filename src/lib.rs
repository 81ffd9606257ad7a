//! Data-windowing and overlay-lifecycle core for a multi-pane time-series
//! chart.
//!
//! A [`Registry`] hands out one [`DataHub`] per chart identifier, wired to a
//! per-chart [`EventChannel`](domain::events::EventChannel) and
//! [`ScriptClient`](application::ScriptClient). The hub normalizes the
//! chart-data tree (`calc_subset`), recomputes visible windows on every
//! viewport change (`update_range`), and mutates settings/structure in
//! response to inbound user-interaction events.

pub mod application;
pub mod domain;

pub use application::{
    DataHub, NoopEngine, Registry, ScriptClient, ScriptEngine, SharedHub, load_scripts,
};
pub use domain::chart_data::{
    Attrs, ChartData, DataPoint, IndexSearch, Overlay, OverlaySettings, Pane, PaneSettings, Range,
    RangeSearch, ScriptDescriptor, TimeSearch, WindowView,
};
pub use domain::errors::{HubError, HubResult};
pub use domain::events::{Emitted, EventChannel, HubEvent, InboundTopic, Notice};

use domain::logging::{LogLevel, StderrLogger};

/// Installs the development stderr logger. Optional; without it the hub
/// logs nowhere.
pub fn initialize() {
    domain::logging::init_logger(Box::new(StderrLogger::new(LogLevel::Debug)));
}
