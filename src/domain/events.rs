use crate::domain::logging::LogComponent;
use crate::log_debug;
use std::collections::HashMap;
use std::sync::Mutex;
use strum::{AsRefStr, EnumString};

/// Inbound topics subscribed by the hub. The string forms are the channel
/// boundary identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr)]
pub enum InboundTopic {
    #[strum(serialize = "hub:set-scale-index")]
    SetScaleIndex,
    #[strum(serialize = "hub:display-overlay")]
    DisplayOverlay,
    #[strum(serialize = "hub:remove-overlay")]
    RemoveOverlay,
}

/// Inbound user-interaction events, one variant per topic. Pane/overlay ids
/// are positions within the active pane list as the UI last saw it; stale
/// ids are tolerated by the handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubEvent {
    SetScaleIndex { pane_id: usize, index: i32, side_idxs: Vec<i32> },
    DisplayOverlay { pane_id: usize, ov_id: usize, flag: bool },
    RemoveOverlay { pane_id: usize, ov_id: usize },
}

impl HubEvent {
    pub fn topic(&self) -> InboundTopic {
        match self {
            HubEvent::SetScaleIndex { .. } => InboundTopic::SetScaleIndex,
            HubEvent::DisplayOverlay { .. } => InboundTopic::DisplayOverlay,
            HubEvent::RemoveOverlay { .. } => InboundTopic::RemoveOverlay,
        }
    }
}

/// Outbound notifications emitted after a mutation, one variant per
/// topic/name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// `chart` / `update-layout`
    UpdateLayout,
    /// `ll-{pane_id}-{ov_id}` / `update-ll`, scoped to one legend line.
    UpdateLegendLine { pane_id: usize, ov_id: usize },
}

impl Notice {
    pub fn topic(&self) -> String {
        match self {
            Notice::UpdateLayout => "chart".to_string(),
            Notice::UpdateLegendLine { pane_id, ov_id } => format!("ll-{}-{}", pane_id, ov_id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Notice::UpdateLayout => "update-layout",
            Notice::UpdateLegendLine { .. } => "update-ll",
        }
    }
}

/// Record of one outbound emission, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub topic: String,
    pub name: String,
}

type EventHandler = Box<dyn Fn(&HubEvent) + Send + Sync>;
type NoticeHandler = Box<dyn Fn(&Notice) + Send + Sync>;

/// Per-chart publish/subscribe channel. Inbound events dispatch through a
/// handler table keyed by topic; outbound notifications are recorded and
/// forwarded to any scoped subscribers.
///
/// Dispatch is synchronous and runs with the handler table locked, so
/// handlers must not subscribe from inside a handler.
pub struct EventChannel {
    chart_id: String,
    handlers: Mutex<HashMap<InboundTopic, Vec<EventHandler>>>,
    spec_handlers: Mutex<HashMap<String, Vec<NoticeHandler>>>,
    emitted: Mutex<Vec<Emitted>>,
}

impl EventChannel {
    pub fn new(chart_id: &str) -> Self {
        Self {
            chart_id: chart_id.to_string(),
            handlers: Mutex::new(HashMap::new()),
            spec_handlers: Mutex::new(HashMap::new()),
            emitted: Mutex::new(Vec::new()),
        }
    }

    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    /// Subscribes a handler to an inbound topic.
    pub fn on(&self, topic: InboundTopic, handler: EventHandler) {
        self.handlers.lock().unwrap().entry(topic).or_default().push(handler);
    }

    /// Dispatches an inbound event to every handler of its topic.
    pub fn emit(&self, event: HubEvent) {
        log_debug!(
            LogComponent::Domain("Events"),
            "[{}] emit {}",
            self.chart_id,
            event.topic().as_ref()
        );
        let handlers = self.handlers.lock().unwrap();
        if let Some(subscribed) = handlers.get(&event.topic()) {
            for handler in subscribed {
                handler(&event);
            }
        }
    }

    /// Subscribes a handler to one outbound topic string, e.g. `ll-0-1`.
    pub fn on_spec(&self, topic: &str, handler: NoticeHandler) {
        self.spec_handlers.lock().unwrap().entry(topic.to_string()).or_default().push(handler);
    }

    /// Emits an outbound notification to its topic.
    pub fn emit_spec(&self, notice: Notice) {
        log_debug!(
            LogComponent::Domain("Events"),
            "[{}] emit_spec {}/{}",
            self.chart_id,
            notice.topic(),
            notice.name()
        );
        self.emitted
            .lock()
            .unwrap()
            .push(Emitted { topic: notice.topic(), name: notice.name().to_string() });
        let handlers = self.spec_handlers.lock().unwrap();
        if let Some(subscribed) = handlers.get(&notice.topic()) {
            for handler in subscribed {
                handler(&notice);
            }
        }
    }

    /// Takes the recorded outbound notifications, clearing the record.
    pub fn drain_emitted(&self) -> Vec<Emitted> {
        std::mem::take(&mut *self.emitted.lock().unwrap())
    }
}
