use crate::domain::events::{EventChannel, HubEvent, InboundTopic};
use crate::domain::logging::LogComponent;
use crate::log_debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::data_hub::{DataHub, SharedHub};
use super::script_client::ScriptClient;

/// Keyed instance registry owned by the composition root: at most one hub,
/// channel and script client per chart identifier for the registry's
/// lifetime. Entries are never evicted.
#[derive(Default)]
pub struct Registry {
    hubs: Mutex<HashMap<String, SharedHub>>,
    channels: Mutex<HashMap<String, Arc<EventChannel>>>,
    scripts: Mutex<HashMap<String, Arc<ScriptClient>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event channel for a chart id, created on first request.
    pub fn channel(&self, chart_id: &str) -> Arc<EventChannel> {
        Arc::clone(
            self.channels
                .lock()
                .unwrap()
                .entry(chart_id.to_string())
                .or_insert_with(|| Arc::new(EventChannel::new(chart_id))),
        )
    }

    /// Script client for a chart id, created on first request.
    pub fn script_client(&self, chart_id: &str) -> Arc<ScriptClient> {
        Arc::clone(
            self.scripts
                .lock()
                .unwrap()
                .entry(chart_id.to_string())
                .or_insert_with(|| Arc::new(ScriptClient::new(chart_id))),
        )
    }

    /// Hub for a chart id. First request creates it, wires the channel and
    /// the script client's back-reference, and subscribes the inbound event
    /// handlers.
    pub fn hub(&self, chart_id: &str) -> SharedHub {
        let mut hubs = self.hubs.lock().unwrap();
        if let Some(hub) = hubs.get(chart_id) {
            return Arc::clone(hub);
        }

        log_debug!(LogComponent::Application("Registry"), "creating hub '{}'", chart_id);
        let events = self.channel(chart_id);
        let se = self.script_client(chart_id);
        let hub =
            Arc::new(Mutex::new(DataHub::new(chart_id, Arc::clone(&events), Arc::clone(&se))));

        se.bind_hub(&hub);
        subscribe_hub(&events, &hub);

        hubs.insert(chart_id.to_string(), Arc::clone(&hub));
        hub
    }
}

// EVENT INTERFACE
fn subscribe_hub(events: &Arc<EventChannel>, hub: &SharedHub) {
    let topics =
        [InboundTopic::SetScaleIndex, InboundTopic::DisplayOverlay, InboundTopic::RemoveOverlay];
    for topic in topics {
        let weak = Arc::downgrade(hub);
        events.on(
            topic,
            Box::new(move |event: &HubEvent| {
                if let Some(hub) = weak.upgrade() {
                    hub.lock().unwrap().handle(event.clone());
                }
            }),
        );
    }
}
