use crate::domain::chart_data::ScriptDescriptor;
use crate::domain::errors::{HubError, HubResult};
use crate::domain::logging::LogComponent;
use crate::log_info;
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, Weak};

use super::data_hub::{DataHub, SharedHub};

/// Seam to the indicator-script engine. Takes the normalized descriptors,
/// uploads and executes them asynchronously.
pub trait ScriptEngine: Send + Sync {
    fn upload_and_exec(&self, scripts: Vec<ScriptDescriptor>) -> BoxFuture<'static, HubResult<()>>;
}

/// Engine in place until a real one is attached. Accepts everything.
pub struct NoopEngine;

impl ScriptEngine for NoopEngine {
    fn upload_and_exec(
        &self,
        _scripts: Vec<ScriptDescriptor>,
    ) -> BoxFuture<'static, HubResult<()>> {
        Box::pin(futures::future::ready(Ok(())))
    }
}

/// Per-chart script-runtime client. Holds a non-owning handle back to its
/// hub, resolved on demand; the hub owns the client, not the other way
/// around.
pub struct ScriptClient {
    chart_id: String,
    hub: Mutex<Weak<Mutex<DataHub>>>,
    engine: Mutex<Arc<dyn ScriptEngine>>,
}

impl ScriptClient {
    pub fn new(chart_id: &str) -> Self {
        Self {
            chart_id: chart_id.to_string(),
            hub: Mutex::new(Weak::new()),
            engine: Mutex::new(Arc::new(NoopEngine)),
        }
    }

    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    pub(crate) fn bind_hub(&self, hub: &SharedHub) {
        *self.hub.lock().unwrap() = Arc::downgrade(hub);
    }

    pub fn set_engine(&self, engine: Arc<dyn ScriptEngine>) {
        *self.engine.lock().unwrap() = engine;
    }

    pub fn hub(&self) -> Option<SharedHub> {
        self.hub.lock().unwrap().upgrade()
    }

    /// Collects the hub's normalized script descriptors and hands them to
    /// the engine. Engine failure propagates.
    pub async fn upload_and_exec(&self) -> HubResult<()> {
        let hub = self.hub().ok_or_else(|| HubError::HubUnbound(self.chart_id.clone()))?;
        let scripts: Vec<ScriptDescriptor> = {
            let hub = hub.lock().unwrap();
            hub.panes().iter().flat_map(|pane| pane.scripts.iter().cloned()).collect()
        };
        log_info!(
            LogComponent::Application("Scripts"),
            "[{}] uploading {} scripts",
            self.chart_id,
            scripts.len()
        );
        let engine = Arc::clone(&*self.engine.lock().unwrap());
        engine.upload_and_exec(scripts).await
    }
}
