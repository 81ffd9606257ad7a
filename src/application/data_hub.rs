use crate::domain::chart_data::{
    Attrs, ChartData, DataPoint, IndexSearch, Overlay, Pane, Range, RangeSearch, TimeSearch,
    WindowView, services,
};
use crate::domain::errors::HubResult;
use crate::domain::events::{EventChannel, HubEvent, Notice};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info};
use std::sync::{Arc, Mutex};

use super::script_client::ScriptClient;

pub type SharedHub = Arc<Mutex<DataHub>>;

/// Owns the normalized chart-data tree, the windowing pipeline and the
/// event-driven mutation handlers for one chart instance.
///
/// Lifecycle: `init` stores the tree, `calc_subset` completes its structure
/// and computes the first window, `update_range` recomputes windows on every
/// viewport change, and the three inbound event handlers are the only other
/// mutation paths.
pub struct DataHub {
    chart_id: String,
    events: Arc<EventChannel>,
    se: Arc<ScriptClient>,
    data: ChartData,
    index_based: bool,
    // Derived by detect_main: indices into data.panes.
    chart: Option<usize>,
    offchart: Vec<usize>,
    main_ov: Option<(usize, usize)>,
    main_pane_id: Option<usize>,
    search_ib: Box<dyn RangeSearch>,
    search_ts: Box<dyn RangeSearch>,
}

impl DataHub {
    pub fn new(chart_id: &str, events: Arc<EventChannel>, se: Arc<ScriptClient>) -> Self {
        Self {
            chart_id: chart_id.to_string(),
            events,
            se,
            data: ChartData::default(),
            index_based: false,
            chart: None,
            offchart: Vec::new(),
            main_ov: None,
            main_pane_id: None,
            search_ib: Box::new(IndexSearch),
            search_ts: Box::new(TimeSearch),
        }
    }

    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    pub fn events(&self) -> &Arc<EventChannel> {
        &self.events
    }

    /// Stores the chart-data tree and resets the derived main/chart fields.
    /// The tree and everything derived from it is read-only to callers.
    pub fn init(&mut self, data: ChartData) {
        self.index_based = data.index_based;
        self.data = data;

        self.chart = None;
        self.offchart.clear();
        self.main_ov = None;
        self.main_pane_id = None;

        log_info!(
            LogComponent::Application("DataHub"),
            "[{}] init: {} panes, index_based={}",
            self.chart_id,
            self.data.panes.len(),
            self.index_based
        );
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Mutable tree access for structural edits made outside the hub.
    /// `calc_subset` must run again afterwards.
    pub fn data_mut(&mut self) -> &mut ChartData {
        &mut self.data
    }

    pub fn index_based(&self) -> bool {
        self.index_based
    }

    /// Windowing-only pass for the new range. Hot path: ids, uuids and
    /// defaults are untouched; `calc_subset` must have run at least once.
    pub fn update_range(&mut self, range: Range) {
        let search: &dyn RangeSearch =
            if self.index_based { self.search_ib.as_ref() } else { self.search_ts.as_ref() };
        for pane in &mut self.data.panes {
            for ov in &mut pane.overlays {
                let view = filter(search, &ov.data, range, ov.index_offset);
                ov.data_subset = view.make_subset(&ov.data);
                ov.data_view = Some(view);
            }
        }
    }

    /// Full normalization pass: assigns dense ids in document order, fills
    /// missing uuids, and computes the visible window for every overlay.
    /// Runs once after `init` and again after any external structural edit.
    pub fn calc_subset(&mut self, range: Range) {
        log_debug!(
            LogComponent::Application("DataHub"),
            "[{}] calc_subset [{}, {}]",
            self.chart_id,
            range.start,
            range.end
        );
        let search: &dyn RangeSearch =
            if self.index_based { self.search_ib.as_ref() } else { self.search_ts.as_ref() };
        for (pane_id, pane) in self.data.panes.iter_mut().enumerate() {
            pane.id = pane_id;
            for (ov_id, ov) in pane.overlays.iter_mut().enumerate() {
                ov.id = ov_id;
                let view = filter(search, &ov.data, range, ov.index_offset);
                ov.data_subset = view.make_subset(&ov.data);
                ov.data_view = Some(view);
                if ov.uuid.is_none() {
                    ov.uuid = Some(services::next_uuid());
                }
            }
            // Flag that pane is ready for rendering
            if pane.uuid.is_none() {
                pane.uuid = Some(services::next_uuid());
            }
        }
    }

    /// Detects the main overlay and classifies panes into chart/offchart.
    ///
    /// The first overlay already flagged main wins; with none flagged, the
    /// first overlay in flattened order is promoted. Every other main flag
    /// is forced off. No-op when there are no overlays at all. Callers must
    /// re-run this after any structural edit that could change the outcome.
    pub fn detect_main(&mut self) {
        let all = services::overlay_positions(&self.data.panes);
        let Some(&first) = all.first() else { return };

        let main = all
            .iter()
            .copied()
            .find(|&(pi, oi)| self.data.panes[pi].overlays[oi].main)
            .unwrap_or(first);

        // Exactly one main flag survives, duplicates are cleared.
        for &(pi, oi) in &all {
            self.data.panes[pi].overlays[oi].main = (pi, oi) == main;
        }

        let (main_pane, _) = main;
        self.chart = Some(main_pane);
        self.offchart = (0..self.data.panes.len()).filter(|&i| i != main_pane).collect();
        self.main_ov = Some(main);
        // Position of the main pane within the active pane list.
        self.main_pane_id = if self.data.panes[main_pane].uuid.is_some() {
            Some(self.data.panes.iter().take(main_pane).filter(|p| p.uuid.is_some()).count())
        } else {
            None
        };
    }

    /// Pane containing the main overlay, once `detect_main` has run.
    pub fn chart(&self) -> Option<&Pane> {
        self.chart.and_then(|i| self.data.panes.get(i))
    }

    /// All panes except the main one.
    pub fn offchart(&self) -> Vec<&Pane> {
        self.offchart.iter().filter_map(|&i| self.data.panes.get(i)).collect()
    }

    pub fn main_ov(&self) -> Option<&Overlay> {
        self.main_ov
            .and_then(|(pi, oi)| self.data.panes.get(pi).and_then(|p| p.overlays.get(oi)))
    }

    pub fn main_pane_id(&self) -> Option<usize> {
        self.main_pane_id
    }

    /// Normalizes every pane's script list: sequential id, stable uuid.
    /// Settings/props were already defaulted at deserialization.
    pub fn normalize_scripts(&mut self) {
        for pane in &mut self.data.panes {
            for (script_id, script) in pane.scripts.iter_mut().enumerate() {
                script.id = script_id;
                if script.uuid.is_none() {
                    script.uuid = Some(services::next_uuid());
                }
            }
        }
    }

    /// Active panes: those already normalized (uuid assigned).
    pub fn panes(&self) -> Vec<&Pane> {
        self.data.panes.iter().filter(|p| p.uuid.is_some()).collect()
    }

    /// Overlay lookup by position within the active pane list. Absent, not
    /// an error, for any stale index.
    pub fn overlay(&self, pane_id: usize, ov_id: usize) -> Option<&Overlay> {
        self.panes().get(pane_id).and_then(|pane| pane.overlays.get(ov_id))
    }

    pub fn ov_data(&self, pane_id: usize, ov_id: usize) -> Option<&[DataPoint]> {
        self.overlay(pane_id, ov_id).map(|ov| ov.data.as_slice())
    }

    pub fn ov_data_ext(&self, pane_id: usize, ov_id: usize) -> Option<&Attrs> {
        self.overlay(pane_id, ov_id).map(|ov| &ov.data_ext)
    }

    pub fn ov_data_subset(&self, pane_id: usize, ov_id: usize) -> Option<&[DataPoint]> {
        self.overlay(pane_id, ov_id).map(|ov| ov.data_subset.as_slice())
    }

    /// All overlays in document order, optionally filtered by exact type.
    pub fn all_overlays(&self, ov_type: Option<&str>) -> Vec<&Overlay> {
        let all = services::all_overlays(&self.data.panes);
        match ov_type {
            Some(t) => all.into_iter().filter(|ov| ov.ov_type == t).collect(),
            None => all,
        }
    }

    /// Replaces both range-search strategies.
    pub fn set_range_search(
        &mut self,
        index_based: Box<dyn RangeSearch>,
        time_based: Box<dyn RangeSearch>,
    ) {
        self.search_ib = index_based;
        self.search_ts = time_based;
    }

    // Event handlers

    /// Dispatch table for the inbound event variants.
    pub fn handle(&mut self, event: HubEvent) {
        match event {
            HubEvent::SetScaleIndex { pane_id, index, side_idxs } => {
                self.on_scale_index(pane_id, index, side_idxs)
            }
            HubEvent::DisplayOverlay { pane_id, ov_id, flag } => {
                self.on_display_ov(pane_id, ov_id, flag)
            }
            HubEvent::RemoveOverlay { pane_id, ov_id } => self.on_remove_ov(pane_id, ov_id),
        }
    }

    pub fn on_scale_index(&mut self, pane_id: usize, index: i32, side_idxs: Vec<i32>) {
        let Some(pi) = self.active_pane_index(pane_id) else { return };
        let pane = &mut self.data.panes[pi];

        // Main scale index (that used for the grid)
        pane.settings.scale_index = Some(index);

        // Local left & right indices used to display the correct Scale
        pane.settings.scale_side_idxs = side_idxs;

        self.events.emit_spec(Notice::UpdateLayout);
    }

    pub fn on_display_ov(&mut self, pane_id: usize, ov_id: usize, flag: bool) {
        let Some(pi) = self.active_pane_index(pane_id) else { return };
        let Some(ov) = self.data.panes[pi].overlays.get_mut(ov_id) else { return };

        ov.settings.display = Some(flag);

        self.events.emit_spec(Notice::UpdateLayout);
        self.events.emit_spec(Notice::UpdateLegendLine { pane_id, ov_id });
    }

    pub fn on_remove_ov(&mut self, pane_id: usize, ov_id: usize) {
        let Some(pi) = self.active_pane_index(pane_id) else { return };
        let pane = &mut self.data.panes[pi];

        match pane.overlays.get(ov_id) {
            None => return,
            // Don't remove the main overlay
            Some(ov) if ov.main => return,
            Some(_) => {}
        }
        pane.overlays.remove(ov_id);
        let pane_now_empty = pane.overlays.is_empty();

        // Empty pane goes away too, addressed by the same event-time index
        // the UI captured.
        if pane_now_empty && pane_id < self.data.panes.len() {
            self.data.panes.remove(pane_id);
        }

        self.events.emit_spec(Notice::UpdateLayout);
    }

    /// Position in `data.panes` of the active pane at `pane_id`.
    fn active_pane_index(&self, pane_id: usize) -> Option<usize> {
        self.data
            .panes
            .iter()
            .enumerate()
            .filter(|(_, pane)| pane.uuid.is_some())
            .map(|(i, _)| i)
            .nth(pane_id)
    }

    pub(crate) fn script_client(&self) -> Arc<ScriptClient> {
        Arc::clone(&self.se)
    }
}

/// Windowing pipeline: shifts the range into the overlay's native index
/// space, runs the search strategy, and wraps the result. The offset is
/// applied before the search; applying it after would silently shift the
/// visible window.
fn filter(search: &dyn RangeSearch, data: &[DataPoint], range: Range, offset: i64) -> WindowView {
    let (lo, hi) = range.shifted(offset);
    let (start, end) = search.search(data, lo, hi);
    WindowView::new(start, end)
}

/// Normalizes script descriptors and, when `exec` is requested, yields once
/// and delegates to the script client's upload-and-execute. Engine failure
/// propagates to the caller.
pub async fn load_scripts(hub: &SharedHub, exec: bool) -> HubResult<()> {
    let se = {
        let mut hub = hub.lock().unwrap();
        hub.normalize_scripts();
        hub.script_client()
    };
    if exec {
        services::pause().await; // Wait for init
        se.upload_and_exec().await?;
    }
    Ok(())
}
