use super::value_objects::WindowView;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form settings/props bag carried across the channel boundary.
pub type Attrs = Map<String, Value>;

/// The chart-data tree. Deserialization repairs a partially-specified input:
/// every missing collection defaults to empty, `index_based` to `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartData {
    pub panes: Vec<Pane>,
    pub index_based: bool,
}

/// Domain entity - Pane
///
/// `id` is a dense position reassigned on every normalization pass and is
/// not stable across structural edits. `uuid` is assigned once and is the
/// only stable pane identity; a pane without one is not yet active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pane {
    pub id: usize,
    pub uuid: Option<String>,
    pub overlays: Vec<Overlay>,
    pub scripts: Vec<ScriptDescriptor>,
    pub settings: PaneSettings,
}

/// Interaction state accumulated on a pane.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaneSettings {
    /// Scale index used for the grid.
    pub scale_index: Option<i32>,
    /// Left & right scale indices.
    pub scale_side_idxs: Vec<i32>,
    #[serde(flatten)]
    pub extra: Attrs,
}

/// Domain entity - Overlay
///
/// `data_view` / `data_subset` are derived on every windowing pass and are
/// never persisted independently of `data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overlay {
    pub id: usize,
    pub uuid: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub ov_type: String,
    /// At most one overlay in the whole tree is main after `detect_main`.
    pub main: bool,
    pub data: Vec<DataPoint>,
    /// Shifts the requested range bounds before windowing, letting the
    /// overlay's native indices differ from the shared chart index space.
    pub index_offset: i64,
    #[serde(skip)]
    pub data_view: Option<WindowView>,
    #[serde(skip)]
    pub data_subset: Vec<DataPoint>,
    pub data_ext: Attrs,
    pub settings: OverlaySettings,
    pub props: Attrs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySettings {
    pub display: Option<bool>,
    #[serde(flatten)]
    pub extra: Attrs,
}

/// Indicator script descriptor, normalized like an overlay: sequential id,
/// stable uuid, defaulted settings/props.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptDescriptor {
    pub id: usize,
    pub uuid: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub script_type: String,
    pub settings: Attrs,
    pub props: Attrs,
}

/// One row of an overlay's series: the shared time/index axis value followed
/// by the overlay-specific columns. Serialized as a flat `[time, v1, v2, …]`
/// array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct DataPoint {
    pub time: f64,
    pub values: Vec<f64>,
}

impl DataPoint {
    pub fn new(time: f64, values: Vec<f64>) -> Self {
        Self { time, values }
    }
}

impl From<Vec<f64>> for DataPoint {
    fn from(mut row: Vec<f64>) -> Self {
        if row.is_empty() {
            return Self { time: 0.0, values: Vec::new() };
        }
        let values = row.split_off(1);
        Self { time: row[0], values }
    }
}

impl From<DataPoint> for Vec<f64> {
    fn from(point: DataPoint) -> Self {
        let mut row = Vec::with_capacity(point.values.len() + 1);
        row.push(point.time);
        row.extend(point.values);
        row
    }
}
