use chart_data_hub::*;

#[test]
fn partial_input_is_repaired_by_defaults() {
    let json = r#"{
        "panes": [
            { "overlays": [ { "type": "Candles", "data": [[1.0, 2.0, 3.0], [2.0, 4.0, 5.0]] } ] },
            {}
        ]
    }"#;
    let data: ChartData = serde_json::from_str(json).unwrap();

    assert!(!data.index_based);
    assert_eq!(data.panes.len(), 2);

    let ov = &data.panes[0].overlays[0];
    assert!(!ov.main);
    assert_eq!(ov.index_offset, 0);
    assert!(ov.uuid.is_none());
    assert!(ov.data_ext.is_empty());
    assert!(ov.props.is_empty());
    assert_eq!(ov.data[0], DataPoint::new(1.0, vec![2.0, 3.0]));

    let empty = &data.panes[1];
    assert!(empty.overlays.is_empty());
    assert!(empty.scripts.is_empty());
    assert!(empty.settings.scale_index.is_none());
}

#[test]
fn repaired_tree_normalizes_cleanly() {
    let json = r#"{
        "indexBased": true,
        "panes": [ { "overlays": [ { "type": "Spline", "data": [[0.0], [1.0], [2.0]] } ] } ]
    }"#;
    let data: ChartData = serde_json::from_str(json).unwrap();

    let registry = Registry::new();
    let hub = registry.hub("json");
    let mut hub = hub.lock().unwrap();
    hub.init(data);
    assert!(hub.index_based());

    hub.calc_subset(Range::new(0.0, 1.0));
    assert_eq!(hub.ov_data_subset(0, 0).unwrap().len(), 2);
}

#[test]
fn derived_windows_are_not_serialized() {
    let registry = Registry::new();
    let hub = registry.hub("json-out");
    let mut hub = hub.lock().unwrap();
    hub.init(ChartData {
        panes: vec![Pane {
            overlays: vec![Overlay {
                ov_type: "Candles".into(),
                data: vec![DataPoint::new(0.0, vec![1.0])],
                ..Default::default()
            }],
            ..Default::default()
        }],
        index_based: false,
    });
    hub.calc_subset(Range::new(0.0, 1.0));

    let out = serde_json::to_value(hub.data()).unwrap();
    let ov = &out["panes"][0]["overlays"][0];
    assert!(ov.get("dataView").is_none());
    assert!(ov.get("dataSubset").is_none());
    assert_eq!(ov["data"][0], serde_json::json!([0.0, 1.0]));
}
