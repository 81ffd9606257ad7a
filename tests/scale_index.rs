use chart_data_hub::*;

#[test]
fn scale_index_event_updates_pane_settings() {
    let registry = Registry::new();
    let hub = registry.hub("scale");
    {
        let mut hub = hub.lock().unwrap();
        hub.init(ChartData {
            panes: vec![Pane {
                overlays: vec![Overlay {
                    name: "a".into(),
                    ov_type: "Candles".into(),
                    data: vec![DataPoint::new(0.0, vec![1.0])],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            index_based: false,
        });
        hub.calc_subset(Range::new(0.0, 1.0));
    }
    let channel = registry.channel("scale");
    channel.drain_emitted();

    channel.emit(HubEvent::SetScaleIndex { pane_id: 0, index: 2, side_idxs: vec![1, 2] });

    {
        let hub = hub.lock().unwrap();
        let settings = &hub.panes()[0].settings;
        assert_eq!(settings.scale_index, Some(2));
        assert_eq!(settings.scale_side_idxs, vec![1, 2]);
    }
    let emitted = channel.drain_emitted();
    assert_eq!(emitted.len(), 1);
    assert_eq!((emitted[0].topic.as_str(), emitted[0].name.as_str()), ("chart", "update-layout"));
}

#[test]
fn stale_pane_index_is_a_noop() {
    let registry = Registry::new();
    let hub = registry.hub("scale-stale");
    hub.lock().unwrap().init(ChartData::default());
    let channel = registry.channel("scale-stale");

    channel.emit(HubEvent::SetScaleIndex { pane_id: 4, index: 1, side_idxs: vec![] });

    assert!(channel.drain_emitted().is_empty());
}
