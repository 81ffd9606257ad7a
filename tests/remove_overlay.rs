use chart_data_hub::*;

fn overlay(name: &str, main: bool) -> Overlay {
    Overlay {
        name: name.into(),
        ov_type: "Spline".into(),
        main,
        data: vec![DataPoint::new(0.0, vec![1.0])],
        ..Default::default()
    }
}

fn setup(registry: &Registry, id: &str, panes: Vec<Pane>) -> SharedHub {
    let hub = registry.hub(id);
    {
        let mut hub = hub.lock().unwrap();
        hub.init(ChartData { panes, index_based: false });
        hub.calc_subset(Range::new(0.0, 1.0));
        hub.detect_main();
    }
    registry.channel(id).drain_emitted();
    hub
}

#[test]
fn main_overlay_removal_is_ignored() {
    let registry = Registry::new();
    let hub = setup(
        &registry,
        "rm-main",
        vec![Pane { overlays: vec![overlay("main", true), overlay("x", false)], ..Default::default() }],
    );
    let channel = registry.channel("rm-main");

    channel.emit(HubEvent::RemoveOverlay { pane_id: 0, ov_id: 0 });

    let hub = hub.lock().unwrap();
    assert_eq!(hub.data().panes[0].overlays.len(), 2);
    assert_eq!(hub.data().panes[0].overlays[0].name, "main");
    assert!(channel.drain_emitted().is_empty());
}

#[test]
fn removal_shifts_following_overlays() {
    let registry = Registry::new();
    let hub = setup(
        &registry,
        "rm-shift",
        vec![Pane {
            overlays: vec![overlay("main", true), overlay("x", false), overlay("y", false)],
            ..Default::default()
        }],
    );
    let channel = registry.channel("rm-shift");

    channel.emit(HubEvent::RemoveOverlay { pane_id: 0, ov_id: 1 });

    {
        let hub = hub.lock().unwrap();
        let names: Vec<&str> =
            hub.data().panes[0].overlays.iter().map(|ov| ov.name.as_str()).collect();
        assert_eq!(names, vec!["main", "y"]);
    }
    let emitted = channel.drain_emitted();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].topic, "chart");
    assert_eq!(emitted[0].name, "update-layout");
}

#[test]
fn empty_pane_is_cascaded_away() {
    let registry = Registry::new();
    let hub = setup(
        &registry,
        "rm-cascade",
        vec![
            Pane { overlays: vec![overlay("main", true)], ..Default::default() },
            Pane { overlays: vec![overlay("solo", false)], ..Default::default() },
            Pane { overlays: vec![overlay("tail", false)], ..Default::default() },
        ],
    );
    let channel = registry.channel("rm-cascade");

    channel.emit(HubEvent::RemoveOverlay { pane_id: 1, ov_id: 0 });

    let mut hub = hub.lock().unwrap();
    assert_eq!(hub.data().panes.len(), 2);
    assert_eq!(hub.data().panes[1].overlays[0].name, "tail");

    // Next normalization pass renumbers the survivors densely.
    hub.calc_subset(Range::new(0.0, 1.0));
    let ids: Vec<usize> = hub.data().panes.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn stale_indices_are_tolerated() {
    let registry = Registry::new();
    let hub = setup(
        &registry,
        "rm-stale",
        vec![Pane { overlays: vec![overlay("main", true)], ..Default::default() }],
    );
    let channel = registry.channel("rm-stale");

    channel.emit(HubEvent::RemoveOverlay { pane_id: 7, ov_id: 0 });
    channel.emit(HubEvent::RemoveOverlay { pane_id: 0, ov_id: 9 });

    let hub = hub.lock().unwrap();
    assert_eq!(hub.data().panes.len(), 1);
    assert!(channel.drain_emitted().is_empty());
}
