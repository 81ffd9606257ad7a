use chart_data_hub::*;

fn overlay(name: &str, main: bool) -> Overlay {
    Overlay {
        name: name.into(),
        ov_type: "Candles".into(),
        main,
        data: vec![DataPoint::new(0.0, vec![1.0])],
        ..Default::default()
    }
}

fn main_flags(hub: &DataHub) -> Vec<bool> {
    hub.all_overlays(None).iter().map(|ov| ov.main).collect()
}

#[test]
fn first_overlay_promoted_when_none_flagged() {
    let registry = Registry::new();
    let hub = registry.hub("main-none");
    let mut hub = hub.lock().unwrap();
    hub.init(ChartData {
        panes: vec![
            Pane { overlays: vec![overlay("a", false), overlay("b", false)], ..Default::default() },
            Pane { overlays: vec![overlay("c", false)], ..Default::default() },
        ],
        index_based: false,
    });
    hub.calc_subset(Range::new(0.0, 1.0));
    hub.detect_main();

    assert_eq!(main_flags(&hub), vec![true, false, false]);
    assert_eq!(hub.main_ov().unwrap().name, "a");
    assert_eq!(hub.main_pane_id(), Some(0));
}

#[test]
fn first_flagged_wins_over_duplicates() {
    let registry = Registry::new();
    let hub = registry.hub("main-many");
    let mut hub = hub.lock().unwrap();
    hub.init(ChartData {
        panes: vec![
            Pane { overlays: vec![overlay("a", false)], ..Default::default() },
            Pane { overlays: vec![overlay("b", true), overlay("c", true)], ..Default::default() },
            Pane { overlays: vec![overlay("d", true)], ..Default::default() },
        ],
        index_based: false,
    });
    hub.calc_subset(Range::new(0.0, 1.0));
    hub.detect_main();

    assert_eq!(main_flags(&hub), vec![false, true, false, false]);
    assert_eq!(hub.main_ov().unwrap().name, "b");
    assert_eq!(hub.chart().unwrap().id, 1);
    assert_eq!(hub.main_pane_id(), Some(1));

    let offchart: Vec<usize> = hub.offchart().iter().map(|p| p.id).collect();
    assert_eq!(offchart, vec![0, 2]);
}

#[test]
fn single_flag_is_kept() {
    let registry = Registry::new();
    let hub = registry.hub("main-one");
    let mut hub = hub.lock().unwrap();
    hub.init(ChartData {
        panes: vec![Pane {
            overlays: vec![overlay("a", false), overlay("b", true)],
            ..Default::default()
        }],
        index_based: false,
    });
    hub.calc_subset(Range::new(0.0, 1.0));
    hub.detect_main();

    assert_eq!(main_flags(&hub), vec![false, true]);
}

#[test]
fn no_overlays_is_a_noop() {
    let registry = Registry::new();
    let hub = registry.hub("main-empty");
    let mut hub = hub.lock().unwrap();
    hub.init(ChartData {
        panes: vec![Pane::default()],
        index_based: false,
    });
    hub.detect_main();

    assert!(hub.chart().is_none());
    assert!(hub.main_ov().is_none());
    assert!(hub.main_pane_id().is_none());
}
