use reportfence::prelude::*;
use reportfence::SharedReportStore;
use std::thread;

fn reports() -> Vec<ReportPoint<Report>> {
    vec![
        Report::new("Broken street light", 32.08, 34.78)
            .with_id("tlv")
            .into_report_point(),
        Report::new("Flooded underpass", 40.0, -75.0)
            .with_id("phl")
            .into_report_point(),
    ]
}

#[test]
fn test_engine_publishes_into_shared_store() {
    let store = SharedReportStore::with_reports(reports());
    let mut engine = SpatialFilterEngine::from_store(&store, FilterConfig::default()).unwrap();

    engine.on_polygon_created(BoundingBox2D::new(34.7, 32.0, 34.9, 32.1).to_polygon());

    let mut writer = store.clone();
    assert_eq!(engine.flush(&mut writer), 1);

    let reader = store.clone();
    let ids = thread::spawn(move || {
        reader
            .filtered_reports()
            .into_iter()
            .filter_map(|r| r.payload.id)
            .collect::<Vec<_>>()
    })
    .join()
    .unwrap();
    assert_eq!(ids, vec!["tlv".to_string()]);
}

#[test]
fn test_status_toggle_is_visible_to_clones() {
    let store = SharedReportStore::with_reports(reports());
    let other = store.clone();

    assert!(store.toggle_status("phl").unwrap());
    other.read(|inner| {
        let phl = inner
            .all_reports()
            .iter()
            .find(|r| r.payload.id.as_deref() == Some("phl"))
            .unwrap();
        assert!(phl.payload.is_handled());
    });

    assert!(matches!(
        other.set_status("missing", true),
        Err(FilterError::ObjectNotFound(_))
    ));
}

#[test]
fn test_refresh_after_concurrent_submission() {
    let store = SharedReportStore::with_reports(reports());
    let mut engine = SpatialFilterEngine::from_store(&store, FilterConfig::default()).unwrap();
    engine.on_polygon_created(BoundingBox2D::new(34.0, 31.0, 36.0, 33.0).to_polygon());

    let submitter = store.clone();
    thread::spawn(move || {
        submitter.add_report(
            Report::new("Fallen tree", 32.5, 35.0)
                .with_id("north")
                .into_report_point(),
        );
    })
    .join()
    .unwrap();

    engine.refresh(&store).unwrap();
    let mut writer = store.clone();
    engine.flush(&mut writer);

    assert_eq!(store.filtered_len(), 2);
}
