use reportfence::prelude::*;
use reportfence::{InvalidReportPolicy, ReportQuery, Viewer, overlay};

fn bbox_polygon(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Polygon {
    BoundingBox2D::new(min_lon, min_lat, max_lon, max_lat).to_polygon()
}

fn scenario_reports() -> Vec<ReportPoint<Report>> {
    vec![
        Report::new("Broken street light", 32.08, 34.78)
            .with_id("tlv")
            .into_report_point(),
        Report::new("Flooded underpass", 40.0, -75.0)
            .with_id("phl")
            .into_report_point(),
    ]
}

fn ids(reports: &[ReportPoint<Report>]) -> Vec<&str> {
    reports
        .iter()
        .filter_map(|r| r.payload.id.as_deref())
        .collect()
}

#[test]
fn test_scenario_a_single_polygon() {
    let mut engine = SpatialFilterEngine::new(scenario_reports());
    engine.on_polygon_created(bbox_polygon(32.0, 32.1, 34.7, 34.9));

    assert_eq!(ids(engine.filtered_reports()), vec!["tlv"]);
    assert_eq!(engine.filtered_reports()[0].latitude(), 32.08);
    assert_eq!(engine.filtered_reports()[0].longitude(), 34.78);
}

#[test]
fn test_scenario_b_delete_restores_all() {
    let mut engine = SpatialFilterEngine::new(scenario_reports());
    let id = engine.on_polygon_created(bbox_polygon(32.0, 32.1, 34.7, 34.9));
    engine.on_polygon_deleted(&[id]);

    assert_eq!(engine.filtered_reports(), engine.all_reports());
    assert_eq!(ids(engine.filtered_reports()), vec!["tlv", "phl"]);
}

#[test]
fn test_scenario_c_overlapping_polygons() {
    let mut engine = SpatialFilterEngine::new(scenario_reports());
    let wide = engine.on_polygon_created(bbox_polygon(30.0, 41.0, -80.0, 35.0));
    let east = engine.on_polygon_created(bbox_polygon(31.0, 33.0, 34.0, 36.0));
    assert_eq!(engine.filtered_reports(), engine.all_reports());

    engine.on_polygon_deleted(&[wide]);
    assert_eq!(ids(engine.filtered_reports()), vec!["tlv"]);
    assert!(engine.polygons().contains_id(east));
}

#[test]
fn test_union_is_order_independent() {
    let a = bbox_polygon(32.0, 32.1, 34.7, 34.9);
    let b = bbox_polygon(39.0, 41.0, -76.0, -74.0);

    let mut ab = SpatialFilterEngine::new(scenario_reports());
    ab.on_polygon_created(a.clone());
    ab.on_polygon_created(b.clone());

    let mut ba = SpatialFilterEngine::new(scenario_reports());
    ba.on_polygon_created(b);
    ba.on_polygon_created(a);

    assert_eq!(ab.filtered_reports(), ba.filtered_reports());
    assert_eq!(ids(ab.filtered_reports()), vec!["tlv", "phl"]);
}

#[test]
fn test_empty_edit_changes_nothing() {
    let mut engine = SpatialFilterEngine::new(scenario_reports());
    engine.on_polygon_created(bbox_polygon(32.0, 32.1, 34.7, 34.9));

    let filtered_before = engine.filtered_reports().to_vec();
    let polygons_before: Vec<_> = engine.polygons().iter().cloned().collect();

    engine.on_polygon_edited(Vec::new());

    assert_eq!(engine.filtered_reports(), filtered_before.as_slice());
    assert_eq!(
        engine.polygons().iter().cloned().collect::<Vec<_>>(),
        polygons_before
    );
}

#[test]
fn test_boundary_and_one_unit_outside() {
    let mut engine = SpatialFilterEngine::new(vec![
        ReportPoint::from_lat_lon(10.0, 5.0, "north-edge"),
        ReportPoint::from_lat_lon(5.0, 0.0, "west-edge"),
        ReportPoint::from_lat_lon(11.0, 5.0, "north-outside"),
        ReportPoint::from_lat_lon(5.0, -1.0, "west-outside"),
    ]);
    engine.on_polygon_created(bbox_polygon(0.0, 10.0, 0.0, 10.0));

    let names: Vec<_> = engine.filtered_reports().iter().map(|r| r.payload).collect();
    assert_eq!(names, vec!["north-edge", "west-edge"]);
}

#[test]
fn test_store_sees_results_only_after_flush() {
    let mut store = MemoryReportStore::with_reports(scenario_reports());
    let mut engine = SpatialFilterEngine::from_store(&store, FilterConfig::default()).unwrap();

    engine.on_polygon_created(bbox_polygon(32.0, 32.1, 34.7, 34.9));
    assert_eq!(store.filtered_reports().len(), 2);

    assert_eq!(engine.flush(&mut store), 1);
    assert_eq!(ids(store.filtered_reports()), vec!["tlv"]);
    assert_eq!(store.filtered_writes(), 1);
}

#[test]
fn test_json_events_from_drawing_surface() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut engine = SpatialFilterEngine::new(scenario_reports());
    let created = DrawEvent::Created {
        geometry: bbox_polygon(32.0, 32.1, 34.7, 34.9),
    };
    let wire = serde_json::to_string(&created).unwrap();

    let EventOutcome::Created(id) = engine.handle(serde_json::from_str(&wire).unwrap()) else {
        panic!("expected a created outcome");
    };

    let edit = format!(
        r#"{{"type":"edited","layers":[{{"id":{},"geometry":{}}}]}}"#,
        id.get(),
        serde_json::to_string(&bbox_polygon(39.0, 41.0, -76.0, -74.0)).unwrap()
    );
    let outcome = engine.handle(serde_json::from_str(&edit).unwrap());
    assert!(matches!(outcome, EventOutcome::Edited(ref o) if o.applied == 1));
    assert_eq!(ids(engine.filtered_reports()), vec!["phl"]);

    let delete = format!(r#"{{"type":"deleted","layers":[{}, 999]}}"#, id.get());
    let outcome = engine.handle(serde_json::from_str(&delete).unwrap());
    let EventOutcome::Deleted(outcome) = outcome else {
        panic!("expected a deleted outcome");
    };
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.ignored.as_slice(), &[PolygonId(999)]);
    assert_eq!(engine.filtered_reports().len(), 2);
}

#[test]
fn test_spatial_then_attribute_filtering() {
    let reports = vec![
        Report::new("Pothole", 32.08, 34.78)
            .with_id("1")
            .with_location("Herzl St, Tel Aviv"),
        Report::new("Broken bench", 32.07, 34.79)
            .with_id("2")
            .with_location("Allenby St, Tel Aviv")
            .with_status(true),
        Report::new("Pothole", 40.0, -75.0)
            .with_id("3")
            .with_location("Market St, Philadelphia"),
    ]
    .into_iter()
    .map(Report::into_report_point)
    .collect();

    let mut engine = SpatialFilterEngine::new(reports);
    engine.on_polygon_created(bbox_polygon(32.0, 32.1, 34.7, 34.9));

    let in_zone = engine.filtered_reports();
    assert_eq!(ids(in_zone), vec!["1", "2"]);

    let potholes = ReportQuery::new().keyword("Pothole").apply(in_zone);
    assert_eq!(ids(&potholes), vec!["1"]);

    let member_view: Vec<_> = Viewer::Member
        .visible(in_zone)
        .filter_map(|r| r.payload.id.as_deref())
        .collect();
    assert_eq!(member_view, vec!["1"]);
}

#[test]
fn test_overlays_follow_filtered_set() {
    let mut engine = SpatialFilterEngine::new(scenario_reports());
    engine.on_polygon_created(bbox_polygon(32.0, 32.1, 34.7, 34.9));

    let center = overlay::map_center(engine.filtered_reports()).unwrap();
    assert_eq!((center.y(), center.x()), (32.08, 34.78));

    let heat = overlay::heat_points(engine.filtered_reports(), engine.config().heat_intensity);
    assert_eq!(heat.len(), 1);
    assert_eq!(heat[0].intensity, 0.2);
}

#[cfg(feature = "geojson")]
#[test]
fn test_geojson_polygon_drives_filter() {
    let drawn = r#"{
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[34.7, 32.0], [34.9, 32.0], [34.9, 32.1], [34.7, 32.1], [34.7, 32.0]]]
        }
    }"#;
    let polygon = reportfence::geojson::polygon_from_geojson(drawn).unwrap();

    let mut engine = SpatialFilterEngine::new(scenario_reports());
    engine.on_polygon_created(polygon);

    let collection =
        reportfence::geojson::reports_to_feature_collection(engine.filtered_reports()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&collection).unwrap();
    assert_eq!(parsed["features"].as_array().map(Vec::len), Some(1));
    assert_eq!(parsed["features"][0]["properties"]["_id"], "tlv");
}

fn handled(reports: &[ReportPoint<Report>], id: &str) -> Option<bool> {
    reports
        .iter()
        .find(|r| r.payload.id.as_deref() == Some(id))
        .map(|r| r.payload.is_handled())
}

#[test]
fn test_status_change_survives_next_flush() {
    let mut store = MemoryReportStore::with_reports(scenario_reports());
    let mut engine = SpatialFilterEngine::from_store(&store, FilterConfig::default()).unwrap();

    store.set_status("tlv", true).unwrap();
    engine.set_status("tlv", true).unwrap();

    engine.on_polygon_created(bbox_polygon(32.0, 32.1, 34.7, 34.9));
    engine.flush(&mut store);

    assert_eq!(ids(store.filtered_reports()), vec!["tlv"]);
    assert_eq!(handled(store.filtered_reports(), "tlv"), Some(true));
    assert_eq!(handled(store.all_reports(), "tlv"), Some(true));
}

#[test]
fn test_status_change_alone_is_published() {
    let mut store = MemoryReportStore::with_reports(scenario_reports());
    let mut engine = SpatialFilterEngine::from_store(&store, FilterConfig::default()).unwrap();

    engine.set_status("phl", true).unwrap();
    assert_eq!(engine.flush(&mut store), 1);
    assert_eq!(handled(store.filtered_reports(), "phl"), Some(true));
    assert_eq!(handled(store.filtered_reports(), "tlv"), Some(false));
}

#[test]
fn test_status_of_unknown_report() {
    let mut engine = SpatialFilterEngine::new(scenario_reports());
    let mut sink: Vec<ReportPoint<Report>> = Vec::new();

    assert!(matches!(
        engine.set_status("missing", true),
        Err(FilterError::ObjectNotFound(_))
    ));
    assert_eq!(engine.flush(&mut sink), 0);
}

#[test]
fn test_submitted_report_survives_next_flush() {
    let mut store = MemoryReportStore::with_reports(scenario_reports());
    let mut engine = SpatialFilterEngine::from_store(&store, FilterConfig::default()).unwrap();
    engine.on_polygon_created(bbox_polygon(32.0, 32.1, 34.7, 34.9));
    engine.flush(&mut store);

    let fresh = Report::new("Fallen tree", 32.05, 34.80)
        .with_id("fresh")
        .into_report_point();
    store.add_report(fresh.clone());
    engine.add_report(fresh).unwrap();

    let outside = Report::new("Graffiti", 31.77, 35.21)
        .with_id("jlm")
        .into_report_point();
    store.add_report(outside.clone());
    engine.add_report(outside).unwrap();

    engine.flush(&mut store);
    assert_eq!(ids(store.filtered_reports()), vec!["tlv", "fresh"]);
    assert_eq!(store.all_reports().len(), 4);
    assert_eq!(engine.all_reports().len(), 4);
}

#[test]
fn test_submitted_report_with_bad_position() {
    let config = FilterConfig::default().with_invalid_reports(InvalidReportPolicy::Reject);
    let mut strict = SpatialFilterEngine::with_config(scenario_reports(), config).unwrap();
    let bad = Report::new("Lost pin", 95.0, 34.8).into_report_point();

    assert!(matches!(
        strict.add_report(bad.clone()),
        Err(FilterError::InvalidInput(_))
    ));
    assert_eq!(strict.all_reports().len(), 2);

    let mut lenient = SpatialFilterEngine::new(scenario_reports());
    lenient.add_report(bad).unwrap();
    lenient.on_polygon_created(bbox_polygon(-90.0, 90.0, -180.0, 180.0));
    assert_eq!(lenient.all_reports().len(), 3);
    assert_eq!(ids(lenient.filtered_reports()), vec!["tlv", "phl"]);
}
