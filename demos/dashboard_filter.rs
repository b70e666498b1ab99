//! Dashboard Filter Example
//!
//! Simulates a map dashboard: reports are loaded from a store, the user
//! draws, reshapes and removes polygons, and the filtered list is refreshed
//! once per turn of the event loop.

use reportfence::address::{AddressCache, format_address};
use reportfence::overlay::{heat_points, map_center};
use reportfence::prelude::*;
use reportfence::{ReportQuery, Viewer};
use std::collections::VecDeque;
use std::error::Error;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Report Dashboard Filter ===\n");

    let mut store = MemoryReportStore::with_reports(vec![
        Report::new("Broken street light", 32.0853, 34.7818)
            .with_id("r1")
            .with_location("Rothschild Blvd 12, Tel Aviv")
            .into_report_point(),
        Report::new("Pothole", 32.0684, 34.7948)
            .with_id("r2")
            .with_location("Herzl St 4, Tel Aviv")
            .with_status(true)
            .into_report_point(),
        Report::new("Flooded underpass", 31.7683, 35.2137)
            .with_id("r3")
            .with_location("Jaffa Rd 20, Jerusalem")
            .into_report_point(),
        Report::new("Fallen tree", 40.0, -75.0)
            .with_id("r4")
            .with_location("Market St 1200, Philadelphia")
            .into_report_point(),
    ]);

    let mut engine = EngineBuilder::new().from_store(&store)?.build()?;

    if let Some(center) = map_center(store.all_reports()) {
        println!("Map centered at ({:.4}, {:.4})\n", center.y(), center.x());
    }

    // Events as the drawing surface would emit them, one per loop turn
    let mut events = VecDeque::from(vec![
        DrawEvent::Created {
            geometry: BoundingBox2D::new(34.70, 32.00, 34.90, 32.10).to_polygon(),
        },
        DrawEvent::Created {
            geometry: BoundingBox2D::new(35.10, 31.70, 35.30, 31.85).to_polygon(),
        },
    ]);

    let mut turn = 0;
    let mut drawn = Vec::new();
    while let Some(event) = events.pop_front() {
        turn += 1;
        if let EventOutcome::Created(id) = engine.handle(event) {
            drawn.push(id);
        }
        engine.flush(&mut store);
        print_turn(turn, &store);

        // Once both zones exist, shrink the first and then remove the second
        if turn == 2 {
            events.push_back(DrawEvent::Edited {
                layers: vec![PolygonEdit::new(
                    drawn[0],
                    BoundingBox2D::new(34.78, 32.08, 34.79, 32.09).to_polygon(),
                )],
            });
            events.push_back(DrawEvent::Deleted {
                layers: vec![drawn[1]],
            });
        }
    }

    println!("\nMember view of the current selection:");
    for report in Viewer::from_role("member").visible(store.filtered_reports()) {
        println!("  - {} at {}", report.payload.value, report.payload.location);
    }

    let query = ReportQuery::new().keyword("tree");
    println!("\nKeyword 'tree' across all reports: {}", query.apply(store.all_reports()).len());

    let mut addresses = AddressCache::new();
    // Stand-in for a reverse-geocoding service
    let mut geocoder = |lat: f64, _lon: f64| -> reportfence::Result<String> {
        let city = if lat > 32.0 { "Tel Aviv 6688101" } else { "Jerusalem 9414001" };
        Ok(format!("Rothschild Blvd 12, {}, Israel", city))
    };
    for report in store.filtered_reports() {
        if let Some(short) = addresses.resolve(report.latitude(), report.longitude(), &mut geocoder) {
            println!("  address: {}", short);
        }
    }
    println!("  cached lookups: {}", addresses.len());
    println!("  formatted: {}", format_address("Jaffa Rd 20, Jerusalem 9414001, Israel"));

    let heat = heat_points(store.filtered_reports(), engine.config().heat_intensity);
    println!("\nHeat layer points: {}", heat.len());

    engine.reset();
    engine.flush(&mut store);
    println!("After reset: {} report(s) shown", store.filtered_reports().len());

    Ok(())
}

fn print_turn(turn: usize, store: &MemoryReportStore<Report>) {
    let shown: Vec<_> = store
        .filtered_reports()
        .iter()
        .map(|r| r.payload.marker_key())
        .collect();
    println!("Turn {}: {} report(s) shown {:?}", turn, shown.len(), shown);
}
