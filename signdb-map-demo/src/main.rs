use anyhow::Context;
use signdb_map::{
    FacadeConfig, InitOptions, LatLng, Point, SignDbMap, SignDbMapBuilder,
};
use std::sync::{Arc, Mutex};

/// Abu Dhabi city center
const CENTER: (f64, f64) = (54.3773, 24.4539);

/// Drives the facade the way the sign-database front end does: build the
/// map, listen for clicks, drop sign markers, query the lookups.
///
/// Usage: `signdb-map-demo [config.json]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    signdb_map::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config from {}", path))?;
            FacadeConfig::from_json(&json).with_context(|| format!("parsing {}", path))?
        }
        None => FacadeConfig::default(),
    };

    let mut map: SignDbMap = SignDbMapBuilder::new().with_config(config).build();

    // Calls before init are refused, nothing reaches the engine
    if let Err(e) = map.center(CENTER.0, CENTER.1) {
        log::warn!("center before init: {}", e);
    }

    map.init(
        "signdb-map",
        CENTER.0,
        CENTER.1,
        InitOptions::default().with_marker(true),
    )?;

    let clicks = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicks);
    map.on_click(move |x, y| {
        log::info!("clicked at x={} y={}", x, y);
        if let Ok(mut clicks) = sink.lock() {
            clicks.push((x, y));
        }
    })?;

    let signs = [
        Point::with_popup(54.3705, 24.4764, "Stop sign, Corniche Road"),
        Point::with_popup(54.3890, 24.4672, "No parking, Hamdan Street"),
        Point::new(54.4021, 24.4530),
    ];
    map.add_markers(&signs)?;
    for marker in map.markers() {
        log::info!(
            "{} at ({}, {}) popup {:?}",
            marker.id,
            map.round(marker.position.lng),
            map.round(marker.position.lat),
            marker.popup
        );
    }

    map.center(54.3890, 24.4672)?;

    if let Some(engine) = map.map_mut() {
        engine.fire_click(LatLng::new(24.4672, 54.3890));
        engine.process_events();
        log::info!("active base layer: {:?}", engine.base_layer());
        if let Some(switcher) = engine.layer_switcher() {
            log::info!("layer switcher offers {:?}", switcher.base_layer_labels());
        }
    }

    let district = map.district_by_xy(54.3890, 24.4672).await?;
    let street = map.get_street_by_xy(54.3890, 24.4672);
    log::info!("district lookup: {:?}", district);
    log::info!("street lookup: {:?}", street);

    let recorded = clicks
        .lock()
        .map(|clicks| clicks.len())
        .unwrap_or_default();
    log::info!("{} click(s) delivered", recorded);

    Ok(())
}
