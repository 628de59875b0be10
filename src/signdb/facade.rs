//! [`SignDbMap`], the map facade of the sign-database application.
//!
//! One facade owns at most one map. Until [`SignDbMap::init`] runs, every
//! operation that needs the map logs "Map is not initialized" at debug level
//! and returns [`MapError::NotInitialized`] without touching anything.
//!
//! ```
//! use signdb_map::{InitOptions, Point, SignDbMap};
//!
//! let mut map = SignDbMap::new();
//! map.init("map", 54.3773, 24.4539, InitOptions::default()).unwrap();
//! map.add_markers(&[Point::with_popup(54.38, 24.45, "Stop sign")]).unwrap();
//! assert_eq!(map.markers().len(), 1);
//! ```

use crate::{
    core::{
        config::{FacadeConfig, InitOptions, ReinitPolicy},
        constants::NOT_INITIALIZED_MSG,
        crs::Crs,
        geo::LatLng,
    },
    layers::marker::Marker,
    signdb::{
        backend::{CoreMapFactory, MapBackend, MapFactory},
        layers::BaseLayers,
        lookup::{Lookup, LookupService, PendingLookupService},
        model::{District, Point, Street},
    },
    MapError, Result,
};

/// Scaled magnitude from which a double has no fractional digits left to
/// round away (2^50, with margin below the 2^52 integer limit).
const ROUNDING_LIMIT: f64 = 1_125_899_906_842_624.0;

/// Rounds `value` to `precision` decimal digits, halves away from zero.
///
/// The value is scaled by ten `precision` times, rounded, and scaled back,
/// so results follow IEEE-754 doubles: `round(1.005, 2)` is `1.0` because
/// `1.005 * 100.0` is just below `100.5`.
///
/// When the scaled value reaches 2^50 in magnitude, or is not finite (the
/// multiplier overflows past `precision` 308), `value` is returned
/// unchanged. That keeps `round(round(v, p), p) == round(v, p)` for every
/// finite `v` and every `p`, and never turns a number into NaN.
pub fn round(value: f64, precision: u32) -> f64 {
    // 10^309 is already infinite
    let multiplier = (0..precision.min(310)).fold(1.0_f64, |m, _| m * 10.0);
    let scaled = value * multiplier;
    if !scaled.is_finite() || scaled.abs() >= ROUNDING_LIMIT {
        return value;
    }
    scaled.round() / multiplier
}

/// A marker the facade placed on the map
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    /// Layer id of the marker in the map
    pub id: String,
    pub position: LatLng,
    pub popup: Option<String>,
}

/// Facade over one map instance
pub struct SignDbMap<F: MapFactory = CoreMapFactory> {
    factory: F,
    config: FacadeConfig,
    layers: BaseLayers,
    crs: Crs,
    lookup: Box<dyn LookupService>,
    map: Option<F::Map>,
    container_id: Option<String>,
    markers: Vec<MarkerHandle>,
    next_marker: u64,
}

impl SignDbMap<CoreMapFactory> {
    /// A facade over the bundled engine with the default configuration
    pub fn new() -> Self {
        SignDbMapBuilder::new().build()
    }
}

impl Default for SignDbMap<CoreMapFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: MapFactory> SignDbMap<F> {
    /// Builds the map in `container_id`, centered on `(x, y)`.
    ///
    /// Installs the configured default base layer (satellite imagery unless
    /// configured otherwise) and the layer switcher, drops a marker at the
    /// center when `options.draw` is set, then sets the view.
    ///
    /// The new map is only installed once every step succeeded. On error the
    /// facade keeps whatever state it had before the call.
    ///
    /// A second call is governed by [`ReinitPolicy`]: `Reject` fails with
    /// [`MapError::AlreadyInitialized`] and keeps the current map, `Rebuild`
    /// replaces it with the new one.
    pub fn init(&mut self, container_id: &str, x: f64, y: f64, options: InitOptions) -> Result<()> {
        if let Some(current) = &self.container_id {
            match self.config.reinit {
                ReinitPolicy::Reject => {
                    log::warn!("init called again; map already lives in '{}'", current);
                    return Err(MapError::AlreadyInitialized {
                        container_id: current.clone(),
                    });
                }
                ReinitPolicy::Rebuild => {
                    log::info!("rebuilding map, previously in '{}'", current);
                }
            }
        }

        let mut map = self.factory.create(container_id, self.config.map_options())?;
        map.add_layer(Box::new(
            self.layers.get(self.config.default_base_layer).clone(),
        ))?;
        map.add_layer_switcher(self.layers.layer_switcher(&self.config.switcher))?;

        let mut markers = Vec::new();
        if options.draw {
            place_markers(&mut map, &mut self.next_marker, &[Point::new(x, y)], &mut markers)?;
        }

        map.set_view(LatLng::from_xy(x, y), options.zoom)?;

        self.map = Some(map);
        self.container_id = Some(container_id.to_string());
        self.markers = markers;

        log::info!(
            "map initialized in '{}' at ({}, {}) zoom {}",
            container_id,
            x,
            y,
            options.zoom
        );
        Ok(())
    }

    /// [`SignDbMap::init`] with the configured default zoom and no marker
    pub fn init_at(&mut self, container_id: &str, x: f64, y: f64) -> Result<()> {
        let options = self.config.init_options();
        self.init(container_id, x, y, options)
    }

    /// Rounds with the configured default precision (6 digits by default)
    pub fn round(&self, value: f64) -> f64 {
        round(value, self.config.default_precision)
    }

    /// Pans the view to `(x, y)`, keeping the zoom
    pub fn center(&mut self, x: f64, y: f64) -> Result<()> {
        self.initialized_map()?.pan_to(LatLng::from_xy(x, y))
    }

    /// District at `(x, y)`.
    ///
    /// No district dataset is wired in yet: the answer is always
    /// [`Lookup::Unsupported`] carrying [`District::default`].
    pub fn get_district_by_xy(&self, x: f64, y: f64) -> Lookup<District> {
        log::debug!("district lookup at ({}, {}) is not implemented", x, y);
        Lookup::unsupported()
    }

    /// Street at `(x, y)`; always [`Lookup::Unsupported`] for now.
    pub fn get_street_by_xy(&self, x: f64, y: f64) -> Lookup<Street> {
        log::debug!("street lookup at ({}, {}) is not implemented", x, y);
        Lookup::unsupported()
    }

    /// District at `(x, y)` from the configured [`LookupService`]
    pub async fn district_by_xy(&self, x: f64, y: f64) -> Result<Lookup<District>> {
        self.lookup.district_at(LatLng::from_xy(x, y)).await
    }

    /// Street at `(x, y)` from the configured [`LookupService`]
    pub async fn street_by_xy(&self, x: f64, y: f64) -> Result<Lookup<Street>> {
        self.lookup.street_at(LatLng::from_xy(x, y)).await
    }

    /// Calls `callback(longitude, latitude)` on every map click.
    ///
    /// Each call registers one more listener; all of them fire.
    pub fn on_click<C>(&mut self, callback: C) -> Result<()>
    where
        C: Fn(f64, f64) + Send + Sync + 'static,
    {
        self.initialized_map()?
            .on_click(Box::new(move |at: LatLng| callback(at.lng, at.lat)));
        Ok(())
    }

    /// Replaces every marker the facade placed with one marker per point.
    pub fn add_markers(&mut self, points: &[Point]) -> Result<()> {
        let Self {
            map,
            markers,
            next_marker,
            ..
        } = self;
        let map = match map.as_mut() {
            Some(map) => map,
            None => {
                log::debug!("{}", NOT_INITIALIZED_MSG);
                return Err(MapError::NotInitialized);
            }
        };

        for handle in markers.iter() {
            map.remove_layer(&handle.id)?;
        }
        markers.clear();

        place_markers(map, next_marker, points, markers)?;

        log::debug!("{} marker(s) on map", markers.len());
        Ok(())
    }

    /// Markers currently placed, in the order they were added
    pub fn markers(&self) -> &[MarkerHandle] {
        &self.markers
    }

    pub fn is_initialized(&self) -> bool {
        self.map.is_some()
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    /// The underlying map, once initialized
    pub fn map(&self) -> Option<&F::Map> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut F::Map> {
        self.map.as_mut()
    }

    pub fn base_layers(&self) -> &BaseLayers {
        &self.layers
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    fn initialized_map(&mut self) -> Result<&mut F::Map> {
        match self.map.as_mut() {
            Some(map) => Ok(map),
            None => {
                log::debug!("{}", NOT_INITIALIZED_MSG);
                Err(MapError::NotInitialized)
            }
        }
    }

}

/// Adds one marker layer per point, recording each placed marker in `placed`.
fn place_markers<M: MapBackend>(
    map: &mut M,
    next_marker: &mut u64,
    points: &[Point],
    placed: &mut Vec<MarkerHandle>,
) -> Result<()> {
    for point in points {
        *next_marker += 1;
        let id = format!("marker-{}", next_marker);
        let position = point.lat_lng();

        let mut marker = Marker::new(id.clone(), position);
        if let Some(message) = point.popup_message() {
            marker = marker.with_popup(message.to_string());
        }
        map.add_layer(Box::new(marker))?;

        placed.push(MarkerHandle {
            id,
            position,
            popup: point.popup_message().map(str::to_string),
        });
    }
    Ok(())
}

/// Builder for [`SignDbMap`]
pub struct SignDbMapBuilder<F: MapFactory = CoreMapFactory> {
    factory: F,
    config: FacadeConfig,
    lookup: Box<dyn LookupService>,
}

impl SignDbMapBuilder<CoreMapFactory> {
    pub fn new() -> Self {
        Self {
            factory: CoreMapFactory,
            config: FacadeConfig::default(),
            lookup: Box::new(PendingLookupService),
        }
    }
}

impl Default for SignDbMapBuilder<CoreMapFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: MapFactory> SignDbMapBuilder<F> {
    pub fn with_config(mut self, config: FacadeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_reinit_policy(mut self, policy: ReinitPolicy) -> Self {
        self.config.reinit = policy;
        self
    }

    pub fn with_lookup_service(mut self, service: impl LookupService + 'static) -> Self {
        self.lookup = Box::new(service);
        self
    }

    /// Swaps the map factory, e.g. for a host renderer
    pub fn with_factory<G: MapFactory>(self, factory: G) -> SignDbMapBuilder<G> {
        SignDbMapBuilder {
            factory,
            config: self.config,
            lookup: self.lookup,
        }
    }

    pub fn build(self) -> SignDbMap<F> {
        let crs = self.config.map_options().crs;
        SignDbMap {
            factory: self.factory,
            config: self.config,
            layers: BaseLayers::predefined(),
            crs,
            lookup: self.lookup,
            map: None,
            container_id: None,
            markers: Vec::new(),
            next_marker: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{crs::AD_SDI_RESOLUTIONS, geo::LatLng},
        layers::base::LayerTrait,
        signdb::layers::BaseLayerId,
        ui::controls::ControlPosition,
    };
    use std::sync::{Arc, Mutex};

    fn initialized(draw: bool) -> SignDbMap {
        let mut facade = SignDbMap::new();
        facade
            .init(
                "map",
                54.3773,
                24.4539,
                InitOptions::default().with_marker(draw),
            )
            .unwrap();
        facade
    }

    #[test]
    fn test_round_examples() {
        assert_eq!(round(1.2345678, 2), 1.23);
        assert_eq!(round(1.005, 2), 1.0);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -3.0);
        assert_eq!(round(54.37731234567, 6), 54.377312);
        assert_eq!(round(7.0, 0), 7.0);
    }

    #[test]
    fn test_round_is_idempotent() {
        let values = [
            0.0, 1.005, -1.005, 1.2345678, 24.453912345, -54.37735, 123456.789, 0.1 + 0.2,
        ];
        for value in values {
            for precision in 0..=8 {
                let once = round(value, precision);
                assert_eq!(round(once, precision), once, "{} @ {}", value, precision);
            }
        }
    }

    /// xorshift64, enough to spread samples over a range deterministically
    fn samples(seed: u64, count: usize, span: f64) -> Vec<f64> {
        let mut state = seed;
        (0..count)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                ((state >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0) * span
            })
            .collect()
    }

    #[test]
    fn test_round_is_idempotent_across_precisions() {
        for (seed, span) in [(0x9E37_79B9_7F4A_7C15, 1000.0), (0xD1B5_4A32_D192_ED03, 1.0e9)] {
            let values = samples(seed, 5_000, span);
            for precision in (0..=20).chain([50, 308, 309, 400]) {
                for &value in &values {
                    let once = round(value, precision);
                    assert!(once.is_finite(), "{} @ {}", value, precision);
                    assert_eq!(round(once, precision), once, "{} @ {}", value, precision);
                }
            }
        }
    }

    #[test]
    fn test_round_stays_within_half_a_digit() {
        for precision in 0..=10 {
            let half_digit = 0.5 / 10f64.powi(precision as i32);
            for value in samples(0x2545_F491_4F6C_DD1D, 2_000, 1000.0) {
                let rounded = round(value, precision);
                assert!(
                    (rounded - value).abs() <= half_digit + 1e-12,
                    "{} @ {} -> {}",
                    value,
                    precision,
                    rounded
                );
            }
        }
    }

    #[test]
    fn test_round_beyond_double_resolution() {
        let once = round(-276.16162874, 13);
        assert_eq!(round(once, 13), once);

        assert_eq!(round(1.0, 400), 1.0);
        assert_eq!(round(0.0, 400), 0.0);
        assert_eq!(round(1.5, u32::MAX), 1.5);
        assert_eq!(round(123.456, 20), 123.456);
    }

    #[test]
    fn test_facade_round_uses_default_precision() {
        let facade = SignDbMap::new();
        assert_eq!(facade.round(24.45391234567), 24.453912);
    }

    #[test]
    fn test_init_installs_layers_and_view() {
        let facade = initialized(false);
        let map = facade.map().unwrap();

        assert_eq!(map.container_id(), "map");
        assert!(map.options().dragging);
        assert!(map.options().zoom_control);
        assert!(!map.options().attribution_control);
        assert_eq!(map.options().crs.resolutions, AD_SDI_RESOLUTIONS.to_vec());

        assert_eq!(map.list_layers(), vec!["Satellite50cm".to_string()]);
        assert_eq!(map.base_layer(), Some("Satellite50cm"));

        let switcher = map.layer_switcher().unwrap();
        assert_eq!(
            switcher.base_layer_labels(),
            vec!["English base map", "Arabic base map", "Satellite image"]
        );
        assert!(switcher.is_collapsed());
        assert_eq!(switcher.position(), ControlPosition::TopRight);

        assert_eq!(map.viewport.center, LatLng::new(24.4539, 54.3773));
        assert_eq!(map.viewport.zoom, 5.0);
        assert!(facade.markers().is_empty());
    }

    #[test]
    fn test_init_with_marker() {
        let facade = initialized(true);
        assert_eq!(facade.markers().len(), 1);
        assert_eq!(facade.markers()[0].position, LatLng::new(24.4539, 54.3773));
        assert_eq!(facade.map().unwrap().markers().len(), 1);
    }

    #[test]
    fn test_init_at_uses_configured_zoom() {
        let config = FacadeConfig {
            default_zoom: 9.0,
            default_base_layer: BaseLayerId::MapEnglish,
            ..FacadeConfig::default()
        };
        let mut facade = SignDbMapBuilder::new().with_config(config).build();
        facade.init_at("map", 54.0, 24.0).unwrap();

        let map = facade.map().unwrap();
        assert_eq!(map.viewport.zoom, 9.0);
        assert_eq!(map.base_layer(), Some("MapEnglish"));
    }

    #[test]
    fn test_second_init_is_rejected() {
        let mut facade = initialized(true);
        let err = facade
            .init("other", 0.0, 0.0, InitOptions::default())
            .unwrap_err();

        assert!(matches!(
            err,
            MapError::AlreadyInitialized { ref container_id } if container_id == "map"
        ));
        assert_eq!(facade.container_id(), Some("map"));
        assert_eq!(facade.markers().len(), 1);
    }

    #[test]
    fn test_second_init_rebuilds() {
        let mut facade = SignDbMapBuilder::new()
            .with_reinit_policy(ReinitPolicy::Rebuild)
            .build();
        facade
            .init("map", 54.0, 24.0, InitOptions::default().with_marker(true))
            .unwrap();
        facade
            .init("other", 55.0, 25.0, InitOptions::default())
            .unwrap();

        assert_eq!(facade.container_id(), Some("other"));
        assert!(facade.markers().is_empty());
        assert!(facade.map().unwrap().markers().is_empty());
    }

    #[test]
    fn test_add_markers_replaces() {
        let mut facade = initialized(true);
        facade
            .add_markers(&[Point::new(54.1, 24.1), Point::new(54.2, 24.2)])
            .unwrap();
        assert_eq!(facade.markers().len(), 2);

        facade
            .add_markers(&[Point::with_popup(54.3, 24.3, "Yield")])
            .unwrap();
        assert_eq!(facade.markers().len(), 1);
        assert_eq!(facade.markers()[0].position, LatLng::new(24.3, 54.3));
        assert_eq!(facade.markers()[0].popup.as_deref(), Some("Yield"));

        let on_map = facade.map().unwrap().markers();
        assert_eq!(on_map.len(), 1);
        assert_eq!(on_map[0].popup(), Some("Yield"));
        assert_eq!(on_map[0].id(), facade.markers()[0].id);
    }

    #[test]
    fn test_add_empty_markers_clears() {
        let mut facade = initialized(true);
        facade.add_markers(&[]).unwrap();
        assert!(facade.markers().is_empty());
        assert!(facade.map().unwrap().markers().is_empty());
        assert!(facade.map().unwrap().has_layer("Satellite50cm"));
    }

    #[test]
    fn test_uninitialized_operations() {
        let mut facade = SignDbMap::new();
        assert!(matches!(facade.center(1.0, 2.0), Err(MapError::NotInitialized)));
        assert!(matches!(
            facade.on_click(|_, _| {}),
            Err(MapError::NotInitialized)
        ));
        assert!(matches!(
            facade.add_markers(&[Point::new(1.0, 2.0)]),
            Err(MapError::NotInitialized)
        ));
        assert!(!facade.is_initialized());
        assert!(facade.markers().is_empty());
    }

    #[test]
    fn test_center_pans() {
        let mut facade = initialized(false);
        facade.center(55.0, 25.0).unwrap();
        let map = facade.map().unwrap();
        assert_eq!(map.viewport.center, LatLng::new(25.0, 55.0));
        assert_eq!(map.viewport.zoom, 5.0);
    }

    #[test]
    fn test_on_click_passes_lng_then_lat() {
        let mut facade = initialized(false);
        let clicks = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let sink = Arc::clone(&clicks);
            facade
                .on_click(move |x, y| sink.lock().unwrap().push((x, y)))
                .unwrap();
        }

        let map = facade.map_mut().unwrap();
        map.fire_click(LatLng::new(24.5, 54.4));
        map.process_events();

        assert_eq!(*clicks.lock().unwrap(), vec![(54.4, 24.5), (54.4, 24.5)]);
    }

    #[test]
    fn test_lookups_return_placeholders() {
        let facade = SignDbMap::new();
        for (x, y) in [(54.37, 24.45), (0.0, 0.0), (f64::NAN, 1e9)] {
            let district = facade.get_district_by_xy(x, y);
            assert_eq!(district.placeholder(), Some(&District::default()));
            let street = facade.get_street_by_xy(x, y);
            assert_eq!(street.placeholder(), Some(&Street::default()));
        }
    }

    #[tokio::test]
    async fn test_async_lookups_use_service() {
        struct KnownDistrict;

        #[async_trait::async_trait]
        impl LookupService for KnownDistrict {
            async fn district_at(&self, _at: LatLng) -> Result<Lookup<District>> {
                Ok(Lookup::Found(District::new(4, "KHL", "Al Khalidiyah", "الخالدية")))
            }

            async fn street_at(&self, _at: LatLng) -> Result<Lookup<Street>> {
                Ok(Lookup::NotFound)
            }
        }

        let facade = SignDbMapBuilder::new()
            .with_lookup_service(KnownDistrict)
            .build();
        let district = facade.district_by_xy(54.35, 24.47).await.unwrap();
        assert_eq!(district.found().map(|d| d.id), Some(4));
        assert_eq!(facade.street_by_xy(54.35, 24.47).await.unwrap(), Lookup::NotFound);

        let pending = SignDbMap::new();
        assert!(!pending.district_by_xy(1.0, 2.0).await.unwrap().is_supported());
    }

    #[test]
    fn test_base_layers_exposed() {
        let facade = SignDbMap::new();
        assert_eq!(
            facade.base_layers().keys(),
            vec!["MapEnglish", "MapArabic", "Satellite50cm"]
        );
        assert_eq!(facade.crs(), &Crs::ad_sdi());
    }
}
