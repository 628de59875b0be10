//! District and street lookups by coordinate.
//!
//! No backend exists yet. Every lookup answers [`Lookup::Unsupported`],
//! which still carries the documented default object so existing callers
//! keep working, but can no longer mistake it for a resolved value.

use crate::{
    core::geo::LatLng,
    signdb::model::{District, Street},
    Result,
};
use async_trait::async_trait;

/// Outcome of a coordinate lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The coordinate resolved to a value
    Found(T),
    /// The coordinate lies outside every known feature
    NotFound,
    /// No lookup backend is available; `placeholder` is the default object
    Unsupported { placeholder: T },
}

impl<T> Lookup<T> {
    /// The resolved value, if any
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Lookup::Unsupported { .. })
    }

    pub fn placeholder(&self) -> Option<&T> {
        match self {
            Lookup::Unsupported { placeholder } => Some(placeholder),
            _ => None,
        }
    }
}

impl<T: Default> Lookup<T> {
    pub fn unsupported() -> Self {
        Lookup::Unsupported {
            placeholder: T::default(),
        }
    }
}

/// Backend resolving coordinates to districts and streets.
///
/// Real implementations will query a web service, hence async.
#[async_trait]
pub trait LookupService: Send + Sync {
    async fn district_at(&self, at: LatLng) -> Result<Lookup<District>>;

    async fn street_at(&self, at: LatLng) -> Result<Lookup<Street>>;
}

/// Service used until a backend exists: resolves nothing, immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingLookupService;

#[async_trait]
impl LookupService for PendingLookupService {
    async fn district_at(&self, at: LatLng) -> Result<Lookup<District>> {
        log::debug!("district lookup at ({}, {}) is not implemented", at.lng, at.lat);
        Ok(Lookup::unsupported())
    }

    async fn street_at(&self, at: LatLng) -> Result<Lookup<Street>> {
        log::debug!("street lookup at ({}, {}) is not implemented", at.lng, at.lat);
        Ok(Lookup::unsupported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_carries_default() {
        let lookup: Lookup<District> = Lookup::unsupported();
        assert!(!lookup.is_supported());
        assert_eq!(lookup.placeholder(), Some(&District::default()));
        assert_eq!(lookup.found(), None);
    }

    #[test]
    fn test_found_and_not_found() {
        let street = Street::new(12, "Airport Road", "طريق المطار");
        let lookup = Lookup::Found(street.clone());
        assert!(lookup.is_supported());
        assert_eq!(lookup.placeholder(), None);
        assert_eq!(lookup.found(), Some(street));

        let missing: Lookup<Street> = Lookup::NotFound;
        assert!(missing.is_supported());
        assert_eq!(missing.found(), None);
    }

    #[tokio::test]
    async fn test_pending_service_never_resolves() {
        let service = PendingLookupService;
        for at in [LatLng::new(24.45, 54.37), LatLng::new(-90.0, 720.0)] {
            let district = service.district_at(at).await.unwrap();
            assert_eq!(district, Lookup::unsupported());

            let street = service.street_at(at).await.unwrap();
            assert_eq!(street.placeholder(), Some(&Street::default()));
        }
    }
}
