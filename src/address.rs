//! Reverse-geocoded address cache.
//!
//! Addresses are looked up once per coordinate pair through a [`Geocoder`]
//! and memoised. The cache serializes to JSON so the host can persist it
//! between sessions.

use crate::error::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Reverse geocoding backend.
pub trait Geocoder {
    /// Full address for a coordinate pair.
    fn reverse(&mut self, latitude: f64, longitude: f64) -> Result<String>;
}

impl<F> Geocoder for F
where
    F: FnMut(f64, f64) -> Result<String>,
{
    fn reverse(&mut self, latitude: f64, longitude: f64) -> Result<String> {
        self(latitude, longitude)
    }
}

/// Cache key for a coordinate pair: `"{lat},{lon}"`.
pub fn coord_key(latitude: f64, longitude: f64) -> String {
    format!("{},{}", latitude, longitude)
}

/// Shorten a geocoder address to `"<first part>, <second part>"`, with digits
/// (house numbers, postal codes) stripped from the second part.
///
/// Addresses without a comma are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use reportfence::address::format_address;
///
/// assert_eq!(format_address("Herzl St 12, Tel Aviv 6100000, Israel"), "Herzl St 12, Tel Aviv");
/// assert_eq!(format_address("Tel Aviv"), "Tel Aviv");
/// ```
pub fn format_address(raw: &str) -> String {
    let Some((first, rest)) = raw.split_once(',') else {
        return raw.to_string();
    };
    let second = rest.split(',').next().unwrap_or_default();
    let cleaned: String = second.chars().filter(|c| !c.is_ascii_digit()).collect();
    format!("{}, {}", first, cleaned.trim())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressCache {
    entries: FxHashMap<String, String>,
}

impl AddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, latitude: f64, longitude: f64) -> Option<&str> {
        self.entries
            .get(&coord_key(latitude, longitude))
            .map(String::as_str)
    }

    pub fn insert(&mut self, latitude: f64, longitude: f64, address: impl Into<String>) {
        self.entries
            .insert(coord_key(latitude, longitude), address.into());
    }

    /// Cached address for the pair, looking it up through `geocoder` on a
    /// miss. Lookup failures are logged and not cached.
    pub fn resolve<G: Geocoder + ?Sized>(
        &mut self,
        latitude: f64,
        longitude: f64,
        geocoder: &mut G,
    ) -> Option<String> {
        let key = coord_key(latitude, longitude);
        if let Some(hit) = self.entries.get(&key) {
            return Some(hit.clone());
        }

        match geocoder.reverse(latitude, longitude) {
            Ok(full) => {
                let formatted = format_address(&full);
                self.entries.insert(key, formatted.clone());
                Some(formatted)
            }
            Err(e) => {
                log::warn!("address lookup failed for {}: {}", key, e);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
