//! GeoLite2 record types.
//!
//! These mirror the CSV datasets. Blocks own their joined location as a plain
//! optional value that lookups populate at query time.

use serde::{Deserialize, Serialize};

use crate::range::AddressRange;

/// An autonomous system: number plus registered organization name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "autonomous_system_number")]
    pub number: u32,
    #[serde(rename = "autonomous_system_organization")]
    pub name: String,
}

/// A network announced by an autonomous system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsnBlock {
    pub network: String,
    pub range: AddressRange,
    /// Serialized inline, next to `network`.
    #[serde(flatten)]
    pub organization: Organization,
}

/// A network mapped to a city-level location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityBlock {
    pub network: String,
    pub range: AddressRange,
    pub geoname_id: Option<i64>,
    pub registered_country_geoname_id: Option<i64>,
    pub represented_country_geoname_id: Option<i64>,
    pub is_anonymous_proxy: bool,
    pub is_satellite_provider: bool,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy_radius: Option<i64>,
    /// Location row for the requested locale, if one exists.
    pub location: Option<CityLocation>,
}

/// One locale's names for a city-level geoname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityLocation {
    pub geoname_id: i64,
    pub locale_code: String,
    pub continent_code: Option<String>,
    pub continent_name: Option<String>,
    pub country_iso_code: Option<String>,
    pub country_name: Option<String>,
    pub subdivision_1_iso_code: Option<String>,
    pub subdivision_1_name: Option<String>,
    pub subdivision_2_iso_code: Option<String>,
    pub subdivision_2_name: Option<String>,
    pub city_name: Option<String>,
    pub metro_code: Option<String>,
    pub time_zone: Option<String>,
    pub is_in_european_union: bool,
}

/// A network mapped to a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryBlock {
    pub network: String,
    pub range: AddressRange,
    pub geoname_id: Option<i64>,
    pub registered_country_geoname_id: Option<i64>,
    pub represented_country_geoname_id: Option<i64>,
    pub is_anonymous_proxy: bool,
    pub is_satellite_provider: bool,
    /// Location row for the requested locale, if one exists.
    pub location: Option<CountryLocation>,
}

/// One locale's names for a country-level geoname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryLocation {
    pub geoname_id: i64,
    pub locale_code: String,
    pub continent_code: Option<String>,
    pub continent_name: Option<String>,
    pub country_iso_code: Option<String>,
    pub country_name: Option<String>,
    pub is_in_european_union: bool,
}

/// Result of an address lookup against one dataset kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Asn(AsnBlock),
    City(CityBlock),
    Country(CountryBlock),
}

impl Record {
    /// Network string of the matched block.
    pub fn network(&self) -> &str {
        match self {
            Record::Asn(b) => &b.network,
            Record::City(b) => &b.network,
            Record::Country(b) => &b.network,
        }
    }
}

/// Result of a region lookup: city blocks when a subdivision was given,
/// country blocks otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "blocks", rename_all = "lowercase")]
pub enum RegionBlocks {
    City(Vec<CityBlock>),
    Country(Vec<CountryBlock>),
}

impl RegionBlocks {
    pub fn len(&self) -> usize {
        match self {
            RegionBlocks::City(b) => b.len(),
            RegionBlocks::Country(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
