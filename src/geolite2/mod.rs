//! GeoLite2 domain model.
//!
//! Record types returned by lookups and the catalogue of dataset files.

mod dataset;
mod types;

pub use dataset::{Dataset, DatasetKind, Locale};
pub use types::{
    AsnBlock, CityBlock, CityLocation, CountryBlock, CountryLocation, Organization, Record,
    RegionBlocks,
};
