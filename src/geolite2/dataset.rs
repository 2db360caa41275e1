//! Dataset catalogue.
//!
//! Names every GeoLite2 CSV file the loader understands, the edition it ships
//! in and the relation it lands in.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::{
    ASN_BLOCKS_IPV4_FILE_PREFIX, ASN_EDITION_ID, CITY_BLOCKS_IPV4_FILE_PREFIX, CITY_EDITION_ID,
    CITY_LOCATIONS_FILE_PREFIX, COUNTRY_BLOCKS_IPV4_FILE_PREFIX, COUNTRY_EDITION_ID,
    COUNTRY_LOCATIONS_FILE_PREFIX,
};
use crate::storage::schema::{
    Relation, ASN_BLOCKS, CITY_BLOCKS, CITY_LOCATIONS, COUNTRY_BLOCKS, COUNTRY_LOCATIONS,
};

/// The three GeoLite2 editions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    Display,
    EnumString,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DatasetKind {
    Asn,
    City,
    Country,
}

impl DatasetKind {
    /// MaxMind edition id of the CSV archive.
    pub fn edition_id(&self) -> &'static str {
        match self {
            DatasetKind::Asn => ASN_EDITION_ID,
            DatasetKind::City => CITY_EDITION_ID,
            DatasetKind::Country => COUNTRY_EDITION_ID,
        }
    }

    /// Every dataset file in this edition, in load order.
    pub fn datasets(&self) -> Vec<Dataset> {
        match self {
            DatasetKind::Asn => vec![Dataset::AsnBlocks],
            DatasetKind::City => std::iter::once(Dataset::CityBlocks)
                .chain(Locale::iter().map(Dataset::CityLocations))
                .collect(),
            DatasetKind::Country => std::iter::once(Dataset::CountryBlocks)
                .chain(Locale::iter().map(Dataset::CountryLocations))
                .collect(),
        }
    }
}

/// Locales shipped with every GeoLite2 locations dataset.
///
/// Iteration order is the load order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    Display,
    EnumString,
    IntoStaticStr,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    #[serde(rename = "de")]
    De,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "pt-BR")]
    #[strum(serialize = "pt-BR")]
    #[value(name = "pt-BR")]
    PtBr,
    #[serde(rename = "ru")]
    Ru,
    #[serde(rename = "zh-CN")]
    #[strum(serialize = "zh-CN")]
    #[value(name = "zh-CN")]
    ZhCn,
}

impl Locale {
    /// Language code as it appears in file names and `locale_code` columns.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// One CSV file of an edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    AsnBlocks,
    CityBlocks,
    CityLocations(Locale),
    CountryBlocks,
    CountryLocations(Locale),
}

impl Dataset {
    /// File name inside an extracted edition directory.
    pub fn file_name(&self) -> String {
        match self {
            Dataset::AsnBlocks => format!("{}.csv", ASN_BLOCKS_IPV4_FILE_PREFIX),
            Dataset::CityBlocks => format!("{}.csv", CITY_BLOCKS_IPV4_FILE_PREFIX),
            Dataset::CityLocations(l) => format!("{}-{}.csv", CITY_LOCATIONS_FILE_PREFIX, l),
            Dataset::CountryBlocks => format!("{}.csv", COUNTRY_BLOCKS_IPV4_FILE_PREFIX),
            Dataset::CountryLocations(l) => {
                format!("{}-{}.csv", COUNTRY_LOCATIONS_FILE_PREFIX, l)
            }
        }
    }

    /// Path of this dataset's file under `dir`.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }

    /// Human-readable name used in logs and errors (the file stem).
    pub fn name(&self) -> String {
        let file = self.file_name();
        file.trim_end_matches(".csv").to_string()
    }

    /// Relation the rows land in.
    pub fn relation(&self) -> &'static Relation {
        match self {
            Dataset::AsnBlocks => &ASN_BLOCKS,
            Dataset::CityBlocks => &CITY_BLOCKS,
            Dataset::CityLocations(_) => &CITY_LOCATIONS,
            Dataset::CountryBlocks => &COUNTRY_BLOCKS,
            Dataset::CountryLocations(_) => &COUNTRY_LOCATIONS,
        }
    }

    /// Locale tag for locations datasets.
    pub fn locale(&self) -> Option<Locale> {
        match self {
            Dataset::CityLocations(l) | Dataset::CountryLocations(l) => Some(*l),
            _ => None,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
