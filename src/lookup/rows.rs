//! Row → record mapping for lookup queries.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::geolite2::{
    AsnBlock, CityBlock, CityLocation, CountryBlock, CountryLocation, Organization,
};
use crate::range::AddressRange;

fn get_u32(row: &SqliteRow, column: &str) -> Result<u32, sqlx::Error> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn get_range(row: &SqliteRow) -> Result<AddressRange, sqlx::Error> {
    Ok(AddressRange {
        start: get_u32(row, "start_ip")?,
        end: get_u32(row, "end_ip")?,
    })
}

/// NULL and `0` both read as false.
fn get_flag(row: &SqliteRow, column: &str) -> Result<bool, sqlx::Error> {
    Ok(row.try_get::<Option<i64>, _>(column)? == Some(1))
}

pub(crate) fn organization_from_row(row: &SqliteRow) -> Result<Organization, sqlx::Error> {
    let number = get_u32(row, "autonomous_system_number")?;
    let name: Option<String> = row.try_get("autonomous_system_organization")?;
    Ok(Organization {
        number,
        name: name.unwrap_or_default(),
    })
}

pub(crate) fn asn_block_from_row(row: &SqliteRow) -> Result<AsnBlock, sqlx::Error> {
    Ok(AsnBlock {
        network: row.try_get("network")?,
        range: get_range(row)?,
        organization: organization_from_row(row)?,
    })
}

pub(crate) fn city_block_from_row(row: &SqliteRow) -> Result<CityBlock, sqlx::Error> {
    let location_id: Option<i64> = row.try_get("location_geoname_id")?;
    let location = match location_id {
        Some(geoname_id) => Some(CityLocation {
            geoname_id,
            locale_code: row.try_get("locale_code")?,
            continent_code: row.try_get("continent_code")?,
            continent_name: row.try_get("continent_name")?,
            country_iso_code: row.try_get("country_iso_code")?,
            country_name: row.try_get("country_name")?,
            subdivision_1_iso_code: row.try_get("subdivision_1_iso_code")?,
            subdivision_1_name: row.try_get("subdivision_1_name")?,
            subdivision_2_iso_code: row.try_get("subdivision_2_iso_code")?,
            subdivision_2_name: row.try_get("subdivision_2_name")?,
            city_name: row.try_get("city_name")?,
            metro_code: row.try_get("metro_code")?,
            time_zone: row.try_get("time_zone")?,
            is_in_european_union: get_flag(row, "is_in_european_union")?,
        }),
        None => None,
    };

    Ok(CityBlock {
        network: row.try_get("network")?,
        range: get_range(row)?,
        geoname_id: row.try_get("geoname_id")?,
        registered_country_geoname_id: row.try_get("registered_country_geoname_id")?,
        represented_country_geoname_id: row.try_get("represented_country_geoname_id")?,
        is_anonymous_proxy: get_flag(row, "is_anonymous_proxy")?,
        is_satellite_provider: get_flag(row, "is_satellite_provider")?,
        postal_code: row.try_get("postal_code")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        accuracy_radius: row.try_get("accuracy_radius")?,
        location,
    })
}

pub(crate) fn country_block_from_row(row: &SqliteRow) -> Result<CountryBlock, sqlx::Error> {
    let location_id: Option<i64> = row.try_get("location_geoname_id")?;
    let location = match location_id {
        Some(geoname_id) => Some(CountryLocation {
            geoname_id,
            locale_code: row.try_get("locale_code")?,
            continent_code: row.try_get("continent_code")?,
            continent_name: row.try_get("continent_name")?,
            country_iso_code: row.try_get("country_iso_code")?,
            country_name: row.try_get("country_name")?,
            is_in_european_union: get_flag(row, "is_in_european_union")?,
        }),
        None => None,
    };

    Ok(CountryBlock {
        network: row.try_get("network")?,
        range: get_range(row)?,
        geoname_id: row.try_get("geoname_id")?,
        registered_country_geoname_id: row.try_get("registered_country_geoname_id")?,
        represented_country_geoname_id: row.try_get("represented_country_geoname_id")?,
        is_anonymous_proxy: get_flag(row, "is_anonymous_proxy")?,
        is_satellite_provider: get_flag(row, "is_satellite_provider")?,
        location,
    })
}
