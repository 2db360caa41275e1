//! SQL used by the lookup service.
//!
//! City and Country queries join the location relation on both `geoname_id`
//! and `locale_code`, so every block carries at most one location row.

const ASN_COLUMNS: &str = "SELECT network, start_ip, end_ip, \
     autonomous_system_number, autonomous_system_organization \
     FROM geolite2_asn_blocks_ipv4";

pub(crate) const ORGANIZATIONS: &str = "SELECT autonomous_system_number, \
     MIN(autonomous_system_organization) AS autonomous_system_organization \
     FROM geolite2_asn_blocks_ipv4 \
     WHERE autonomous_system_number IS NOT NULL \
     GROUP BY autonomous_system_number \
     ORDER BY autonomous_system_number";

/// Binds: locale.
pub(crate) const CITY_JOINED: &str = "SELECT b.network, b.start_ip, b.end_ip, \
     b.geoname_id, b.registered_country_geoname_id, b.represented_country_geoname_id, \
     b.is_anonymous_proxy, b.is_satellite_provider, b.postal_code, \
     b.latitude, b.longitude, b.accuracy_radius, \
     l.geoname_id AS location_geoname_id, l.locale_code, l.continent_code, l.continent_name, \
     l.country_iso_code, l.country_name, l.subdivision_1_iso_code, l.subdivision_1_name, \
     l.subdivision_2_iso_code, l.subdivision_2_name, l.city_name, l.metro_code, \
     l.time_zone, l.is_in_european_union \
     FROM geolite2_city_blocks_ipv4 b \
     LEFT JOIN geolite2_city_locations l \
     ON l.geoname_id = b.geoname_id AND l.locale_code = ?";

/// Binds: locale.
pub(crate) const COUNTRY_JOINED: &str = "SELECT b.network, b.start_ip, b.end_ip, \
     b.geoname_id, b.registered_country_geoname_id, b.represented_country_geoname_id, \
     b.is_anonymous_proxy, b.is_satellite_provider, \
     l.geoname_id AS location_geoname_id, l.locale_code, l.continent_code, l.continent_name, \
     l.country_iso_code, l.country_name, l.is_in_european_union \
     FROM geolite2_country_blocks_ipv4 b \
     LEFT JOIN geolite2_country_locations l \
     ON l.geoname_id = b.geoname_id AND l.locale_code = ?";

pub(crate) fn by_address(joined: &str) -> String {
    format!("{} WHERE ? BETWEEN b.start_ip AND b.end_ip LIMIT 1", joined)
}

pub(crate) fn asn_where(condition: &str) -> String {
    format!("{} WHERE {}", ASN_COLUMNS, condition)
}

pub(crate) fn joined_where(joined: &str, condition: &str) -> String {
    format!("{} WHERE {}", joined, condition)
}
