//! CSV record → SQL value conversion.

use csv::StringRecord;

use crate::error_handling::GeoError;
use crate::geolite2::Dataset;
use crate::range::encode_cidr;
use crate::storage::schema::{Column, ColumnKind};

/// A value ready to bind to an insert placeholder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlValue {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
}

/// Converts one CSV record into the stored values of `dataset`'s relation.
///
/// Trailing columns missing from the record become NULL and extra trailing
/// fields are ignored. The network column of a block relation and any column
/// marked required are mandatory.
pub(crate) fn convert_record(
    dataset: &Dataset,
    record: &StringRecord,
    line: u64,
) -> Result<Vec<SqlValue>, GeoError> {
    let relation = dataset.relation();
    let mut values = Vec::with_capacity(relation.columns.len() + 2);

    for (index, column) in relation.columns.iter().enumerate() {
        let field = record.get(index).map(str::trim).unwrap_or("");
        let malformed = |reason: String| GeoError::MalformedRow {
            dataset: dataset.name(),
            line,
            column: column.name,
            reason,
        };

        match column.kind {
            ColumnKind::Network => {
                if field.is_empty() {
                    return Err(malformed("network is required".to_string()));
                }
                let range = encode_cidr(field).map_err(|e| malformed(e.to_string()))?;
                values.push(SqlValue::Text(field.to_string()));
                values.push(SqlValue::Integer(i64::from(range.start)));
                values.push(SqlValue::Integer(i64::from(range.end)));
            }
            ColumnKind::Locale => {
                let tag = dataset
                    .locale()
                    .map(|l| l.as_str().to_string())
                    .unwrap_or_else(|| field.to_string());
                values.push(SqlValue::Text(tag));
            }
            _ if field.is_empty() && column.required => {
                return Err(malformed(format!("{} is required", column.name)));
            }
            _ if field.is_empty() => values.push(SqlValue::Null),
            ColumnKind::Text => values.push(SqlValue::Text(field.to_string())),
            ColumnKind::Integer => values.push(SqlValue::Integer(
                field.parse::<i64>().map_err(|e| malformed(e.to_string()))?,
            )),
            ColumnKind::Real => values.push(SqlValue::Real(
                field.parse::<f64>().map_err(|e| malformed(e.to_string()))?,
            )),
            ColumnKind::Flag => values.push(SqlValue::Integer(
                parse_flag(column, field).map_err(malformed)?,
            )),
        }
    }

    Ok(values)
}

fn parse_flag(column: &Column, field: &str) -> Result<i64, String> {
    match field {
        "0" => Ok(0),
        "1" => Ok(1),
        other => Err(format!("{} expects 0 or 1, got {:?}", column.name, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolite2::Locale;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_asn_row_gets_range() {
        let values = convert_record(
            &Dataset::AsnBlocks,
            &record(&["10.0.0.0/24", "64500", "Example Networks"]),
            2,
        )
        .unwrap();
        assert_eq!(
            values,
            vec![
                SqlValue::Text("10.0.0.0/24".to_string()),
                SqlValue::Integer(167772160),
                SqlValue::Integer(167772415),
                SqlValue::Integer(64500),
                SqlValue::Text("Example Networks".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_trailing_columns_become_null() {
        let values =
            convert_record(&Dataset::CityBlocks, &record(&["10.0.0.0/24", "1816670"]), 2).unwrap();
        assert_eq!(values.len(), CITY_BLOCK_STORED_COLUMNS);
        assert_eq!(values[3], SqlValue::Integer(1816670));
        assert!(values[4..].iter().all(|v| *v == SqlValue::Null));
    }

    const CITY_BLOCK_STORED_COLUMNS: usize = 12;

    #[test]
    fn test_extra_trailing_columns_ignored() {
        let values = convert_record(
            &Dataset::AsnBlocks,
            &record(&["10.0.0.0/24", "64500", "Example", "surplus"]),
            2,
        )
        .unwrap();
        assert_eq!(values.len(), 5);
    }

    #[test]
    fn test_locations_tagged_with_file_locale() {
        let values = convert_record(
            &Dataset::CountryLocations(Locale::PtBr),
            &record(&["3017382", "xx", "EU", "Europa", "FR", "França", "1"]),
            2,
        )
        .unwrap();
        assert_eq!(values[1], SqlValue::Text("pt-BR".to_string()));
        assert_eq!(values[6], SqlValue::Integer(1));
    }

    #[test]
    fn test_bad_network_names_column_and_line() {
        let err = convert_record(
            &Dataset::AsnBlocks,
            &record(&["10.0.0.0/40", "64500", "Example"]),
            7,
        )
        .unwrap_err();
        match err {
            GeoError::MalformedRow {
                dataset,
                line,
                column,
                ..
            } => {
                assert_eq!(dataset, "GeoLite2-ASN-Blocks-IPv4");
                assert_eq!(line, 7);
                assert_eq!(column, "network");
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_network_rejected() {
        assert!(matches!(
            convert_record(&Dataset::CountryBlocks, &record(&[""]), 2),
            Err(GeoError::MalformedRow { column: "network", .. })
        ));
    }

    #[test]
    fn test_bad_integer_and_flag_rejected() {
        assert!(matches!(
            convert_record(
                &Dataset::AsnBlocks,
                &record(&["10.0.0.0/24", "AS64500", "Example"]),
                2
            ),
            Err(GeoError::MalformedRow {
                column: "autonomous_system_number",
                ..
            })
        ));
        assert!(matches!(
            convert_record(
                &Dataset::CountryBlocks,
                &record(&["10.0.0.0/24", "1", "1", "", "yes", "0"]),
                2
            ),
            Err(GeoError::MalformedRow {
                column: "is_anonymous_proxy",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_asn_number_rejected() {
        for fields in [&["10.0.0.0/24", "", "Example"][..], &["10.0.0.0/24"][..]] {
            match convert_record(&Dataset::AsnBlocks, &record(fields), 4) {
                Err(GeoError::MalformedRow {
                    line, column, reason, ..
                }) => {
                    assert_eq!(line, 4);
                    assert_eq!(column, "autonomous_system_number");
                    assert!(reason.contains("required"));
                }
                other => panic!("expected MalformedRow, got {:?}", other),
            }
        }
    }
}
