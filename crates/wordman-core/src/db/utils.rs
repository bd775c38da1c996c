//! Row conversion helpers shared by the query modules.

use jiff::civil::Date;
use rusqlite::{types::Type, Row};

/// Reads an ISO calendar date column.
pub(crate) fn date_column(row: &Row, index: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(index)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Reads a nullable ISO calendar date column.
pub(crate) fn optional_date_column(row: &Row, index: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(index)?
        .map(|s| {
            s.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Word ids are stored as comma-separated text.
pub(crate) fn encode_word_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Reads a comma-separated word id column.
pub(crate) fn word_ids_column(row: &Row, index: usize) -> rusqlite::Result<Vec<u64>> {
    let raw: String = row.get(index)?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|part| {
            part.trim().parse::<u64>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_word_ids() {
        assert_eq!(encode_word_ids(&[3, 1, 20]), "3,1,20");
        assert_eq!(encode_word_ids(&[]), "");
    }
}
