use asistepro_api::Campus;
use asistepro_db::{DecodeError, StoreError, Table};
use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Postgres, Row};
use std::str::FromStr;
use tracing::warn;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, DecodeError>;
}

/// Retrieves a typed column from a row.
pub fn get_column<'r, T>(row: &'r PgRow, col_name: &str) -> Result<T, DecodeError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(col_name)
        .map_err(|e| DecodeError::new(col_name, e.to_string()))
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, DecodeError> {
    let s: String = get_column(row, col_name)?;
    HeaplessString::from_str(&s).map_err(|_| {
        DecodeError::new(col_name, format!("value is too long (max {N} chars)"))
    })
}

/// Retrieves an optional `HeaplessString` from a row.
pub fn get_optional_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, DecodeError> {
    let s: Option<String> = get_column(row, col_name)?;
    s.map(|val| HeaplessString::from_str(&val))
        .transpose()
        .map_err(|_| DecodeError::new(col_name, format!("value is too long (max {N} chars)")))
}

pub fn get_campus(row: &PgRow, col_name: &str) -> Result<Campus, DecodeError> {
    let s: String = get_column(row, col_name)?;
    Campus::from_str(&s).map_err(|_| DecodeError::new(col_name, format!("unknown campus '{s}'")))
}

/// Decodes every row, failing on the first one that does not match the schema.
pub fn decode_rows<T: TryFromRow<PgRow>>(table: Table, rows: &[PgRow]) -> Result<Vec<T>, StoreError> {
    rows.iter()
        .map(|row| decode_row(table, row))
        .collect()
}

pub fn decode_row<T: TryFromRow<PgRow>>(table: Table, row: &PgRow) -> Result<T, StoreError> {
    T::try_from_row(row).map_err(|source| StoreError::Decode { table, source })
}

/// Translates a driver error into the store taxonomy.
pub fn map_sqlx_error(table: Table, err: sqlx::Error) -> StoreError {
    let mapped = match &err {
        sqlx::Error::RowNotFound => StoreError::not_found(table, "query"),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("42501") => StoreError::PermissionDenied {
                table,
                message: db_err.message().to_string(),
            },
            Some("42P01") => StoreError::SchemaMissing { table },
            Some("23505") => StoreError::Conflict {
                table,
                message: db_err.message().to_string(),
            },
            _ => StoreError::Rejected {
                table,
                message: db_err.message().to_string(),
            },
        },
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
        sqlx::Error::ColumnNotFound(column) => StoreError::Decode {
            table,
            source: DecodeError::new(column.clone(), "column not found"),
        },
        sqlx::Error::ColumnDecode { index, source } => StoreError::Decode {
            table,
            source: DecodeError::new(index.clone(), source.to_string()),
        },
        _ => StoreError::Rejected {
            table,
            message: err.to_string(),
        },
    };
    if !mapped.is_not_found() {
        warn!(table = %table, error = %err, "store operation failed");
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_pool_errors_as_unavailable() {
        let mapped = map_sqlx_error(Table::Courses, sqlx::Error::PoolTimedOut);
        assert!(mapped.is_transient());

        let mapped = map_sqlx_error(Table::Courses, sqlx::Error::RowNotFound);
        assert!(mapped.is_not_found());

        let mapped = map_sqlx_error(
            Table::Attendance,
            sqlx::Error::ColumnNotFound("firma".to_string()),
        );
        assert!(matches!(mapped, StoreError::Decode { .. }));
    }
}
