//! Classification of SQLx errors into store errors.

use crate::domain::repositories::StoreError;

/// Name of the unique constraint on `urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "urls_short_code_key";

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}

/// Returns true when the error means the database could not be reached.
pub fn is_connectivity_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

/// Maps a SQLx error to a [`StoreError`].
///
/// `short_code` is reported in [`StoreError::DuplicateCode`] when the error is a
/// unique violation on the short code constraint.
pub fn map_sqlx_error(e: sqlx::Error, short_code: Option<&str>) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::DuplicateCode(short_code.unwrap_or_default().to_string());
    }

    if is_connectivity_error(&e) {
        return StoreError::Unavailable(e.to_string());
    }

    StoreError::Query(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_connectivity_error() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut, None);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_io_error_is_connectivity_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = map_sqlx_error(sqlx::Error::Io(io), None);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_query_error() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound, Some("abc123"));
        assert!(matches!(err, StoreError::Query(_)));
    }
}
