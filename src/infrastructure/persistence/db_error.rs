//! Translation of SQLx errors into repository errors.

use crate::domain::errors::RepositoryError;

/// Maps a SQLx error onto the repository error taxonomy.
///
/// - unique violations become [`RepositoryError::Conflict`] carrying the constraint name
/// - foreign key violations and missing rows become [`RepositoryError::NotFound`]
/// - everything else is reported as [`RepositoryError::Unavailable`]
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            return RepositoryError::Conflict(constraint);
        }

        if db_err.is_foreign_key_violation() {
            return RepositoryError::NotFound;
        }
    }

    match e {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        other => {
            tracing::error!(error = %other, "Database error");
            RepositoryError::Unavailable(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found() {
        assert_eq!(map_sqlx_error(sqlx::Error::RowNotFound), RepositoryError::NotFound);
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            RepositoryError::Unavailable(_)
        ));
    }
}
