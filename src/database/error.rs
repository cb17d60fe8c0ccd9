use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
    /// An error caused by an invalid Postgres connection url.
    #[error("invalid connection url")]
    InvalidUrl,
    /// An error caused by an [`sqlx`] error.
    #[error("received a pool error: {0}")]
    Internal(sqlx::Error),
    /// Pending migrations could not be applied.
    #[error("could not run database migrations")]
    Migration,
    /// A row with the same unique key already exists. This happens
    /// when two registrations race each other past their checks.
    #[error("unique constraint violated")]
    UniqueViolation,
    /// The database pool does not have a reliable connection to
    /// transact to the database.
    #[error("unhealthy database pool")]
    UnhealthyPool,
}

/// Converts from a generic [sqlx] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
    fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn into_db_error(self) -> Result<T> {
        self.map_err(|e| match &e {
            sqlx::Error::Database(err) if err.is_unique_violation() => {
                let constraint = err.constraint().map(ToString::to_string);
                let report = Report::new(e).change_context(Error::UniqueViolation);
                match constraint {
                    Some(name) => report.attach_printable(format!("constraint: {name}")),
                    None => report,
                }
            }
            sqlx::Error::PoolTimedOut => Report::new(e).change_context(Error::UnhealthyPool),
            _ => Report::new(Error::Internal(e)),
        })
    }
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// Quick checks on a database [`Report`] without matching its
/// context by hand.
pub trait ReportExt {
    fn is_unhealthy(&self) -> bool;
    fn is_unique_violation(&self) -> bool;
}

impl ReportExt for Report<Error> {
    fn is_unhealthy(&self) -> bool {
        matches!(self.current_context(), Error::UnhealthyPool)
    }

    fn is_unique_violation(&self) -> bool {
        matches!(self.current_context(), Error::UniqueViolation)
    }
}
