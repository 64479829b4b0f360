//! Database error definitions.

use thiserror::Error;

/// Errors that can occur while invoking a stored procedure.
///
/// The taxonomy is deliberately flat: routes only ever show the message.
#[derive(Debug, Error)]
pub enum DbError {
    /// The startup connection attempt failed; no pool exists.
    #[error("Database not connected")]
    NotConnected,

    /// A pooled connection could not be checked out.
    #[error("Connection error: {0}")]
    Pool(String),

    /// The procedure raised, or the batch failed on the server.
    #[error("{0}")]
    Procedure(String),

    /// A procedure or parameter name is not a plain identifier.
    #[error("Invalid SQL identifier: {0}")]
    InvalidIdentifier(String),

    /// The single JSON column could not be parsed.
    #[error("Malformed JSON result: {0}")]
    MalformedDocument(String),

    /// A document was expected but the procedure returned no rows.
    #[error("Procedure returned no result")]
    EmptyResult,
}

impl From<tiberius::error::Error> for DbError {
    fn from(e: tiberius::error::Error) -> Self {
        match e {
            // Server-side errors carry the RAISERROR/THROW text verbatim.
            tiberius::error::Error::Server(token) => DbError::Procedure(token.message().to_string()),
            other => DbError::Procedure(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DbError::NotConnected.to_string(), "Database not connected");
        assert_eq!(
            DbError::Procedure("Insufficient stock".into()).to_string(),
            "Insufficient stock"
        );
        assert!(DbError::MalformedDocument("EOF".into())
            .to_string()
            .starts_with("Malformed JSON result"));
    }
}
