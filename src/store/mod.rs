//! Narrow interface to the relational store.
//!
//! Handlers see one capability: run a parameterized statement, get rows
//! back. Rows are text-typed (every cell an optional string), mirroring
//! libpq's text results; affected-row semantics come from the statements
//! all ending in `RETURNING id`.

use thiserror::Error;

mod postgres;

pub use postgres::PgStore;

#[cfg(test)]
pub(crate) mod mock;

/// One result row, text-typed. `None` is SQL NULL.
pub type Row = Vec<Option<String>>;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(e: r2d2::Error) -> Self {
        StoreError::new(format!("connection checkout failed: {e}"))
    }
}

impl From<::postgres::Error> for StoreError {
    fn from(e: ::postgres::Error) -> Self {
        StoreError::new(e.to_string())
    }
}

pub trait Store: Send + Sync {
    /// Runs one parameterized statement and returns the rows it
    /// produced. `None` parameters are sent as SQL NULL.
    fn query(&self, sql: &str, params: &[Option<&str>]) -> Result<Vec<Row>, StoreError>;
}
