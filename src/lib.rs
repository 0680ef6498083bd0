//! A minimal, hand-rolled HTTP/1.1 server exposing CRUD operations over
//! shipments, backed by PostgreSQL.
//!
//! The wire protocol layer is written directly over [`std::net`]: no
//! keep-alive, no TLS, one response per connection. The relational store
//! and the static asset source are reached through narrow interfaces so
//! handlers stay testable without a database.

pub mod config;
pub mod consts;
pub mod http;
pub mod server;
pub mod store;
pub mod url;

mod error;

pub use error::Error;
