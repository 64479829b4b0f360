//! Stored-procedure access.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → ProcedureCall (call.rs: name + typed named params)
//!     → invoke() (client.rs: logging, metrics)
//!     → ProcedureClient::execute
//!         → MssqlClient (mssql.rs) → bb8 pool (pool.rs) → tiberius
//!     → RecordSet (records.rs: rows, or one JSON document column)
//! ```
//!
//! # Design Decisions
//! - One client per process, passed to handlers through axum state
//! - No retries and no per-call timeout; the procedure owns all business rules
//! - Only the first result set of a procedure is read

pub mod call;
pub mod client;
pub mod error;
pub mod mssql;
pub mod pool;
pub mod records;

pub use call::{ProcedureCall, SqlParam};
pub use client::{invoke, ProcedureClient};
pub use error::{DbError, DbResult};
pub use mssql::MssqlClient;
pub use records::{Record, RecordSet};
