//! The procedure gateway: request fields in, procedure calls out, results
//! unpacked for the views.
//!
//! # Data Flow
//! ```text
//! query / form / JSON body
//!     → binder.rs (Params: typed coercion, NULL rules)
//!     → defaults.rs (policy constants, report window)
//!     → procedures.rs (one ProcedureCall per stored procedure)
//!     → db::invoke
//!     → documents.rs (typed single-column JSON results)
//! ```

pub mod binder;
pub mod defaults;
pub mod documents;
pub mod procedures;

use thiserror::Error;

use crate::db::DbError;
use crate::views::ViewError;

pub use binder::{BindError, Params};

/// Anything that can go wrong between a request and its rendered response.
///
/// Routes render every variant as a message; none of them change the status
/// code.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("{0}")]
    NotFound(String),
}

/// Result type for route bodies.
pub type GatewayResult<T> = Result<T, GatewayError>;
