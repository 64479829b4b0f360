//! The procedure-invocation seam.

use async_trait::async_trait;
use std::time::Instant;

use crate::db::call::ProcedureCall;
use crate::db::error::DbResult;
use crate::db::records::RecordSet;
use crate::observability::metrics;

/// Executes stored procedures.
///
/// Constructed once per process and shared by every handler. The production
/// implementation is [`MssqlClient`](crate::db::MssqlClient); tests supply a
/// scripted one.
#[async_trait]
pub trait ProcedureClient: Send + Sync {
    /// Run one procedure and return its first result set.
    async fn execute(&self, call: &ProcedureCall) -> DbResult<RecordSet>;

    /// Whether the startup connection attempt succeeded.
    fn is_connected(&self) -> bool;
}

/// Run `call` through `client`, logging and recording metrics.
pub async fn invoke(client: &dyn ProcedureClient, call: &ProcedureCall) -> DbResult<RecordSet> {
    let start = Instant::now();
    let result = client.execute(call).await;

    match &result {
        Ok(set) => {
            tracing::debug!(
                procedure = call.name(),
                params = call.params().len(),
                rows = set.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Procedure executed"
            );
            metrics::record_procedure(call.name(), "ok", start);
        }
        Err(e) => {
            tracing::error!(
                procedure = call.name(),
                error = %e,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Procedure failed"
            );
            metrics::record_procedure(call.name(), "error", start);
        }
    }

    result
}
