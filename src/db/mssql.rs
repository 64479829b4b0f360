//! SQL Server implementation of [`ProcedureClient`].

use std::time::Duration;

use async_trait::async_trait;
use bb8::{ErrorSink, ManageConnection, Pool};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use tiberius::{ColumnData, FromSql, Row, ToSql};

use crate::config::DatabaseConfig;
use crate::db::call::ProcedureCall;
use crate::db::client::ProcedureClient;
use crate::db::error::{DbError, DbResult};
use crate::db::pool::TdsConnectionManager;
use crate::db::records::{Record, RecordSet};

/// Procedure client backed by a bb8 pool of tiberius sessions.
///
/// The pool is attempted once at startup. If that attempt fails the client
/// stays disconnected for the life of the process and every call returns
/// [`DbError::NotConnected`].
pub struct MssqlClient {
    pool: Option<Pool<TdsConnectionManager>>,
}

impl MssqlClient {
    /// Open one session to prove the server is reachable, then build the
    /// pool. The real driver error is logged when that session fails.
    pub async fn connect(db: &DatabaseConfig) -> Self {
        let manager = TdsConnectionManager::new(db);
        let timeout = Duration::from_secs(db.connect_timeout_secs);

        if let Err(e) = open_session(&manager, timeout).await {
            tracing::error!(
                host = %db.host,
                port = db.port,
                error = %e,
                "Database connection failed"
            );
            return Self::disconnected();
        }

        let pool = Pool::builder()
            .max_size(db.pool_max_size)
            .connection_timeout(timeout)
            .error_sink(Box::new(TracingErrorSink))
            .build_unchecked(manager);

        tracing::info!(
            host = %db.host,
            port = db.port,
            database = %db.name,
            pool_max_size = db.pool_max_size,
            "SQL Server connected"
        );
        Self { pool: Some(pool) }
    }

    /// A client with no pool.
    pub fn disconnected() -> Self {
        Self { pool: None }
    }
}

/// Open a single session outside the pool.
async fn open_session(manager: &TdsConnectionManager, timeout: Duration) -> DbResult<()> {
    match tokio::time::timeout(timeout, manager.connect()).await {
        Ok(Ok(_session)) => Ok(()),
        Ok(Err(e)) => Err(DbError::Pool(e.to_string())),
        Err(_) => Err(DbError::Pool(format!(
            "no response from SQL Server within {}s",
            timeout.as_secs_f32()
        ))),
    }
}

/// Forwards errors from bb8's background connection attempts to tracing.
#[derive(Debug, Clone, Copy)]
struct TracingErrorSink;

impl ErrorSink<tiberius::error::Error> for TracingErrorSink {
    fn sink(&self, error: tiberius::error::Error) {
        tracing::error!(error = %error, "Pooled SQL Server connection failed");
    }

    fn boxed_clone(&self) -> Box<dyn ErrorSink<tiberius::error::Error>> {
        Box::new(*self)
    }
}

#[async_trait]
impl ProcedureClient for MssqlClient {
    async fn execute(&self, call: &ProcedureCall) -> DbResult<RecordSet> {
        let pool = self.pool.as_ref().ok_or(DbError::NotConnected)?;
        let sql = call.to_exec_sql()?;
        let params: Vec<&dyn ToSql> = call
            .params()
            .iter()
            .map(|(_, value)| value as &dyn ToSql)
            .collect();

        let mut conn = pool.get().await.map_err(|e| DbError::Pool(e.to_string()))?;
        let rows = conn.query(sql, &params).await?.into_first_result().await?;

        Ok(RecordSet::new(rows.into_iter().map(row_to_record).collect()))
    }

    fn is_connected(&self) -> bool {
        self.pool.is_some()
    }
}

fn row_to_record(row: Row) -> Record {
    let names: Vec<String> = row
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    names
        .into_iter()
        .zip(row)
        .map(|(name, data)| (name, cell_to_json(data)))
        .collect()
}

/// Convert one cell to JSON. Unsupported types (binary, xml, udt) become null.
fn cell_to_json(data: ColumnData<'static>) -> Value {
    let value = match &data {
        ColumnData::U8(v) => v.map(Value::from),
        ColumnData::I16(v) => v.map(Value::from),
        ColumnData::I32(v) => v.map(Value::from),
        ColumnData::I64(v) => v.map(Value::from),
        ColumnData::F32(v) => v.and_then(|f| Number::from_f64(f64::from(f))).map(Value::Number),
        ColumnData::F64(v) => v.and_then(Number::from_f64).map(Value::Number),
        ColumnData::Bit(v) => v.map(Value::Bool),
        ColumnData::String(v) => v.as_ref().map(|s| Value::String(s.to_string())),
        ColumnData::Guid(v) => v.map(|g| Value::String(g.to_string())),
        ColumnData::Numeric(_) => Decimal::from_sql(&data).ok().flatten().map(decimal_to_json),
        ColumnData::Date(_) => NaiveDate::from_sql(&data)
            .ok()
            .flatten()
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string())),
        ColumnData::Time(_) => NaiveTime::from_sql(&data)
            .ok()
            .flatten()
            .map(|t| Value::String(t.format("%H:%M:%S").to_string())),
        ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
            NaiveDateTime::from_sql(&data)
                .ok()
                .flatten()
                .map(|dt| Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()))
        }
        ColumnData::DateTimeOffset(_) => DateTime::<FixedOffset>::from_sql(&data)
            .ok()
            .flatten()
            .map(|dt| Value::String(dt.to_rfc3339())),
        _ => None,
    };
    value.unwrap_or(Value::Null)
}

/// Whole numbers stay integers so prices like `199000.00` render as `199000`.
fn decimal_to_json(d: Decimal) -> Value {
    let d = d.normalize();
    if d.scale() == 0 {
        if let Some(i) = d.to_i64() {
            return Value::from(i);
        }
    }
    d.to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(d.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::str::FromStr;

    #[test]
    fn test_scalar_cells() {
        assert_eq!(cell_to_json(ColumnData::I32(Some(5))), Value::from(5));
        assert_eq!(cell_to_json(ColumnData::I32(None)), Value::Null);
        assert_eq!(cell_to_json(ColumnData::Bit(Some(true))), Value::Bool(true));
        assert_eq!(
            cell_to_json(ColumnData::String(Some(Cow::Borrowed("Áo thun")))),
            Value::String("Áo thun".into())
        );
    }

    #[test]
    fn test_decimal_to_json() {
        assert_eq!(decimal_to_json(Decimal::from_str("199000.00").unwrap()), Value::from(199000));
        assert_eq!(decimal_to_json(Decimal::from_str("12.50").unwrap()), Value::from(12.5));
    }

    fn unreachable_database(port: u16, connect_timeout_secs: u64) -> DatabaseConfig {
        DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port,
            connect_timeout_secs,
            ..DatabaseConfig::default()
        }
    }

    async fn closed_port() -> u16 {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn test_refused_connection_reports_io_error() {
        let db = unreachable_database(closed_port().await, 5);
        let manager = TdsConnectionManager::new(&db);

        let err = open_session(&manager, Duration::from_secs(5)).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Connection error: "), "{message}");
        assert!(!message.contains("Timed out"), "{message}");
        assert!(!message.contains("no response"), "{message}");
    }

    #[tokio::test]
    async fn test_refused_connection_fails_fast() {
        let db = unreachable_database(closed_port().await, 5);

        let started = std::time::Instant::now();
        let client = MssqlClient::connect(&db).await;
        assert!(!client.is_connected());
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accepts TCP but never answers the prelogin packet.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let db = unreachable_database(listener.local_addr().unwrap().port(), 1);
        let manager = TdsConnectionManager::new(&db);

        let err = open_session(&manager, Duration::from_millis(200)).await.unwrap_err();
        assert!(err.to_string().contains("no response from SQL Server"));
        drop(listener);
    }

    #[tokio::test]
    async fn test_disconnected_client_refuses_calls() {
        let client = MssqlClient::disconnected();
        assert!(!client.is_connected());

        let err = client
            .execute(&ProcedureCall::new("browse_products"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotConnected));
    }
}
