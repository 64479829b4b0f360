//! Connection pooling for SQL Server.
//!
//! # Responsibilities
//! - Translate [`DatabaseConfig`] into a tiberius client configuration
//! - Open TDS sessions over Tokio TCP streams for bb8
//! - Validate pooled sessions with a trivial query before reuse

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::config::DatabaseConfig;

/// A live TDS session.
pub type MssqlConnection = Client<Compat<TcpStream>>;

/// bb8 manager that opens tiberius sessions.
#[derive(Clone)]
pub struct TdsConnectionManager {
    config: Config,
}

impl TdsConnectionManager {
    pub fn new(db: &DatabaseConfig) -> Self {
        Self {
            config: client_config(db),
        }
    }
}

/// Build the tiberius configuration from our settings.
pub fn client_config(db: &DatabaseConfig) -> Config {
    let mut config = Config::new();
    config.host(&db.host);
    config.port(db.port);
    config.database(&db.name);
    config.application_name("storefront");
    config.authentication(AuthMethod::sql_server(&db.user, &db.password));
    config.encryption(if db.encrypt {
        EncryptionLevel::Required
    } else {
        EncryptionLevel::Off
    });
    if db.trust_server_certificate {
        config.trust_cert();
    }
    config
}

#[async_trait]
impl bb8::ManageConnection for TdsConnectionManager {
    type Connection = MssqlConnection;
    type Error = tiberius::error::Error;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        let tcp = TcpStream::connect(self.config.get_addr()).await?;
        tcp.set_nodelay(true)?;
        Client::connect(self.config.clone(), tcp.compat_write()).await
    }

    async fn is_valid(&self, conn: &mut Self::Connection) -> Result<(), Self::Error> {
        conn.simple_query("SELECT 1").await?.into_row().await?;
        Ok(())
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        false
    }
}
