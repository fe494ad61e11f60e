use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::BytesMut;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

use lunar_api::{EventRow, EventStore, IngestError, SqlValue, schema};

use crate::config::DatabaseConfig;

/// PostgreSQL-backed record store.
///
/// One transaction per insert: the row is committed only after the execute
/// is confirmed, otherwise the dropped transaction rolls back. The pooled
/// connection is scoped to the single call.
pub struct PostgresStore {
    pool: Pool,
    insert_timeout: Duration,
}

impl PostgresStore {
    /// Build the connection pool. Does not connect; the first insert does.
    pub fn new(config: &DatabaseConfig) -> Result<Self, IngestError> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .dbname(&config.dbname)
            .user(&config.user)
            .password(&config.password);

        let mgr = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(mgr)
            .max_size(config.pool_size)
            .build()
            .map_err(|e| IngestError::config(format!("postgres pool: {e}")))?;

        Ok(Self {
            pool,
            insert_timeout: Duration::from_secs(config.insert_timeout_secs),
        })
    }

    async fn insert_tx(&self, row: &EventRow) -> Result<(), IngestError> {
        // Defensive re-resolution; the transformer already validated the type.
        let schema = schema::lookup(row.message_type()).ok_or_else(|| {
            IngestError::storage(format!("no insert statement for '{}'", row.message_type()))
        })?;
        let expected = 4 + schema.fields.len();
        if row.arity() != expected {
            return Err(IngestError::storage(format!(
                "arity mismatch for '{}': {} values, statement binds {expected}",
                row.message_type(),
                row.arity(),
            )));
        }

        let mut client = self
            .pool
            .get()
            .await
            .map_err(|e| IngestError::storage(format!("pool get: {e}")))?;
        let tx = client
            .transaction()
            .await
            .map_err(|e| IngestError::storage(format!("begin: {e}")))?;

        let params: Vec<PgValue<'_>> = row.values().iter().map(PgValue).collect();
        let param_refs: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

        tx.execute(schema.insert_sql, &param_refs)
            .await
            .map_err(|e| IngestError::storage(format!("insert into {}: {e}", schema.table)))?;

        // Commit strictly after the execute is confirmed; an execute failure
        // returns above and the dropped transaction rolls back.
        tx.commit()
            .await
            .map_err(|e| IngestError::storage(format!("commit: {e}")))?;

        tracing::debug!(table = %schema.table, message_type = %row.message_type(), "row committed");
        Ok(())
    }
}

impl EventStore for PostgresStore {
    fn insert<'a>(
        &'a self,
        row: &'a EventRow,
    ) -> Pin<Box<dyn Future<Output = Result<(), IngestError>> + Send + 'a>> {
        Box::pin(async move {
            tokio::time::timeout(self.insert_timeout, self.insert_tx(row))
                .await
                .map_err(|_| {
                    IngestError::storage(format!(
                        "insert timed out after {:?}",
                        self.insert_timeout
                    ))
                })?
        })
    }
}

/// Positional bind adapter: one [`SqlValue`] as a statement parameter.
#[derive(Debug)]
struct PgValue<'a>(&'a SqlValue);

impl ToSql for PgValue<'_> {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self.0 {
            SqlValue::Text(s) => s.to_sql(ty, out),
            SqlValue::Int(i) => i.to_sql(ty, out),
            SqlValue::Float(f) => f.to_sql(ty, out),
            SqlValue::Bool(b) => b.to_sql(ty, out),
            SqlValue::Null => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // NULL must bind against any column type; the concrete variants are
        // checked by the delegated to_sql.
        true
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".into(),
            port: 5432,
            dbname: "rocket_data".into(),
            user: "ingest".into(),
            password: "secret".into(),
            pool_size: 2,
            insert_timeout_secs: 1,
        }
    }

    #[test]
    fn test_new_does_not_connect() {
        assert!(PostgresStore::new(&config()).is_ok());
    }

    #[tokio::test]
    async fn test_unknown_type_rejected_before_any_io() {
        // The defensive check fires before a connection is ever acquired,
        // so this passes with no database available.
        let store = PostgresStore::new(&config()).unwrap();
        let row = EventRow::new("RocketFlying".into(), vec![]);
        let err = store.insert(&row).await.unwrap_err();
        assert_eq!(err.kind(), lunar_api::ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_arity_mismatch_rejected_before_any_io() {
        let store = PostgresStore::new(&config()).unwrap();
        let row = EventRow::new("RocketExploded".into(), vec![SqlValue::Null]);
        let err = store.insert(&row).await.unwrap_err();
        assert!(err.message().contains("arity mismatch"));
    }
}
