use std::future::Future;
use std::pin::Pin;

use crate::error::IngestError;
use crate::record::EventRow;

/// Relational record store.
pub trait EventStore: Send + Sync {
    /// Materialize one row inside a single transaction.
    ///
    /// Either the whole row is committed or nothing is; a failure never
    /// leaves a partial row behind.
    fn insert<'a>(
        &'a self,
        row: &'a EventRow,
    ) -> Pin<Box<dyn Future<Output = Result<(), IngestError>> + Send + 'a>>;
}
