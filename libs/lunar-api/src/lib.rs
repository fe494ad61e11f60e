pub mod envelope;
pub mod error;
pub mod log;
pub mod record;
pub mod schema;
pub mod store;
pub mod transform;

pub use envelope::{EventEnvelope, EventMetadata};
pub use error::{ErrorKind, IngestError, TransformError};
pub use log::EventLog;
pub use record::{EventRow, SqlValue};
pub use schema::{EventSchema, FieldMap};
pub use store::EventStore;
pub use transform::transform;
