// Core types for the Scanboard dashboard actions

pub mod query;
pub mod revalidate;
pub mod session;
pub mod types;
pub mod validation;

pub use query::ScanQuery;
pub use revalidate::{NoopRevalidator, RecordingRevalidator, Revalidator};
pub use session::{Session, SessionError, SessionProvider, StaticSession};
pub use types::*;
pub use validation::ValidationError;
