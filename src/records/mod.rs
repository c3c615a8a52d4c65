mod loader;
mod types;

pub use loader::load_records;
pub use types::{HealthcheckRecord, RecordError};
