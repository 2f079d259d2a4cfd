pub mod json_store;
pub mod schema;

use anyhow::Result;

use crate::session::result::RunRecord;

pub use json_store::JsonStore;

/// Sink for finished runs.
pub trait RunRecorder {
    fn record(&mut self, record: &RunRecord) -> Result<()>;
}
