pub mod errors;
pub mod cache;

pub use errors::{EngineError, Result};
pub use cache::TtlCache;
