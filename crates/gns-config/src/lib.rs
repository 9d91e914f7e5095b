pub mod loader;
pub mod model;

pub use loader::ConfigLoader;
pub use model::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, GnsConfig};
