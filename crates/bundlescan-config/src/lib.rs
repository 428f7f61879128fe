pub mod config;
pub mod discovery;
pub mod error;
pub mod policy;
pub mod settings;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;
pub use policy::*;
pub use settings::*;

pub use discovery::{discover, layered_figment, ConfigDiscovery, CONFIG_FILE_NAME, ENV_PREFIX};
pub use validation::validate;
