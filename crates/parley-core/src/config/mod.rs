//! Configuration loading
//!
//! A config file (TOML, YAML or JSON, chosen by extension) is read first and
//! environment variables are laid over it. See [`load_config`].

pub mod env_loader;
pub mod file_loader;
pub mod model;
pub mod resolver;

pub use env_loader::apply_env_vars;
pub use file_loader::load_from_file;
pub use model::{LoggingConfig, ParleyConfig, ProviderSettings};
pub use resolver::ResolvedProvider;

use crate::error::ParleyResult;
use std::path::Path;

/// Load `path` (defaults when it does not exist) and overlay the process
/// environment
pub fn load_config(path: &Path) -> ParleyResult<ParleyConfig> {
    let mut config = load_from_file(path)?;
    apply_env_vars(&mut config, std::env::vars())?;
    Ok(config)
}
