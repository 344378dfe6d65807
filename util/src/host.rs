//! Host platform utility functions

use std::path::PathBuf;

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "TALOS_SW_ROOT";

/// Retrieve the software root directory from the environment.
///
/// The root is the directory containing the `params` and `sessions`
/// directories, and is pointed at by the `TALOS_SW_ROOT` environment
/// variable.
pub fn get_talos_sw_root() -> Result<PathBuf, std::env::VarError> {
    Ok(PathBuf::from(std::env::var(SW_ROOT_ENV_VAR)?))
}
