use std::path::Path;
use tracing::info;

use crate::error::PpcliError;
use crate::models::Conf;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./pyproject.toml";

/// Load configuration from a pyproject.toml path
pub fn load_conf(path: &Path) -> Result<Conf, PpcliError> {
    let conf = Conf::from_path(path)?;

    info!(
        "Configuration loaded from {}: {} job(s), {} global variable(s)",
        path.display(),
        conf.jobs.len(),
        conf.variables.len()
    );

    Ok(conf)
}
