use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{PpcliError, Result};
use crate::models::{Conf, Variables};

/// Inputs for every environment layer below the job's own variables
#[derive(Debug, Clone, Default)]
pub struct EnvSources {
    /// Snapshot of the host environment; `None` leaves the base layer empty
    pub process_env: Option<Variables>,
    /// Dot-env files, applied in order
    pub dotenv_paths: Vec<PathBuf>,
    /// Inline `KEY=VALUE` lines
    pub inline: Vec<String>,
}

impl EnvSources {
    /// Build the sources, snapshotting the host environment if `use_os_env` is set
    pub fn new(dotenv_paths: Vec<PathBuf>, inline: Vec<String>, use_os_env: bool) -> Self {
        let process_env = use_os_env.then(snapshot_process_env);
        Self {
            process_env,
            dotenv_paths,
            inline,
        }
    }

    /// Replace the host environment layer
    pub fn with_process_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.process_env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }
}

/// Copy the current process environment, skipping entries that are not UTF-8
pub fn snapshot_process_env() -> Variables {
    utf8_variables(std::env::vars_os())
}

fn utf8_variables<I>(raw: I) -> Variables
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut vars = Variables::new();
    for (key, value) in raw {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                vars.insert(key, value);
            }
            (key, _) => {
                let key = key.unwrap_or_else(|k| k.to_string_lossy().into_owned());
                debug!("Skipping non UTF-8 host variable {}", key);
            }
        }
    }
    vars
}

/// Resolve the complete environment a job runs with.
///
/// Layers from lowest to highest precedence: host environment, dot-env
/// files in order, inline assignments, then global and job variables.
pub fn resolve_environment(
    conf: &Conf,
    job_name: &str,
    sources: &EnvSources,
) -> Result<Variables> {
    let job_variables = conf.job_variables(job_name)?;

    let mut env = sources.process_env.clone().unwrap_or_default();
    debug!("Host environment layer: {} variable(s)", env.len());

    for path in &sources.dotenv_paths {
        let values = load_dotenv_file(path)?;
        debug!("Dotenv layer {}: {} variable(s)", path.display(), values.len());
        env.extend(values);
    }

    let inline = parse_inline(&sources.inline)?;
    debug!("Inline layer: {} variable(s)", inline.len());
    env.extend(inline);

    debug!("Job layer '{}': {} variable(s)", job_name, job_variables.len());
    env.extend(job_variables);

    Ok(env)
}

/// Decode a dot-env file; a path that is not a file contributes nothing
pub fn load_dotenv_file(path: &Path) -> Result<Variables> {
    if !path.is_file() {
        warn!("Dotenv file {} does not exist, skipping", path.display());
        return Ok(Variables::new());
    }

    let env_file_error = |source: dotenvy::Error| PpcliError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    dotenvy::from_path_iter(path)
        .map_err(env_file_error)?
        .map(|item| item.map_err(env_file_error))
        .collect()
}

/// Decode inline assignment lines as one dot-env document
pub fn parse_inline(lines: &[String]) -> Result<Variables> {
    if lines.is_empty() {
        return Ok(Variables::new());
    }

    let joined = lines.join("\n");
    dotenvy::from_read_iter(joined.as_bytes())
        .map(|item| item.map_err(PpcliError::InlineEnv))
        .collect()
}
