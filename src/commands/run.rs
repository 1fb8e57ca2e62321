use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tracing::info;

use crate::core::{load_conf, resolve_environment, EnvSources, Runner};
use crate::error::PpcliError;

/// Run options
pub struct RunOptions {
    /// Job names given on the command line; exactly one is accepted
    pub selection: Vec<String>,
    /// Dot-env files, lowest precedence first
    pub dotenv_paths: Vec<PathBuf>,
    /// Inline `KEY=VALUE` assignments
    pub inline_env: Vec<String>,
    /// Seed the environment from the host process
    pub use_os_env: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            selection: Vec::new(),
            dotenv_paths: Vec::new(),
            inline_env: Vec::new(),
            use_os_env: true,
        }
    }
}

/// Run the selected job and return the script's exit status
pub fn run_job(config: &Path, options: RunOptions) -> Result<ExitStatus, PpcliError> {
    let conf = load_conf(config)?;
    let runner = Runner::new(&conf);
    let job_name = runner.select(&options.selection)?;

    let sources = EnvSources::new(options.dotenv_paths, options.inline_env, options.use_os_env);
    let env = resolve_environment(&conf, job_name, &sources)?;
    info!("Resolved {} environment variable(s) for '{}'", env.len(), job_name);

    runner.execute(job_name, &env)
}
