use std::process::{Command, ExitStatus};
use tracing::{debug, info};

use crate::error::{PpcliError, Result};
use crate::models::{Conf, Variables};

/// Shell every job script is handed to
pub const SHELL: &str = "/bin/sh";

/// Runs the scripts of a loaded configuration
pub struct Runner<'a> {
    conf: &'a Conf,
}

impl<'a> Runner<'a> {
    pub fn new(conf: &'a Conf) -> Self {
        Self { conf }
    }

    /// Check that exactly one known job was selected and return its name
    pub fn select<'s>(&self, selection: &'s [String]) -> Result<&'s str> {
        let [name] = selection else {
            return Err(PpcliError::InvalidSelection(format!(
                "Invalid job length: {}, accepts name only",
                selection.len()
            )));
        };

        if !self.conf.contains_job(name) {
            return Err(PpcliError::InvalidSelection(format!(
                "Invalid job: {}, accepts one of [{}]",
                name,
                self.conf.job_names().join(", ")
            )));
        }

        Ok(name.as_str())
    }

    /// Validate the selection, then run the job with `env` as its whole environment
    pub fn run(&self, selection: &[String], env: &Variables) -> Result<ExitStatus> {
        let name = self.select(selection)?;
        self.execute(name, env)
    }

    /// Run a job's script through the shell and wait for it to exit.
    ///
    /// The child inherits stdio; its environment is exactly `env`.
    pub fn execute(&self, name: &str, env: &Variables) -> Result<ExitStatus> {
        let job = self
            .conf
            .jobs
            .get(name)
            .ok_or_else(|| PpcliError::InvalidName(name.to_string()))?;

        info!("Running job '{}'", name);
        debug!("$ {}", job.script());

        let status = Command::new(SHELL)
            .arg("-c")
            .arg(job.script())
            .env_clear()
            .envs(env)
            .status()
            .map_err(|source| PpcliError::Spawn {
                job: name.to_string(),
                source,
            })?;

        info!("Job '{}' finished: {}", name, status);
        Ok(status)
    }
}
