use std::path::Path;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::{PpcliError, Result, TypeMismatch};
use crate::models::job::{parse_variables, JobSet, Variables};

/// Key path of the ppcli section inside pyproject.toml
pub const SCOPE_PATH: [&str; 2] = ["tool", "ppcli"];
/// Dotted form of `SCOPE_PATH`, used in messages
pub const SCOPE_NAME: &str = "tool.ppcli";
/// Keys starting with this prefix hold metadata rather than jobs
pub const RESERVED_PREFIX: char = '_';
/// Metadata key holding the global variables
pub const VARIABLES_KEY: &str = "_variables";

/// Configuration loaded from the `[tool.ppcli]` scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conf {
    /// Global variables shared by every job
    pub variables: Variables,
    pub jobs: JobSet,
}

impl Conf {
    /// Load config from a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PpcliError::NotFound(path.to_path_buf()));
        }
        // TOML is UTF-8 only, so undecodable bytes are a format problem
        let contents = String::from_utf8(std::fs::read(path)?).map_err(|e| PpcliError::Format {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Parse config from TOML text; `origin` is only used in messages
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self> {
        let document: Table = toml::from_str(contents).map_err(|source| PpcliError::Format {
            path: origin.to_path_buf(),
            source: Box::new(source),
        })?;

        let scope = find_scope(&document).ok_or_else(|| PpcliError::MissingScope {
            scope: SCOPE_NAME,
            path: origin.to_path_buf(),
        })?;

        Self::from_scope(scope)
    }

    /// Build from the scope value, splitting metadata keys from job entries
    pub fn from_scope(scope: &Value) -> Result<Self> {
        let table = scope.as_table().ok_or_else(|| {
            PpcliError::Type(TypeMismatch::new(
                format!("{} scope", SCOPE_NAME),
                "a table",
                scope,
            ))
        })?;

        let mut variables = Variables::new();
        let (metadata, candidates): (Vec<_>, Vec<_>) = table
            .iter()
            .partition(|(key, _)| key.starts_with(RESERVED_PREFIX));

        for (key, value) in metadata {
            if key.as_str() == VARIABLES_KEY {
                variables = parse_variables(VARIABLES_KEY, value).map_err(PpcliError::Type)?;
            } else {
                warn!("Ignoring unknown reserved key '{}' in {}", key, SCOPE_NAME);
            }
        }

        let jobs = JobSet::parse(candidates)?;
        debug!("Jobs: {:?}", jobs.names());

        Ok(Self { variables, jobs })
    }

    /// Job names in lexicographic order
    pub fn job_names(&self) -> Vec<String> {
        self.jobs.names()
    }

    pub fn contains_job(&self, name: &str) -> bool {
        self.jobs.contains(name)
    }

    /// Global variables overlaid by the job's own variables
    pub fn job_variables(&self, name: &str) -> Result<Variables> {
        let job = self
            .jobs
            .get(name)
            .ok_or_else(|| PpcliError::InvalidName(name.to_string()))?;

        let mut merged = self.variables.clone();
        merged.extend(job.variables().iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(merged)
    }
}

/// Walk `SCOPE_PATH`; a missing key or a non-table parent means no scope
fn find_scope(document: &Table) -> Option<&Value> {
    let (last, parents) = SCOPE_PATH.split_last()?;
    let mut table = document;
    for key in parents {
        table = table.get(*key)?.as_table()?;
    }
    table.get(*last)
}
