use serde::Serialize;
use std::collections::BTreeMap;
use toml::Value;
use tracing::debug;

use crate::error::{InvalidJobs, JobError, TypeMismatch};

/// Flat string-to-string variable mapping
pub type Variables = BTreeMap<String, String>;

/// A runnable job: a shell script and the variables it declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    script: String,
    variables: Variables,
}

impl Job {
    pub fn new(script: impl Into<String>, variables: Variables) -> Self {
        Self {
            script: script.into(),
            variables,
        }
    }

    /// Validate one raw job entry taken from the configuration.
    ///
    /// The entry must be a table with a string `script`; `variables` is
    /// optional and, when present, must be a table of strings.
    pub fn parse(raw: &Value) -> Result<Self, JobError> {
        let table = raw
            .as_table()
            .ok_or_else(|| JobError::Type(TypeMismatch::new("job data", "a table", raw)))?;

        let script = match table.get("script") {
            None => return Err(JobError::MissingField("script")),
            Some(Value::String(script)) => script.clone(),
            Some(other) => {
                return Err(JobError::Type(TypeMismatch::new(
                    "`script` field",
                    "a string",
                    other,
                )))
            }
        };

        let variables = match table.get("variables") {
            None => Variables::new(),
            Some(raw) => parse_variables("`variables` field", raw).map_err(JobError::Type)?,
        };

        Ok(Self { script, variables })
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }
}

/// Validate a table whose keys and values must all be strings.
///
/// TOML keys are always strings, so only the values need checking.
pub fn parse_variables(subject: &str, raw: &Value) -> Result<Variables, TypeMismatch> {
    let table = raw
        .as_table()
        .ok_or_else(|| TypeMismatch::new(subject, "a table of strings", raw))?;

    table
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key.clone(), s.clone())),
            other => Err(TypeMismatch::new(
                format!("{} entry `{}`", subject, key),
                "a string",
                other,
            )),
        })
        .collect()
}

/// Validated jobs keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JobSet {
    jobs: BTreeMap<String, Job>,
}

impl JobSet {
    /// Validate every raw entry, collecting all failures before giving up.
    ///
    /// Either every entry is valid and the full set is returned, or an
    /// `InvalidJobs` listing each failing entry by name.
    pub fn parse<'a, I>(entries: I) -> Result<Self, InvalidJobs>
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let mut jobs = BTreeMap::new();
        let mut failures = Vec::new();

        for (name, raw) in entries {
            match Job::parse(raw) {
                Ok(job) => {
                    jobs.insert(name.clone(), job);
                }
                Err(e) => {
                    debug!("Job '{}' failed validation: {}", name, e);
                    failures.push((name.clone(), e));
                }
            }
        }

        if !failures.is_empty() {
            return Err(InvalidJobs { failures });
        }

        Ok(Self { jobs })
    }

    /// Job names in lexicographic order
    pub fn names(&self) -> Vec<String> {
        self.jobs.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.jobs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
