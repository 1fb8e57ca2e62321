//! ppcli - run shell jobs defined in pyproject.toml
//!
//! Jobs live in the `[tool.ppcli]` table of a pyproject.toml file. Each job is a
//! shell script plus optional variables; `_variables` holds globals shared by all jobs.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (list, run)
//! - **core**: Config loading, environment resolution, job runner
//! - **models**: Data structures (job, job set, conf)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{PpcliError, Result};
