//! Common test utilities

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A pyproject.toml with a mix of jobs, like a typical Python project
pub const PYPROJECT: &str = r#"
[project]
name = "demo"
version = "0.1.0"

[tool.black]
line-length = 100

[tool.ppcli._variables]
GLOBAL = "GLB"

[tool.ppcli.build]
script = "python -m build"

[tool.ppcli.check]
script = "ruff check ."

[tool.ppcli.format]
script = "ruff format ."

[tool.ppcli.install]
script = "pip install -e ."

[tool.ppcli.mypy]
script = "mypy src"

[tool.ppcli.show_env]
script = "env"
variables = { LOCAL = "LOCAL" }

[tool.ppcli.test]
script = "pytest"

[tool.ppcli.uninstall]
script = "pip uninstall -y demo"
"#;

/// Create a test project with a pyproject.toml holding `contents`
pub fn create_test_project(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("pyproject.toml");
    fs::write(&config_path, contents).expect("Failed to write pyproject.toml");
    (temp_dir, config_path)
}

/// Create a dot-env file in the project directory
pub fn create_dotenv(project_dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = project_dir.join(name);
    fs::write(&path, contents).expect("Failed to write dotenv file");
    path
}

/// A config whose single `dump` job writes `$VAR` for each name into `out`
pub fn dump_job_config(out: &Path, names: &[&str], job_variables: &str) -> String {
    let echoed = names
        .iter()
        .map(|n| format!("{}=${}", n, n))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"
[tool.ppcli._variables]
GLOBAL = "GLB"

[tool.ppcli.dump]
script = "echo {} > '{}'"
variables = {{ {} }}
"#,
        echoed,
        out.display(),
        job_variables
    )
}
