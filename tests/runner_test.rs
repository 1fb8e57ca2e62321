//! Integration tests for resolving environments and running jobs

use std::fs;

use ppcli::commands::{run_job, RunOptions};
use ppcli::core::{resolve_environment, EnvSources, Runner};
use ppcli::models::Conf;
use ppcli::PpcliError;

mod common;

use common::{create_dotenv, create_test_project, dump_job_config, PYPROJECT};

#[test]
fn test_run_job_layers_environment() {
    let (temp_dir, _) = create_test_project("");
    let out = temp_dir.path().join("out.txt");
    let contents = dump_job_config(
        &out,
        &["FROM_FILE", "FROM_SECRET", "FROM_INLINE", "GLOBAL", "LOCAL"],
        r#"LOCAL = "job", FROM_INLINE = "job""#,
    );
    let (_config_dir, config_path) = create_test_project(&contents);

    let env_file = create_dotenv(temp_dir.path(), ".env", "FROM_FILE=file\nFROM_SECRET=file\n");
    let secret = create_dotenv(temp_dir.path(), ".env.secret", "FROM_SECRET=secret\n");

    let options = RunOptions {
        selection: vec!["dump".to_string()],
        dotenv_paths: vec![env_file, secret],
        inline_env: vec!["FROM_INLINE=inline".to_string(), "GLOBAL=inline".to_string()],
        use_os_env: false,
    };

    let status = run_job(&config_path, options).unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&out).unwrap().trim(),
        "FROM_FILE=file FROM_SECRET=secret FROM_INLINE=job GLOBAL=GLB LOCAL=job"
    );
}

#[test]
fn test_run_job_without_os_env_hides_host_variables() {
    let (temp_dir, _) = create_test_project("");
    let out = temp_dir.path().join("out.txt");
    let contents = dump_job_config(&out, &["HOME", "GLOBAL"], "");
    let (_config_dir, config_path) = create_test_project(&contents);

    let options = RunOptions {
        selection: vec!["dump".to_string()],
        use_os_env: false,
        ..RunOptions::default()
    };

    assert!(run_job(&config_path, options).unwrap().success());
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "HOME= GLOBAL=GLB");
}

#[test]
fn test_process_env_is_lowest_layer() {
    let (_temp_dir, config_path) = create_test_project(PYPROJECT);
    let conf = Conf::from_path(&config_path).unwrap();

    let sources = EnvSources::default()
        .with_process_env([("GLOBAL", "proc"), ("LOCAL", "proc"), ("SHELL_ONLY", "proc")]);
    let env = resolve_environment(&conf, "show_env", &sources).unwrap();

    assert_eq!(env["GLOBAL"], "GLB");
    assert_eq!(env["LOCAL"], "LOCAL");
    assert_eq!(env["SHELL_ONLY"], "proc");
}

#[test]
fn test_run_job_invalid_selection() {
    let (_temp_dir, config_path) = create_test_project(PYPROJECT);

    let options = RunOptions::default();
    let err = run_job(&config_path, options).unwrap_err();
    assert!(matches!(err, PpcliError::InvalidSelection(_)));

    let options = RunOptions {
        selection: vec!["test".to_string(), "build".to_string()],
        ..RunOptions::default()
    };
    let err = run_job(&config_path, options).unwrap_err();
    assert!(matches!(err, PpcliError::InvalidSelection(_)));

    let options = RunOptions {
        selection: vec!["deploy".to_string()],
        ..RunOptions::default()
    };
    let err = run_job(&config_path, options).unwrap_err();
    assert!(err.to_string().contains("accepts one of [build, check, format"));
}

#[test]
fn test_run_job_exit_status() {
    let (_temp_dir, config_path) = create_test_project(
        r#"
[tool.ppcli.fail]
script = "exit 7"
"#,
    );

    let options = RunOptions {
        selection: vec!["fail".to_string()],
        ..RunOptions::default()
    };
    let status = run_job(&config_path, options).unwrap();
    assert_eq!(status.code(), Some(7));
}

#[test]
fn test_runner_uses_os_env_when_requested() {
    let (temp_dir, _) = create_test_project("");
    let out = temp_dir.path().join("out.txt");
    let contents = dump_job_config(&out, &["PPCLI_FROM_HOST"], "");
    let (_config_dir, config_path) = create_test_project(&contents);
    let conf = Conf::from_path(&config_path).unwrap();

    let sources = EnvSources::default().with_process_env([("PPCLI_FROM_HOST", "yes")]);
    let env = resolve_environment(&conf, "dump", &sources).unwrap();

    let status = Runner::new(&conf).run(&["dump".to_string()], &env).unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "PPCLI_FROM_HOST=yes");
}
