use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ppcli::commands::{list_jobs, run_job, RunOptions};
use ppcli::core::DEFAULT_CONFIG_PATH;

/// ppcli - run scripts defined in pyproject.toml
#[derive(Parser)]
#[command(name = "ppcli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// pyproject.toml path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List jobs
    List {
        /// Print jobs with their scripts and variables as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run job
    Run {
        /// .env file to load, repeatable (e.g. -d .env -d .env.secret)
        #[arg(short = 'd', long = "dotenv", value_name = "PATH")]
        dotenv: Vec<PathBuf>,

        /// Environment variable, formatted the same as dotenv contents (KEY=VALUE)
        #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,

        /// Seed the job environment from the current process environment
        #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
        use_os_env: bool,

        /// Job to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "JOB")]
        job: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging; stdout belongs to the job
    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let result = match cli.command {
        Commands::List { json } => list_jobs(&cli.config, json).map(|_| 0),

        Commands::Run {
            dotenv,
            env,
            use_os_env,
            job,
        } => {
            let options = RunOptions {
                selection: job,
                dotenv_paths: dotenv,
                inline_env: env,
                use_os_env,
            };
            // A job killed by a signal has no exit code
            run_job(&cli.config, options).map(|status| status.code().unwrap_or(1))
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
