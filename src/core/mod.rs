pub mod config;
pub mod env;
pub mod runner;

pub use config::*;
pub use env::*;
pub use runner::*;
