pub mod conf;
pub mod job;

pub use conf::*;
pub use job::*;
