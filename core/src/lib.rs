pub mod cli;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod executor;
pub mod logger;
pub mod orchestrator;
pub mod phase;
pub mod runner;
pub mod target;

pub use cli::{Cli, PhaseArg};
pub use command::{BuildStep, CMakeCommands};
pub use error::DriverError;
pub use executor::{execute_step, EnvMap, ExecutionResult};
pub use logger::{LogLevel, Logger};
pub use orchestrator::Orchestrator;
pub use phase::Phase;
pub use runner::TargetRunner;
pub use target::{BuildSpec, EnvSource, Target};
