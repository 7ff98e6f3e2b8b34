use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::DEFAULT_TARGETS_FILE;
use crate::phase::Phase;

#[derive(Parser, Debug)]
#[command(name = "cbd")]
#[command(author, version, about = "CMake build driver", long_about = None)]
pub struct Cli {
    #[arg(
        value_name = "PHASE",
        help = "Phase to run; without it, configure then build"
    )]
    pub phase: Option<PhaseArg>,

    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Target table path"
    )]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PhaseArg {
    Cfg,
    Configure,
    Build,
    Clean,
}

impl PhaseArg {
    pub fn phase(&self) -> Phase {
        match self {
            PhaseArg::Cfg | PhaseArg::Configure => Phase::Configure,
            PhaseArg::Build => Phase::Build,
            PhaseArg::Clean => Phase::Clean,
        }
    }
}

impl Cli {
    pub fn targets_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGETS_FILE))
    }
}
