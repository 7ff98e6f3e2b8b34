use crate::command::CMakeCommands;
use crate::error::DriverError;
use crate::logger::Logger;
use crate::phase::Phase;
use crate::runner::TargetRunner;
use crate::target::Target;

pub struct Orchestrator {
    targets: Vec<Target>,
    cmake: CMakeCommands,
    logger: Logger,
}

impl Orchestrator {
    pub fn new(targets: Vec<Target>, cmake: CMakeCommands) -> Self {
        Self {
            targets,
            cmake,
            logger: Logger::new(),
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub async fn run(&self, phase: Option<Phase>) -> Result<(), DriverError> {
        match phase {
            Some(phase) => self.run_phase(phase).await,
            None => {
                self.run_phase(Phase::Configure).await?;
                self.run_phase(Phase::Build).await
            }
        }
    }

    // Table order; later targets may be build-order-dependent, and the
    // first failure ends the whole run.
    pub async fn run_phase(&self, phase: Phase) -> Result<(), DriverError> {
        let runner = TargetRunner::new(&self.cmake, &self.logger);
        for target in &self.targets {
            runner.run(target, phase).await?;
        }
        Ok(())
    }
}
