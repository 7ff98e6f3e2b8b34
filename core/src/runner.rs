use crate::command::CMakeCommands;
use crate::env;
use crate::error::DriverError;
use crate::executor;
use crate::logger::{LogLevel, Logger};
use crate::phase::Phase;
use crate::target::Target;

pub struct TargetRunner<'a> {
    cmake: &'a CMakeCommands,
    logger: &'a Logger,
}

impl<'a> TargetRunner<'a> {
    pub fn new(cmake: &'a CMakeCommands, logger: &'a Logger) -> Self {
        Self { cmake, logger }
    }

    pub async fn run(&self, target: &Target, phase: Phase) -> Result<(), DriverError> {
        let step = self.cmake.phase_step(&target.name, phase, &target.spec);
        self.logger.log(LogLevel::Info, &step.description);

        // Each target resolves from a fresh snapshot; one target's overrides
        // must never leak into the next.
        let base = env::process_env();
        let resolved = env::resolve(&target.env_source, &base).await?;

        let result = executor::execute_step(step.commands, &resolved, |line| {
            println!("{}", line);
        })
        .await?;

        if !result.success {
            return Err(DriverError::ExternalProcessFailure {
                code: result.exit_code.unwrap_or(1),
            });
        }

        Ok(())
    }
}
