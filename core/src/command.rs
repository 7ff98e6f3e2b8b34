use crate::error::DriverError;
use crate::phase::Phase;
use crate::target::BuildSpec;

#[derive(Debug, Clone)]
pub struct BuildStep {
    pub description: String,
    pub commands: Vec<String>,
}

impl BuildStep {
    pub fn new(description: String, commands: Vec<String>) -> Self {
        Self {
            description,
            commands,
        }
    }
}

impl std::fmt::Display for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.description)?;
        for cmd in &self.commands {
            writeln!(f, "  {}", cmd)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CMakeCommands {
    tool: String,
}

impl CMakeCommands {
    pub fn locate() -> Result<Self, DriverError> {
        let tool = which::which("cmake").map_err(|_| DriverError::ToolNotFound)?;
        Ok(Self::with_tool(tool.display().to_string()))
    }

    pub fn with_tool(tool: String) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn phase_step(&self, target_name: &str, phase: Phase, spec: &BuildSpec) -> BuildStep {
        BuildStep::new(
            format!("{} {}", phase.verb(), target_name),
            self.phase_command(phase, spec),
        )
    }

    pub fn phase_command(&self, phase: Phase, spec: &BuildSpec) -> Vec<String> {
        match phase {
            Phase::Configure => self.configure(spec),
            Phase::Build => self.build_target(spec, "all"),
            Phase::Clean => self.build_target(spec, "clean"),
        }
    }

    fn configure(&self, spec: &BuildSpec) -> Vec<String> {
        let mut cmd = vec![self.tool.clone()];
        cmd.extend(
            spec.options
                .iter()
                .map(|(key, value)| format!("-D{}={}", key, value)),
        );
        cmd.push(format!("-G{}", spec.generator));
        cmd.push(format!("-B{}", spec.build_dir));
        cmd
    }

    fn build_target(&self, spec: &BuildSpec, target: &str) -> Vec<String> {
        vec![
            self.tool.clone(),
            "--build".to_string(),
            spec.build_dir.clone(),
            "--target".to_string(),
            target.to_string(),
        ]
    }
}
