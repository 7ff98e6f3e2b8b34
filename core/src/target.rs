use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSource {
    Inline { overrides: Vec<(String, String)> },
    ScriptCaptured { command: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    pub options: Vec<(String, String)>,
    pub generator: String,
    pub build_dir: String,
}

#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub env_source: EnvSource,
    pub spec: BuildSpec,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
