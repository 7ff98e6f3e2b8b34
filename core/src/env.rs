use std::env;

use crate::error::DriverError;
use crate::executor::{self, EnvMap};
use crate::target::EnvSource;

#[cfg(windows)]
const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: &str = ":";

const PATH_KEY: &str = "PATH";

pub fn process_env() -> EnvMap {
    env::vars().collect()
}

pub async fn resolve(source: &EnvSource, base: &EnvMap) -> Result<EnvMap, DriverError> {
    match source {
        EnvSource::Inline { overrides } => Ok(overlay(overrides, base)),
        EnvSource::ScriptCaptured { command } => capture(command, base).await,
    }
}

fn overlay(overrides: &[(String, String)], base: &EnvMap) -> EnvMap {
    let mut resolved = base.clone();
    for (key, value) in overrides {
        if key == PATH_KEY {
            let joined = match resolved.get(PATH_KEY) {
                Some(existing) => format!("{}{}{}", value, PATH_LIST_SEPARATOR, existing),
                None => value.clone(),
            };
            resolved.insert(key.clone(), joined);
        } else {
            resolved.insert(key.clone(), value.clone());
        }
    }
    resolved
}

async fn capture(command: &[String], base: &EnvMap) -> Result<EnvMap, DriverError> {
    let result = executor::capture_output(capture_invocation(command), base).await?;
    if !result.success {
        return Err(DriverError::ExternalProcessFailure {
            code: result.exit_code.unwrap_or(1),
        });
    }
    decode_env_lines(result.stdout.iter().map(String::as_str))
}

// The script runs inside the interpreter session, its own output silenced,
// and the interpreter then dumps the resulting environment to stdout.
#[cfg(windows)]
fn capture_invocation(command: &[String]) -> Vec<String> {
    let script = format!("{} >NUL && set", command.join(" "));
    vec!["cmd".to_string(), "/C".to_string(), script]
}

#[cfg(not(windows))]
fn capture_invocation(command: &[String]) -> Vec<String> {
    let script = format!("{} >/dev/null && env", command.join(" "));
    vec!["sh".to_string(), "-c".to_string(), script]
}

pub fn decode_env_lines<'a, I>(lines: I) -> Result<EnvMap, DriverError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut resolved = EnvMap::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (name, value) = line.split_once('=').ok_or_else(|| DriverError::MalformedCapture {
            line: line.to_string(),
        })?;
        resolved.insert(name.to_string(), value.to_string());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_env() -> EnvMap {
        let mut base = EnvMap::new();
        base.insert("PATH".to_string(), "/usr/bin:/bin".to_string());
        base.insert("HOME".to_string(), "/home/builder".to_string());
        base
    }

    #[test]
    #[cfg(unix)]
    fn test_overlay_prepends_path() {
        let overrides = vec![("PATH".to_string(), "/opt/toolchain/bin".to_string())];
        let resolved = overlay(&overrides, &base_env());
        assert_eq!(
            resolved.get("PATH").map(String::as_str),
            Some("/opt/toolchain/bin:/usr/bin:/bin")
        );
    }

    #[test]
    fn test_overlay_replaces_and_inserts() {
        let overrides = vec![
            ("HOME".to_string(), "/tmp/jail".to_string()),
            ("CC".to_string(), "clang".to_string()),
        ];
        let resolved = overlay(&overrides, &base_env());
        assert_eq!(resolved.get("HOME").map(String::as_str), Some("/tmp/jail"));
        assert_eq!(resolved.get("CC").map(String::as_str), Some("clang"));
        assert_eq!(
            resolved.get("PATH").map(String::as_str),
            Some("/usr/bin:/bin")
        );
    }

    #[test]
    fn test_overlay_does_not_mutate_base() {
        let base = base_env();
        let overrides = vec![
            ("PATH".to_string(), "/opt/bin".to_string()),
            ("HOME".to_string(), "/elsewhere".to_string()),
        ];
        let _resolved = overlay(&overrides, &base);
        assert_eq!(base, base_env());
    }

    #[test]
    fn test_overlay_path_without_base_entry() {
        let mut base = base_env();
        base.remove("PATH");
        let overrides = vec![("PATH".to_string(), "/opt/bin".to_string())];
        let resolved = overlay(&overrides, &base);
        assert_eq!(resolved.get("PATH").map(String::as_str), Some("/opt/bin"));
    }

    #[test]
    fn test_decode_env_lines() {
        let lines = vec!["FOO=bar", "EMPTY=", "EQ=a=b=c"];
        let resolved = decode_env_lines(lines).unwrap();
        assert_eq!(resolved.get("FOO").map(String::as_str), Some("bar"));
        assert_eq!(resolved.get("EMPTY").map(String::as_str), Some(""));
        assert_eq!(resolved.get("EQ").map(String::as_str), Some("a=b=c"));
    }

    #[test]
    fn test_decode_env_lines_skips_blank_lines() {
        let lines = vec!["FOO=bar", "", "   "];
        let resolved = decode_env_lines(lines).unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_decode_env_lines_rejects_missing_separator() {
        let lines = vec!["FOO=bar", "NONSENSE"];
        let err = decode_env_lines(lines).unwrap_err();
        assert!(matches!(
            err,
            DriverError::MalformedCapture { ref line } if line == "NONSENSE"
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_capture_invocation_appends_env_dump() {
        let command = vec!["./vcsetup.sh".to_string(), "x64".to_string()];
        let invocation = capture_invocation(&command);
        assert_eq!(invocation[0], "sh");
        assert_eq!(invocation[1], "-c");
        assert_eq!(invocation[2], "./vcsetup.sh x64 >/dev/null && env");
    }

    #[cfg(unix)]
    mod captured {
        use super::*;
        use std::fs;

        #[tokio::test]
        async fn test_capture_replaces_base_entirely() {
            let dir = tempfile::tempdir().unwrap();
            let script = dir.path().join("setup.sh");
            fs::write(&script, "export CBD_TOOLCHAIN=armv7\nunset CBD_BASE_ONLY\n").unwrap();

            let source = EnvSource::ScriptCaptured {
                command: vec![".".to_string(), script.display().to_string()],
            };
            let mut base = base_env();
            base.insert("CBD_BASE_ONLY".to_string(), "yes".to_string());

            let resolved = resolve(&source, &base).await.unwrap();
            assert_eq!(
                resolved.get("CBD_TOOLCHAIN").map(String::as_str),
                Some("armv7")
            );
            assert!(!resolved.contains_key("CBD_BASE_ONLY"));
        }

        #[tokio::test]
        async fn test_capture_script_failure_carries_exit_code() {
            let source = EnvSource::ScriptCaptured {
                command: vec!["exit".to_string(), "7".to_string()],
            };
            let err = resolve(&source, &base_env()).await.unwrap_err();
            assert!(matches!(
                err,
                DriverError::ExternalProcessFailure { code: 7 }
            ));
        }

        #[tokio::test]
        async fn test_capture_rejects_multiline_values() {
            let dir = tempfile::tempdir().unwrap();
            let script = dir.path().join("setup.sh");
            fs::write(&script, "export CBD_BAD='first\nsecond'\n").unwrap();

            let source = EnvSource::ScriptCaptured {
                command: vec![".".to_string(), script.display().to_string()],
            };
            let err = resolve(&source, &base_env()).await.unwrap_err();
            assert!(matches!(err, DriverError::MalformedCapture { .. }));
        }
    }
}
