use std::collections::HashMap;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::error::DriverError;

pub type EnvMap = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub success: bool,
    pub duration: f64,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub exit_code: Option<i32>,
}

pub async fn execute_step<F>(
    command: Vec<String>,
    env: &EnvMap,
    mut output_callback: F,
) -> Result<ExecutionResult, DriverError>
where
    F: FnMut(String) + Send + 'static,
{
    let start = Instant::now();

    let program = &command[0];
    let args = &command[1..];

    let mut child = Command::new(program)
        .args(args)
        .env_clear()
        .envs(env)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| DriverError::Spawn {
            command: program.clone(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let tx_clone = tx.clone();
    let stdout_task = tokio::spawn(async move {
        let mut lines = Vec::new();
        if let Some(stdout) = stdout {
            let mut reader = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                lines.push(line.clone());
                let _ = tx_clone.send(line);
            }
        }
        lines
    });

    let stderr_task = tokio::spawn(async move {
        let mut lines = Vec::new();
        if let Some(stderr) = stderr {
            let mut reader = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                lines.push(line.clone());
                let _ = tx.send(line);
            }
        }
        lines
    });

    let callback_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            output_callback(line);
        }
    });

    let status = child.wait().await.map_err(|source| DriverError::Spawn {
        command: command[0].clone(),
        source,
    })?;

    let stdout_lines = stdout_task.await.unwrap_or_default();
    let stderr_lines = stderr_task.await.unwrap_or_default();
    let _ = callback_task.await;

    Ok(ExecutionResult {
        success: status.success(),
        duration: start.elapsed().as_secs_f64(),
        stdout: stdout_lines,
        stderr: stderr_lines,
        exit_code: status.code(),
    })
}

pub async fn capture_output(command: Vec<String>, env: &EnvMap) -> Result<ExecutionResult, DriverError> {
    let start = Instant::now();

    let program = &command[0];
    let args = &command[1..];

    let mut child = Command::new(program)
        .args(args)
        .env_clear()
        .envs(env)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| DriverError::Spawn {
            command: program.clone(),
            source,
        })?;

    let mut stdout_lines = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        let mut reader = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = reader.next_line().await {
            stdout_lines.push(line);
        }
    }

    let status = child.wait().await.map_err(|source| DriverError::Spawn {
        command: command[0].clone(),
        source,
    })?;

    Ok(ExecutionResult {
        success: status.success(),
        duration: start.elapsed().as_secs_f64(),
        stdout: stdout_lines,
        stderr: Vec::new(),
        exit_code: status.code(),
    })
}
