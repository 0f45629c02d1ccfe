use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// A locally executed command that did not succeed.
#[derive(Debug, Error)]
pub enum CommandFailure {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: String,
        stderr: String,
    },
}

fn shell_command(command: &str) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C");
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c");
        cmd
    };
    cmd.arg(command);
    cmd
}

/// Run `command` through the platform shell in the current directory.
///
/// Stdout goes straight to the terminal; stderr is captured so it can be
/// sent to the backend for debugging, then echoed.
pub async fn run_shell(command: &str) -> Result<(), CommandFailure> {
    debug!(command, "running shell command");
    let child = shell_command(command)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| CommandFailure::Spawn {
            command: command.to_string(),
            source,
        })?;

    let output = child
        .wait_with_output()
        .await
        .map_err(|source| CommandFailure::Spawn {
            command: command.to_string(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        eprintln!("{stderr}");
    }

    if output.status.success() {
        Ok(())
    } else {
        Err(CommandFailure::Exit {
            command: command.to_string(),
            status: output.status.to_string(),
            stderr,
        })
    }
}
