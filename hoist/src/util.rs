use crate::error::CommandError;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Seam between the publish steps and the processes they start.
pub trait CommandRunner {
    fn run(&mut self, cmd: Command, operation: &str) -> Result<(), CommandError>;
}

/// Runs commands for real, streaming their output to this terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: Command, operation: &str) -> Result<(), CommandError> {
        run_command(cmd, operation)
    }
}

pub fn run_command(mut cmd: Command, operation: &str) -> Result<(), CommandError> {
    info!("Running {operation} operation...");
    debug!(command = %describe(&cmd), "spawning");

    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| CommandError::Spawn {
            operation: operation.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(CommandError::Status {
            operation: operation.to_string(),
            code: status.code(),
        });
    }

    info!("{operation} operation completed successfully");
    Ok(())
}

/// Program and arguments joined with spaces, for logs.
pub fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
