use crate::config::ConfigError;
use crate::validate::ValidationError;
use std::io;
use thiserror::Error;

/// Failure of a single external process invocation.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to execute {operation} command: {source}")]
    Spawn {
        operation: String,
        #[source]
        source: io::Error,
    },
    #[error("{operation} operation failed with {}", describe_code(.code))]
    Status {
        operation: String,
        code: Option<i32>,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status: {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

#[derive(Error, Debug)]
pub enum HoistError {
    #[error("Error loading configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Profile '{0}' not found in configuration")]
    ProfileNotFound(String),
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
    #[error("Authentication failed: {0}")]
    Authentication(#[source] CommandError),
    #[error("Build failed: {0}")]
    Build(#[source] CommandError),
    #[error("Tag failed: {0}")]
    Tag(#[source] CommandError),
    #[error("Push failed: {0}")]
    Push(#[source] CommandError),
}

pub type Result<T, E = HoistError> = std::result::Result<T, E>;
