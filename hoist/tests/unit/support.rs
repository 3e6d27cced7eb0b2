use hoist::commands::publish::Step;
use hoist::config::{Config, Profile};
use hoist::error::CommandError;
use hoist::util::CommandRunner;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const DEV_CONFIG: &str = r#"
profiles:
  dev:
    ecr:
      region: us-east-1
      account_id: "123456789012"
      repository: myrepo
      image_tag: latest
    docker:
      image_name: myapp
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: String,
    pub program: String,
    pub args: Vec<String>,
}

/// Records every command instead of running it. Fails at `fail_at` if set.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<Invocation>,
    pub fail_at: Option<Step>,
}

impl RecordingRunner {
    pub fn failing_at(step: Step) -> Self {
        Self {
            calls: Vec::new(),
            fail_at: Some(step),
        }
    }

    pub fn operations(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.operation.as_str()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, cmd: Command, operation: &str) -> Result<(), CommandError> {
        self.calls.push(Invocation {
            operation: operation.to_string(),
            program: cmd.get_program().to_string_lossy().into_owned(),
            args: cmd
                .get_args()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        });

        match self.fail_at {
            Some(step) if step.operation() == operation => Err(CommandError::Status {
                operation: operation.to_string(),
                code: Some(1),
            }),
            _ => Ok(()),
        }
    }
}

pub fn write_config(dir: &TempDir, yaml: &str) -> anyhow::Result<PathBuf> {
    let path = dir.path().join("deploy.yml");
    fs::write(&path, yaml)?;
    Ok(path)
}

pub fn parse(yaml: &str) -> Config {
    Config::parse(yaml, Path::new("deploy.yml")).unwrap()
}

pub fn dev_profile() -> Profile {
    parse(DEV_CONFIG).profile("dev").unwrap().clone()
}
