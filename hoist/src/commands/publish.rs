use crate::config::Profile;
use crate::error::{CommandError, HoistError, Result};
use crate::registry::ImageRefs;
use crate::util::CommandRunner;
use colored::{ColoredString, Colorize};
use std::process::Command;
use tracing::{info, warn};

const DOCKER_DEFAULT_TAG: &str = "latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Authenticate,
    Build,
    Tag,
    Push,
}

impl Step {
    /// Execution order.
    pub const ALL: [Self; 4] = [Self::Authenticate, Self::Build, Self::Tag, Self::Push];

    pub fn operation(self) -> &'static str {
        match self {
            Self::Authenticate => "ecr login",
            Self::Build => "docker build",
            Self::Tag => "docker tag",
            Self::Push => "docker push",
        }
    }

    fn banner(self) -> ColoredString {
        match self {
            Self::Authenticate => "Authenticating Docker with ECR".cyan(),
            Self::Build => "Building container".cyan(),
            Self::Tag => "Tagging container".yellow(),
            Self::Push => "Pushing container".cyan(),
        }
    }

    pub fn command(self, profile: &Profile, refs: &ImageRefs) -> Command {
        match self {
            Self::Authenticate => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(format!(
                    "aws ecr get-login-password --region {} | docker login --username AWS --password-stdin {}",
                    profile.ecr.region, refs.host
                ));
                cmd
            }
            Self::Build => {
                let mut cmd = Command::new("docker");
                cmd.arg("build")
                    .arg("-t")
                    .arg(&profile.docker.image_name)
                    .arg(".");
                cmd
            }
            Self::Tag => {
                let mut cmd = Command::new("docker");
                cmd.arg("tag").arg(&refs.local).arg(&refs.remote);
                cmd
            }
            Self::Push => {
                let mut cmd = Command::new("docker");
                cmd.arg("push").arg(&refs.remote);
                cmd
            }
        }
    }

    fn fail(self, err: CommandError) -> HoistError {
        match self {
            Self::Authenticate => HoistError::Authentication(err),
            Self::Build => HoistError::Build(err),
            Self::Tag => HoistError::Tag(err),
            Self::Push => HoistError::Push(err),
        }
    }
}

/// Authenticates, builds, tags and pushes the image described by a validated
/// profile. Stops at the first failing step; earlier steps are not undone.
pub fn publish(profile: &Profile, runner: &mut impl CommandRunner) -> Result<()> {
    let refs = ImageRefs::for_profile(profile);
    info!(local = %refs.local, remote = %refs.remote, "publishing image");

    if profile.ecr.image_tag != DOCKER_DEFAULT_TAG {
        // docker build only produces `<image_name>:latest`
        warn!(
            "image_tag is '{}' but the build step tags '{}' only; the tag step expects '{}' to exist locally",
            profile.ecr.image_tag, profile.docker.image_name, refs.local
        );
    }

    Step::ALL
        .into_iter()
        .try_for_each(|step| run_step(step, profile, &refs, &mut *runner))
}

fn run_step(
    step: Step,
    profile: &Profile,
    refs: &ImageRefs,
    runner: &mut impl CommandRunner,
) -> Result<()> {
    println!("{}", step.banner());
    runner
        .run(step.command(profile, refs), step.operation())
        .map_err(|err| step.fail(err))
}
