use crate::config::{DEFAULT_CONFIG_PATH, DEFAULT_PROFILE};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

const LONG_FLAGS: [&str; 2] = ["config", "profile"];

#[derive(Parser, Debug)]
#[command(name = "hoist")]
#[command(about = "Hoist - authenticate to ECR, then build, tag and push a container image", long_about = None)]
pub struct Cli {
    /// Path to the configuration YAML file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Configuration profile to use (e.g. dev, prod)
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PROFILE)]
    pub profile: String,
}

impl Cli {
    /// Parses the process arguments, accepting `-config` and `-profile` as
    /// well as their double-dash forms.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrites single-dash long flags (`-config x`, `-profile=prod`) to the
/// double-dash form clap expects. Everything else passes through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix('-') else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
