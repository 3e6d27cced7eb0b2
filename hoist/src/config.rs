use crate::error::HoistError;
use serde::Deserialize;
use serde::de::{self, Deserializer};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "deploy.yml";
pub const DEFAULT_PROFILE: &str = "dev";

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_IMAGE_TAG: &str = "latest";

/// `Read` and `Syntax` both mean the file could not be read as YAML;
/// `Parse` means the YAML does not have the profile shape.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}: invalid YAML: {source}", .path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub ecr: EcrConfig,
    pub docker: DockerConfig,
}

/// Where the image goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EcrConfig {
    #[serde(deserialize_with = "lenient_string")]
    pub region: String,
    #[serde(deserialize_with = "lenient_string")]
    pub account_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub repository: String,
    #[serde(deserialize_with = "lenient_string")]
    pub image_tag: String,
}

/// What gets built locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    #[serde(deserialize_with = "lenient_string")]
    pub image_name: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Decodes a YAML document. `origin` only labels errors.
    ///
    /// Keys are matched case-insensitively, and the `dev` profile gets a
    /// default region and image tag when those keys are absent.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let document = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(content).map_err(|source| ConfigError::Syntax {
                path: origin.to_path_buf(),
                source,
            })?
        };

        let mut document = lowercase_keys(document);
        apply_defaults(&mut document);
        fill_empty_sections(&mut document);

        serde_yaml::from_value(document).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Profile names are stored lowercased, so lookup is case-insensitive.
    pub fn profile(&self, name: &str) -> Result<&Profile, HoistError> {
        self.profiles
            .get(&name.to_lowercase())
            .ok_or_else(|| HoistError::ProfileNotFound(name.to_string()))
    }
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(key, value)| (lowercase_key(key), lowercase_keys(value)))
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

fn lowercase_key(key: Value) -> Value {
    match key {
        Value::String(key) => Value::String(key.to_lowercase()),
        Value::Number(key) => Value::String(key.to_string()),
        Value::Bool(key) => Value::String(key.to_string()),
        other => other,
    }
}

fn apply_defaults(document: &mut Value) {
    let Some(ecr) = section_mut(document, &["profiles", DEFAULT_PROFILE, "ecr"]) else {
        return;
    };
    set_default(ecr, "region", DEFAULT_REGION);
    set_default(ecr, "image_tag", DEFAULT_IMAGE_TAG);
}

/// Walks `path`, creating mappings where a key is absent or null. Stops with
/// `None` at any other non-mapping value and leaves it for the decoder to
/// reject.
fn section_mut<'a>(node: &'a mut Value, path: &[&str]) -> Option<&'a mut Mapping> {
    if node.is_null() {
        *node = Value::Mapping(Mapping::new());
    }

    let mut map = node.as_mapping_mut()?;
    for key in path {
        let child = map.entry(Value::from(*key)).or_insert(Value::Null);
        if child.is_null() {
            *child = Value::Mapping(Mapping::new());
        }
        map = child.as_mapping_mut()?;
    }

    Some(map)
}

fn set_default(map: &mut Mapping, key: &str, value: &str) {
    if map.get(key).is_none_or(Value::is_null) {
        map.insert(Value::from(key), Value::from(value));
    }
}

/// `prod:` with nothing under it is an empty profile, not a type error.
fn fill_empty_sections(document: &mut Value) {
    let Some(profiles) = document
        .get_mut("profiles")
        .and_then(Value::as_mapping_mut)
    else {
        return;
    };

    for (_, profile) in profiles.iter_mut() {
        if profile.is_null() {
            *profile = Value::Mapping(Mapping::new());
        }
        let Some(sections) = profile.as_mapping_mut() else {
            continue;
        };
        for key in ["ecr", "docker"] {
            if let Some(section) = sections.get_mut(key)
                && section.is_null()
            {
                *section = Value::Mapping(Mapping::new());
            }
        }
    }
}

/// Accepts any scalar for a string field; `account_id: 123456789012` is
/// common in hand-written files.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        Value::Sequence(_) => Err(de::Error::custom("expected a string, found a sequence")),
        Value::Mapping(_) => Err(de::Error::custom("expected a string, found a mapping")),
        Value::Tagged(tagged) => Err(de::Error::custom(format!(
            "expected a string, found tagged value {}",
            tagged.tag
        ))),
    }
}
