use crate::config::Profile;
use std::fmt;

/// Local and remote names for the image a profile publishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRefs {
    pub host: String,
    pub local: String,
    pub remote: String,
}

impl ImageRefs {
    pub fn for_profile(profile: &Profile) -> Self {
        let ecr = &profile.ecr;
        let host = registry_host(&ecr.account_id, &ecr.region);
        let local = format!("{}:{}", profile.docker.image_name, ecr.image_tag);
        let remote = format!("{host}/{}:{}", ecr.repository, ecr.image_tag);

        Self {
            host,
            local,
            remote,
        }
    }
}

impl fmt::Display for ImageRefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.local, self.remote)
    }
}

pub fn registry_host(account_id: &str, region: &str) -> String {
    format!("{account_id}.dkr.ecr.{region}.amazonaws.com")
}
