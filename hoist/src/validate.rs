use crate::config::Profile;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static ACCOUNT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("account id pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("ecr.account_id must be a 12-digit string")]
    InvalidAccountId,
}

/// Checks a selected profile before anything is executed. Only the first
/// failing check is reported.
pub fn validate(profile: &Profile) -> Result<(), ValidationError> {
    let ecr = &profile.ecr;

    if ecr.region.is_empty() {
        return Err(ValidationError::Missing("ecr.region"));
    }
    if ecr.account_id.is_empty() {
        return Err(ValidationError::Missing("ecr.account_id"));
    }
    if !ACCOUNT_ID.is_match(&ecr.account_id) {
        return Err(ValidationError::InvalidAccountId);
    }
    if ecr.repository.is_empty() {
        return Err(ValidationError::Missing("ecr.repository"));
    }
    if profile.docker.image_name.is_empty() {
        return Err(ValidationError::Missing("docker.image_name"));
    }

    Ok(())
}
