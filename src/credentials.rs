//! AWS credential and region resolution from the process environment.
//!
//! Invoked only when the configured vendor is `aws`. Missing credentials
//! are fatal at setup; a missing region falls back to a default with a
//! warning.

use std::env;

use tracing::warn;

use crate::error::{EmitterError, Result};

/// Environment variable for the AWS access key id.
pub const ACCESS_KEY_ID_ENV_VAR: &str = "AWS_ACCESS_KEY_ID";
/// Environment variable for the AWS secret access key.
pub const SECRET_ACCESS_KEY_ENV_VAR: &str = "AWS_SECRET_ACCESS_KEY";
/// Environment variable for the AWS region.
pub const REGION_ENV_VAR: &str = "AWS_DEFAULT_REGION";
/// Region used when `AWS_DEFAULT_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Broker-access credentials, derived once at setup and read-only after.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Read the required credential environment variables.
///
/// Fails with a setup error if either variable is absent or empty;
/// construction must not proceed past this.
pub fn resolve_credentials() -> Result<AwsCredentials> {
    let access_key_id = env::var(ACCESS_KEY_ID_ENV_VAR)
        .ok()
        .filter(|v| !v.is_empty());
    let secret_access_key = env::var(SECRET_ACCESS_KEY_ENV_VAR)
        .ok()
        .filter(|v| !v.is_empty());

    match (access_key_id, secret_access_key) {
        (Some(access_key_id), Some(secret_access_key)) => Ok(AwsCredentials {
            access_key_id,
            secret_access_key,
        }),
        _ => Err(EmitterError::Setup(format!(
            "Need to define both environment variables [{}, {}]",
            ACCESS_KEY_ID_ENV_VAR, SECRET_ACCESS_KEY_ENV_VAR
        ))),
    }
}

/// Read the region environment variable, falling back to [`DEFAULT_REGION`].
pub fn resolve_region() -> String {
    match env::var(REGION_ENV_VAR) {
        Ok(region) if !region.is_empty() => region,
        _ => {
            warn!(
                default = DEFAULT_REGION,
                "{} not set, falling back to default region", REGION_ENV_VAR
            );
            DEFAULT_REGION.to_string()
        }
    }
}
