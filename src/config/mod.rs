#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{FundingError, Result};
use crate::utils::validation::{
    validate_domain, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

pub const NFR_API_BASE_URI: &str = "NFR_API_BASE_URI";
pub const API_DOMAIN: &str = "API_DOMAIN";
pub const CUSTOM_DOMAIN_NAME_PATH: &str = "CUSTOM_DOMAIN_NAME_PATH";
pub const CRISTIN_BASE_PATH: &str = "CRISTIN_BASE_PATH";
pub const CRISTIN_FUNDING_SOURCES_PATH: &str = "CRISTIN_FUNDING_SOURCES_PATH";
pub const ALLOWED_ORIGIN: &str = "ALLOWED_ORIGIN";
pub const REQUEST_TIMEOUT_SECONDS: &str = "REQUEST_TIMEOUT_SECONDS";

pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Everything the service needs to know about its surroundings. Built once at
/// startup and handed to the services by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingConfig {
    pub nfr_api_base_uri: String,
    pub api_domain: String,
    pub custom_domain_name_path: String,
    pub cristin_base_path: String,
    pub cristin_funding_sources_path: String,
    pub allowed_origin: String,
    pub request_timeout_seconds: u64,
}

impl FundingConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            nfr_api_base_uri: required_env(NFR_API_BASE_URI)?,
            api_domain: required_env(API_DOMAIN)?,
            custom_domain_name_path: required_env(CUSTOM_DOMAIN_NAME_PATH)?,
            cristin_base_path: required_env(CRISTIN_BASE_PATH)?,
            cristin_funding_sources_path: required_env(CRISTIN_FUNDING_SOURCES_PATH)?,
            allowed_origin: env::var(ALLOWED_ORIGIN)
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string()),
            request_timeout_seconds: match env::var(REQUEST_TIMEOUT_SECONDS) {
                Ok(value) => {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| FundingError::InvalidConfigValueError {
                            field: REQUEST_TIMEOUT_SECONDS.to_string(),
                            value: value.clone(),
                            reason: "Value must be a whole number of seconds".to_string(),
                        })?
                }
                Err(_) => DEFAULT_REQUEST_TIMEOUT_SECONDS,
            },
        })
    }

    pub fn nfr_api_base_url(&self) -> Result<Url> {
        Url::parse(&self.nfr_api_base_uri).map_err(|e| FundingError::InvalidConfigValueError {
            field: "nfr_api_base_uri".to_string(),
            value: self.nfr_api_base_uri.clone(),
            reason: format!("Invalid URL format: {}", e),
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| FundingError::MissingConfigError {
        field: key.to_string(),
    })
}

impl Validate for FundingConfig {
    fn validate(&self) -> Result<()> {
        validate_url("nfr_api_base_uri", &self.nfr_api_base_uri)?;
        validate_domain("api_domain", &self.api_domain)?;
        validate_non_empty_string("custom_domain_name_path", &self.custom_domain_name_path)?;
        validate_non_empty_string("cristin_base_path", &self.cristin_base_path)?;
        validate_non_empty_string(
            "cristin_funding_sources_path",
            &self.cristin_funding_sources_path,
        )?;
        validate_non_empty_string("allowed_origin", &self.allowed_origin)?;
        validate_range("request_timeout_seconds", self.request_timeout_seconds, 1, 900)?;

        tracing::debug!("Funding configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn fixture_config(nfr_api_base_uri: &str) -> FundingConfig {
    FundingConfig {
        nfr_api_base_uri: nfr_api_base_uri.to_string(),
        api_domain: "localhost".to_string(),
        custom_domain_name_path: "verified-funding".to_string(),
        cristin_base_path: "cristin".to_string(),
        cristin_funding_sources_path: "funding-sources".to_string(),
        allowed_origin: "*".to_string(),
        request_timeout_seconds: 5,
    }
}
