use crate::config::{FundingConfig, DEFAULT_ALLOWED_ORIGIN, DEFAULT_REQUEST_TIMEOUT_SECONDS};
use crate::utils::error::{FundingError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub nfr: NfrSection,
    pub api: ApiSection,
    pub funding_sources: FundingSourcesSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NfrSection {
    pub api_base_uri: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub domain: String,
    pub base_path: String,
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingSourcesSection {
    pub base_path: String,
    pub path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FundingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FundingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_DOMAIN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FundingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl From<TomlConfig> for FundingConfig {
    fn from(config: TomlConfig) -> Self {
        Self {
            nfr_api_base_uri: config.nfr.api_base_uri,
            api_domain: config.api.domain,
            custom_domain_name_path: config.api.base_path,
            cristin_base_path: config.funding_sources.base_path,
            cristin_funding_sources_path: config.funding_sources.path,
            allowed_origin: config
                .api
                .allowed_origin
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            request_timeout_seconds: config
                .nfr
                .timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

impl FundingConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        TomlConfig::from_file(path).map(Self::from)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        TomlConfig::from_toml_str(content).map(Self::from)
    }
}
