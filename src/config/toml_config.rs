use crate::core::normalizer::{DEFAULT_CREATOR, DEFAULT_CURRENCY};
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::{
    validate_currency_code, validate_one_of, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_VERIFICATION_ENDPOINT: &str = "https://proverkacheka.com/api/v1/check/get";
pub const OUTPUT_FORMATS: &[&str] = &["json", "csv", "table"];

/// `bill-split.toml` 的內容，所有區段都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: DefaultsConfig,
    pub verification: VerificationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub currency: String,
    pub created_by: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            created_by: DEFAULT_CREATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_seconds: u64,
}

impl VerificationConfig {
    /// 空白或未被環境變數取代的 `${VAR}` 都視為沒有 token
    pub fn resolved_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty() && !t.starts_with("${"))
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_VERIFICATION_ENDPOINT.to_string(),
            token: None,
            timeout_seconds: 10,
            retry_attempts: 3,
            retry_delay_seconds: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SplitError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SplitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROVERKACHEKA_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern must compile"));

        ENV_VAR
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn verification_token(&self) -> Option<&str> {
        self.verification.resolved_token()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_currency_code("defaults.currency", &self.defaults.currency)?;

        if self.defaults.created_by.trim().is_empty() {
            return Err(SplitError::InvalidConfigValueError {
                field: "defaults.created_by".to_string(),
                value: self.defaults.created_by.clone(),
                reason: "Creator name cannot be empty".to_string(),
            });
        }

        validate_url("verification.endpoint", &self.verification.endpoint)?;
        validate_positive_number(
            "verification.timeout_seconds",
            self.verification.timeout_seconds,
            1,
        )?;
        validate_positive_number(
            "verification.retry_attempts",
            u64::from(self.verification.retry_attempts),
            1,
        )?;
        validate_one_of("output.format", &self.output.format, OUTPUT_FORMATS)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.defaults.currency, "RUB");
        assert_eq!(config.defaults.created_by, "Anonymous");
        assert_eq!(config.verification.endpoint, DEFAULT_VERIFICATION_ENDPOINT);
        assert_eq!(config.verification.retry_attempts, 3);
        assert_eq!(config.output.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[defaults]
currency = "EUR"
created_by = "Host"

[verification]
endpoint = "https://check.example.com/api"
token = "secret"
timeout_seconds = 5
retry_attempts = 2
retry_delay_seconds = 0

[output]
format = "table"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.defaults.currency, "EUR");
        assert_eq!(config.verification.timeout_seconds, 5);
        assert_eq!(config.verification_token(), Some("secret"));
        assert_eq!(config.output.format, "table");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BILL_SPLIT_TEST_TOKEN", "from-env");

        let config = AppConfig::from_toml_str(
            r#"
[verification]
token = "${BILL_SPLIT_TEST_TOKEN}"
"#,
        )
        .unwrap();
        assert_eq!(config.verification_token(), Some("from-env"));

        std::env::remove_var("BILL_SPLIT_TEST_TOKEN");
    }

    #[test]
    fn test_unset_env_var_is_not_a_token() {
        let config = AppConfig::from_toml_str(
            r#"
[verification]
token = "${BILL_SPLIT_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.verification_token(), None);
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[defaults]\ncurrency = \"rub\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[output]\nformat = \"xml\"\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            AppConfig::from_toml_str("[verification]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[defaults]\ncurrency = \"USD\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.defaults.currency, "USD");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = AppConfig::from_toml_str("[defaults\n").unwrap_err();
        assert!(matches!(err, SplitError::ConfigValidationError { .. }));
    }
}
