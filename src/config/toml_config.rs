use crate::config::database::DatabaseConfig;
use crate::utils::error::{BoardError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("environment variable pattern is a valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值
    pub fn from_optional_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            tracing::debug!("Loading configuration from {}", path.as_ref().display());
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BoardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DB_URL})；未設定的變數保持原樣
    pub fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.database.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[database]
url = "sqlite://boards/test.db"
max_connections = 3
acquire_timeout_seconds = 10
create_if_missing = false
auto_migrate = false

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.database.url, "sqlite://boards/test.db");
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.database.acquire_timeout_seconds, 10);
        assert!(!config.database.create_if_missing);
        assert!(!config.database.auto_migrate);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.database.url, "sqlite://taskboard.db");
        assert!(config.database.auto_migrate);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TASKBOARD_TEST_DB_URL", "sqlite://from-env.db");

        let toml_content = r#"
[database]
url = "${TASKBOARD_TEST_DB_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.database.url, "sqlite://from-env.db");

        std::env::remove_var("TASKBOARD_TEST_DB_URL");
    }

    #[test]
    fn test_unknown_env_var_is_kept() {
        let content = "url = \"${TASKBOARD_SURELY_UNSET_VAR}\"";
        assert_eq!(TomlConfig::substitute_env_vars(content), content);
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[database]
url = "postgres://localhost/board"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[database]\nmax_connections = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_database_url_is_reported_missing() {
        let config = TomlConfig::from_toml_str("[database]\nurl = \"\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, BoardError::MissingConfigError { .. }));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[database\nurl = 1").unwrap_err();
        assert!(matches!(err, BoardError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[database]\nurl = \"sqlite://file-test.db\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.database.url, "sqlite://file-test.db");
    }

    #[test]
    fn test_optional_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = TomlConfig::from_optional_file(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, TomlConfig::default());
    }
}
