use crate::adapters::notion::DEFAULT_BASE_URL;
use crate::core::cache::DEFAULT_TTL;
use crate::core::projector::ProjectSchema;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub notion: NotionSection,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub schema: ProjectSchema,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    pub name: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionSection {
    pub api_key: Option<String>,
    pub data_source_id: String,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSection {
    pub ttl_seconds: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: "./public".to_string(),
        }
    }
}

impl SiteConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string, substituting `${VAR}` placeholders.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ContentError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContentError::Config {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("site.name", &self.site.name)?;
        validation::validate_url("site.base_url", &self.site.base_url)?;

        let api_key = validation::validate_required_field("notion.api_key", &self.notion.api_key)?;
        validation::validate_non_empty_string("notion.api_key", api_key)?;
        validation::validate_no_placeholder("notion.api_key", api_key)?;

        validation::validate_non_empty_string("notion.data_source_id", &self.notion.data_source_id)?;
        validation::validate_no_placeholder("notion.data_source_id", &self.notion.data_source_id)?;
        validation::validate_url("notion.base_url", self.notion_base_url())?;

        if let Some(timeout) = self.notion.timeout_seconds {
            validation::validate_positive_number("notion.timeout_seconds", timeout, 1)?;
        }
        validation::validate_positive_number("cache.ttl_seconds", self.cache.ttl_seconds, 1)?;
        validation::validate_path("output.path", &self.output.path)?;

        Ok(())
    }

    pub fn api_key(&self) -> &str {
        self.notion.api_key.as_deref().unwrap_or_default()
    }

    pub fn notion_base_url(&self) -> &str {
        self.notion.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.notion.timeout_seconds.unwrap_or(30))
    }
}

impl ConfigProvider for SiteConfig {
    fn data_source_id(&self) -> &str {
        &self.notion.data_source_id
    }

    fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_seconds)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[site]
name = "Folio"
base_url = "https://folio.dev"

[notion]
api_key = "secret_abc"
data_source_id = "ds-123"
"#;

    #[test]
    fn test_parse_minimal_config_applies_defaults() {
        let config = SiteConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.site.name, "Folio");
        assert_eq!(config.data_source_id(), "ds-123");
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.output_path(), "./public");
        assert_eq!(config.notion_base_url(), "https://api.notion.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.schema, ProjectSchema::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_schema_overrides_keep_other_defaults() {
        let toml_content = format!(
            "{}\n[schema]\ntitle = \"이름\"\npublished_value = \"공개\"\n",
            MINIMAL
        );
        let config = SiteConfig::from_toml_str(&toml_content).unwrap();

        assert_eq!(config.schema.title, "이름");
        assert_eq!(config.schema.published_value, "공개");
        assert_eq!(config.schema.order, "Order");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FOLIO_TEST_NOTION_KEY", "secret_from_env");

        let toml_content = r#"
[site]
name = "Folio"
base_url = "https://folio.dev"

[notion]
api_key = "${FOLIO_TEST_NOTION_KEY}"
data_source_id = "ds-1"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "secret_from_env");

        std::env::remove_var("FOLIO_TEST_NOTION_KEY");
    }

    #[test]
    fn test_unset_placeholder_fails_validation() {
        let toml_content = r#"
[site]
name = "Folio"
base_url = "https://folio.dev"

[notion]
api_key = "${FOLIO_TEST_DEFINITELY_UNSET}"
data_source_id = "ds-1"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ContentError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_missing_api_key_and_zero_ttl() {
        let toml_content = r#"
[site]
name = "Folio"
base_url = "https://folio.dev"

[notion]
data_source_id = "ds-1"
"#;
        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ContentError::MissingConfig { .. })
        ));

        let zero_ttl = format!("{}\n[cache]\nttl_seconds = 0\n", MINIMAL);
        let config = SiteConfig::from_toml_str(&zero_ttl).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.site.base_url, "https://folio.dev");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        assert!(matches!(
            SiteConfig::from_toml_str("[site\nname ="),
            Err(ContentError::ConfigValidation { .. })
        ));
    }
}
