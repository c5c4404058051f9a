//! JSON configuration for the question generation pipeline.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Deployment used when the model config does not name one.
pub const DEFAULT_DEPLOYMENT: &str = "gpt-4.1";

/// Sampling parameters sent with every chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_penalty")]
    pub frequency_penalty: f32,
    #[serde(default = "default_penalty")]
    pub presence_penalty: f32,
}

fn default_max_tokens() -> u32 {
    10_000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.8
}

fn default_penalty() -> f32 {
    0.1
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            frequency_penalty: default_penalty(),
            presence_penalty: default_penalty(),
        }
    }
}

/// Connection settings for the chat completion endpoint.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Service base URL, e.g. `https://myresource.openai.azure.com`.
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    #[serde(default = "default_deployment")]
    pub deployment: String,
    #[serde(flatten)]
    pub params: GenerationParams,
}

fn default_deployment() -> String {
    DEFAULT_DEPLOYMENT.to_string()
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .field("params", &self.params)
            .finish()
    }
}

impl ModelConfig {
    /// Load and validate a model config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = load_json(path.as_ref(), "Model configuration file")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that cannot produce a request.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("endpoint", &self.endpoint),
            ("api_key", &self.api_key),
            ("api_version", &self.api_version),
            ("deployment", &self.deployment),
        ] {
            if value.trim().is_empty() {
                return Err(SchemaError::InvalidConfig(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Locations of the three table schemas and the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    pub table1_schema_path: PathBuf,
    pub table2_schema_path: PathBuf,
    pub table3_schema_path: PathBuf,
    pub output_path: PathBuf,
}

impl DataConfig {
    /// Load a data config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path.as_ref(), "Data configuration file")
    }

    /// Schema paths in table order.
    pub fn schema_paths(&self) -> [&Path; 3] {
        [
            &self.table1_schema_path,
            &self.table2_schema_path,
            &self.table3_schema_path,
        ]
    }
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<T> {
    if !path.exists() {
        return Err(SchemaError::NotFound {
            what,
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| SchemaError::InvalidConfig(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_model_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "openai_config.json",
            r#"{"endpoint": "https://example.openai.azure.com", "api_key": "k", "api_version": "2024-12-01-preview"}"#,
        );

        let config = ModelConfig::load(&path).unwrap();
        assert_eq!(config.deployment, DEFAULT_DEPLOYMENT);
        assert_eq!(config.params, GenerationParams::default());
        assert_eq!(config.params.max_tokens, 10_000);
    }

    #[test]
    fn test_model_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "openai_config.json",
            r#"{"endpoint": "https://e", "api_key": "k", "api_version": "v", "deployment": "gpt-4o", "temperature": 0.2}"#,
        );

        let config = ModelConfig::load(&path).unwrap();
        assert_eq!(config.deployment, "gpt-4o");
        assert_eq!(config.params.temperature, 0.2);
        assert_eq!(config.params.top_p, 0.8);
    }

    #[test]
    fn test_model_config_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "openai_config.json", r#"{"endpoint": "https://e"}"#);
        assert!(matches!(ModelConfig::load(&path), Err(SchemaError::InvalidConfig(_))));

        let path = write(
            &dir,
            "blank.json",
            r#"{"endpoint": " ", "api_key": "k", "api_version": "v"}"#,
        );
        assert!(matches!(ModelConfig::load(&path), Err(SchemaError::InvalidConfig(_))));
    }

    #[test]
    fn test_model_config_debug_redacts_key() {
        let config = ModelConfig {
            endpoint: "https://e".to_string(),
            api_key: "super-secret".to_string(),
            api_version: "v".to_string(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            params: GenerationParams::default(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_data_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "data_config.json",
            r#"{"table1_schema_path": "a.json", "table2_schema_path": "b.json",
                "table3_schema_path": "c.json", "output_path": "out"}"#,
        );

        let config = DataConfig::load(&path).unwrap();
        assert_eq!(
            config.schema_paths(),
            [Path::new("a.json"), Path::new("b.json"), Path::new("c.json")]
        );
        assert_eq!(config.output_path, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DataConfig::load(dir.path().join("data_config.json"));
        assert!(matches!(result, Err(SchemaError::NotFound { .. })));
    }
}
