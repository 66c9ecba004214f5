use serde::Deserialize;

use crate::error::{ConfigError, ModelLoadError};

/// Location of the project config, relative to the hosting page.
pub const CONFIG_PATH: &str = "pebble.json";

/// Footer text shown when the config is unavailable or incomplete.
pub const CONFIG_FAILED: &str = "Config load failed";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelPathsConfig {
    pub model: Option<String>,
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiModelConfig {
    pub model_name: Option<String>,
    pub paths: Option<ModelPathsConfig>,
}

/// Contents of `pebble.json`. Every field is optional on the wire and
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    pub project: Option<ProjectInfo>,
    pub ai_model: Option<AiModelConfig>,
}

/// Resolved model locations, both guaranteed present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    pub model: String,
    pub metadata: String,
}

impl Configuration {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// `"{name} v{version} — {license} License"`, or `None` unless all
    /// three project fields are present and non-empty.
    pub fn footer_text(&self) -> Option<String> {
        let project = self.project.as_ref()?;
        let name = non_empty(&project.name)?;
        let version = non_empty(&project.version)?;
        let license = non_empty(&project.license)?;
        Some(format!("{name} v{version} — {license} License"))
    }

    pub fn version_label(&self) -> Option<String> {
        let version = non_empty(&self.project.as_ref()?.version)?;
        Some(format!("Version {version}"))
    }

    pub fn model_name(&self) -> Option<&str> {
        non_empty(&self.ai_model.as_ref()?.model_name)
    }

    pub fn model_paths(&self) -> Result<ModelPaths, ModelLoadError> {
        let paths = self
            .ai_model
            .as_ref()
            .and_then(|ai| ai.paths.as_ref())
            .ok_or(ModelLoadError::MissingPaths)?;

        match (non_empty(&paths.model), non_empty(&paths.metadata)) {
            (Some(model), Some(metadata)) => Ok(ModelPaths {
                model: model.to_string(),
                metadata: metadata.to_string(),
            }),
            _ => Err(ModelLoadError::MissingPaths),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Fetch and parse the config document.
pub async fn load(url: &str) -> Result<Configuration, ConfigError> {
    let response = gloo::net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| ConfigError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ConfigError::Status(response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| ConfigError::Network(e.to_string()))?;

    Configuration::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "project": { "name": "Pebble", "version": "1.2.0", "license": "MIT" },
        "aiModel": {
            "modelName": "rocks",
            "paths": { "model": "model/model.json", "metadata": "model/metadata.json" }
        }
    }"#;

    #[test]
    fn test_full_config_footer() {
        let config = Configuration::from_json(FULL).unwrap();
        assert_eq!(
            config.footer_text().as_deref(),
            Some("Pebble v1.2.0 — MIT License")
        );
        assert_eq!(config.version_label().as_deref(), Some("Version 1.2.0"));
        assert_eq!(config.model_name(), Some("rocks"));
    }

    #[test]
    fn test_model_paths_resolved() {
        let config = Configuration::from_json(FULL).unwrap();
        let paths = config.model_paths().unwrap();
        assert_eq!(paths.model, "model/model.json");
        assert_eq!(paths.metadata, "model/metadata.json");
    }

    #[test]
    fn test_footer_requires_every_project_field() {
        let docs = [
            r#"{"project": {"version": "1", "license": "MIT"}}"#,
            r#"{"project": {"name": "Pebble", "license": "MIT"}}"#,
            r#"{"project": {"name": "Pebble", "version": "1"}}"#,
            r#"{"project": {"name": "", "version": "1", "license": "MIT"}}"#,
            r#"{"project": {}}"#,
            r#"{}"#,
        ];
        for doc in docs {
            let config = Configuration::from_json(doc).unwrap();
            assert_eq!(config.footer_text(), None, "doc: {doc}");
        }
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config = Configuration::from_json(
            r#"{"project": {"name": "P", "version": "1", "license": "MIT", "extra": 3}, "theme": "dark"}"#,
        )
        .unwrap();
        assert!(config.footer_text().is_some());
    }

    #[test]
    fn test_missing_paths() {
        let config = Configuration::from_json(r#"{"aiModel": {"modelName": "x"}}"#).unwrap();
        assert_eq!(config.model_paths(), Err(ModelLoadError::MissingPaths));

        let config =
            Configuration::from_json(r#"{"aiModel": {"paths": {"model": "m.json"}}}"#).unwrap();
        assert_eq!(config.model_paths(), Err(ModelLoadError::MissingPaths));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Configuration::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
