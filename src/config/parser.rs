use std::path::Path;
use crate::errors::CredisourceError;
use super::types::CredisourceConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_CONFIG_BYTES: u64 = 1_048_576;
const MIN_INTERVAL_MS: u64 = 100;

pub async fn parse_config(path: &Path) -> Result<CredisourceConfig, CredisourceError> {
    if !path.exists() {
        return Err(CredisourceError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(CredisourceError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse and validate configuration from YAML text.
pub fn parse_config_str(content: &str) -> Result<CredisourceConfig, CredisourceError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // An empty file is a valid, empty config
    if yaml.is_null() {
        return Ok(CredisourceConfig::default());
    }

    validate_schema(&yaml)?;

    let config: CredisourceConfig = serde_yaml::from_value(yaml)?;

    validate_values(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), CredisourceError> {
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| CredisourceError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| CredisourceError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| CredisourceError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory: typed parsing and value checks below are authoritative
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Reject values that parse but cannot work.
fn validate_values(config: &CredisourceConfig) -> Result<(), CredisourceError> {
    if let Some(api) = &config.api {
        if let Some(base_url) = &api.base_url {
            validate_base_url(base_url)?;
        }
        if api.request_timeout_secs == Some(0) {
            return Err(CredisourceError::Config("api.request_timeout_secs must be at least 1".into()));
        }
    }

    if let Some(polling) = &config.polling {
        if let Some(interval) = polling.interval_ms {
            if interval < MIN_INTERVAL_MS {
                return Err(CredisourceError::Config(format!(
                    "polling.interval_ms must be at least {} (got {})",
                    MIN_INTERVAL_MS, interval
                )));
            }
        }
        if polling.max_attempts == Some(0) {
            return Err(CredisourceError::Config("polling.max_attempts must be at least 1".into()));
        }
    }

    Ok(())
}

/// The backend base URL must be an absolute http(s) URL.
pub fn validate_base_url(base_url: &str) -> Result<(), CredisourceError> {
    let parsed = reqwest::Url::parse(base_url)
        .map_err(|e| CredisourceError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CredisourceError::Config(format!(
            "Base URL must use http or https: {}",
            base_url
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config_str(
            "api:\n  base_url: http://localhost:8000\n  request_timeout_secs: 10\npolling:\n  interval_ms: 2000\n  max_attempts: 60\n",
        ).unwrap();
        assert_eq!(config.api.unwrap().base_url.as_deref(), Some("http://localhost:8000"));
        let polling = config.polling.unwrap();
        assert_eq!(polling.interval_ms, Some(2000));
        assert_eq!(polling.max_attempts, Some(60));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config_str("").unwrap();
        assert!(config.api.is_none());
    }

    #[test]
    fn test_interval_too_small_rejected() {
        let err = parse_config_str("polling:\n  interval_ms: 10\n").unwrap_err();
        assert!(matches!(err, CredisourceError::Config(_)));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert!(parse_config_str("polling:\n  max_attempts: 0\n").is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        assert!(parse_config_str("api:\n  base_url: ftp://example.com\n").is_err());
        assert!(parse_config_str("api:\n  base_url: not a url\n").is_err());
    }

    #[test]
    fn test_wrong_type_is_yaml_error() {
        let err = parse_config_str("polling:\n  max_attempts: lots\n").unwrap_err();
        assert!(matches!(err, CredisourceError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = parse_config(Path::new("/nonexistent/credisource.yaml")).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_parse_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("credisource.yaml");
        tokio::fs::write(&path, "api:\n  base_url: https://verify.example\n").await.unwrap();
        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.api.unwrap().base_url.as_deref(), Some("https://verify.example"));
    }

    #[tokio::test]
    async fn test_oversized_file_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("huge.yaml");
        let mut content = String::from("api:\n  base_url: https://verify.example\n");
        content.push_str(&"#".repeat(MAX_CONFIG_BYTES as usize));
        tokio::fs::write(&path, content).await.unwrap();

        let err = parse_config(&path).await.unwrap_err();
        assert!(matches!(err, CredisourceError::Config(_)));
        assert!(err.to_string().contains("1MB"));
    }
}
