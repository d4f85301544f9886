use std::path::Path;
use crate::errors::CrackError;
use super::attack::AttackConfig;
use super::types::CrackConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<CrackConfig, CrackError> {
    if !path.exists() {
        return Err(CrackError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(CrackError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse and validate YAML configuration text.
pub fn parse_config_str(content: &str) -> Result<CrackConfig, CrackError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // An empty file is a valid, all-defaults config
    if yaml.is_null() {
        return Ok(CrackConfig::default());
    }

    validate_schema(&yaml)?;

    let config: CrackConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), CrackError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| CrackError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| CrackError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; hard limits are enforced by `validate_conflicts`
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Reject settings that cannot produce a meaningful search.
fn validate_conflicts(config: &CrackConfig) -> Result<(), CrackError> {
    AttackConfig::from_file_config(config).validate()?;

    if let Some(catalog) = config.lcg.as_ref().and_then(|l| l.catalog.as_ref()) {
        if catalog.is_empty() {
            warn!("LCG catalog is empty; predictions will always fall back to extrapolation");
        }
        for generator in catalog.iter().filter(|g| g.m == 0) {
            warn!(generator = %generator.name, "LCG generator has zero modulus and will be skipped");
        }
    }

    if let Some(attack) = &config.attack {
        if attack.wordlist.as_ref().map_or(false, |w| w.is_empty()) {
            warn!("Configured wordlist is empty; only brute force will run");
        }
    }

    Ok(())
}
