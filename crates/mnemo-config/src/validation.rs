// SPDX-FileCopyrightText: 2026 Mnemo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty identifiers and a similarity threshold within range.

use crate::diagnostic::ConfigError;
use crate::model::MnemoConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MnemoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    // user_id scopes the fact collection; an empty one would silently
    // merge every user into the same collection.
    if config.agent.user_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.user_id must not be empty".to_string(),
        });
    }

    if config.provider.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "provider.model must not be empty".to_string(),
        });
    }

    if config.provider.embedding_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "provider.embedding_model must not be empty".to_string(),
        });
    }

    if config.provider.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "provider.base_url must not be empty".to_string(),
        });
    }

    if config.provider.max_tokens < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "provider.max_tokens must be at least 1, got {}",
                config.provider.max_tokens
            ),
        });
    }

    if config.provider.timeout_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "provider.timeout_secs must be at least 1, got {}",
                config.provider.timeout_secs
            ),
        });
    }

    if config.memory.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "memory.database_path must not be empty".to_string(),
        });
    }

    let threshold = config.memory.similarity_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        errors.push(ConfigError::Validation {
            message: format!(
                "memory.similarity_threshold must be in (0.0, 1.0], got {threshold}"
            ),
        });
    }

    if config.memory.retrieval_k < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "memory.retrieval_k must be at least 1, got {}",
                config.memory.retrieval_k
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = MnemoConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = MnemoConfig::default();
        config.memory.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn empty_user_id_fails_validation() {
        let mut config = MnemoConfig::default();
        config.agent.user_id = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("user_id"))));
    }

    #[test]
    fn threshold_out_of_range_fails_validation() {
        for bad in [0.0, -0.1, 1.5] {
            let mut config = MnemoConfig::default();
            config.memory.similarity_threshold = bad;
            let errors = validate_config(&config).unwrap_err();
            assert!(
                errors.iter().any(|e| matches!(
                    e,
                    ConfigError::Validation { message } if message.contains("similarity_threshold")
                )),
                "threshold {bad} should fail validation"
            );
        }
    }

    #[test]
    fn threshold_of_exactly_one_validates() {
        let mut config = MnemoConfig::default();
        config.memory.similarity_threshold = 1.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_retrieval_k_fails_validation() {
        let mut config = MnemoConfig::default();
        config.memory.retrieval_k = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("retrieval_k"))));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = MnemoConfig::default();
        config.agent.user_id = "".to_string();
        config.provider.model = "".to_string();
        config.memory.retrieval_k = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn unknown_fields_are_denied() {
        let toml_str = r#"
[agent]
name = "test"
unknown_field = "bad"
"#;
        let result = toml::from_str::<MnemoConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = MnemoConfig::default();
        config.agent.user_id = "alice".to_string();
        config.memory.database_path = "/tmp/test.db".to_string();
        config.memory.similarity_threshold = 0.8;
        config.memory.retrieval_k = 5;
        assert!(validate_config(&config).is_ok());
    }
}
