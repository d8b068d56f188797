// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as env_vars, DEFAULT_KUBECTL};
use crate::error::{ManifestError, Result};
use std::env;

/// Credential and context settings handed to every lifecycle operation
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Path to a kubeconfig file
    pub kubeconfig: Option<String>,
    /// Inline kubeconfig document, written to a temporary file per operation
    pub kubeconfig_content: Option<String>,
    /// Context selected from the kubeconfig
    pub kubeconfig_context: Option<String>,
}

impl ProviderConfig {
    /// Build from the host's raw attribute values, where an empty string means unset
    pub fn from_attributes(kubeconfig: &str, kubeconfig_content: &str, kubeconfig_context: &str) -> Self {
        Self {
            kubeconfig: non_empty(kubeconfig),
            kubeconfig_content: non_empty(kubeconfig_content),
            kubeconfig_context: non_empty(kubeconfig_context),
        }
    }

    /// Reject configurations that set both a kubeconfig path and inline content
    pub fn validate(&self) -> Result<()> {
        if self.kubeconfig.is_some() && self.kubeconfig_content.is_some() {
            return Err(ManifestError::ConflictingCredentials);
        }
        Ok(())
    }
}

// Inline content is a credential, so only its presence is shown.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kubeconfig", &self.kubeconfig)
            .field(
                "kubeconfig_content",
                &self.kubeconfig_content.as_ref().map(|_| "<redacted>"),
            )
            .field("kubeconfig_context", &self.kubeconfig_context)
            .finish()
    }
}

/// Binary configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    /// Client binary to invoke
    pub kubectl: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let provider = ProviderConfig::from_attributes(
            &env::var(env_vars::KUBECONFIG).unwrap_or_default(),
            &env::var(env_vars::KUBECONFIG_CONTENT).unwrap_or_default(),
            &env::var(env_vars::KUBECONFIG_CONTEXT).unwrap_or_default(),
        );
        let kubectl = env::var(env_vars::KUBECTL)
            .ok()
            .and_then(|v| non_empty(&v))
            .unwrap_or_else(|| DEFAULT_KUBECTL.to_string());

        Ok(Config { provider, kubectl })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes_treats_empty_as_unset() {
        let config = ProviderConfig::from_attributes("", "", "dev");

        assert_eq!(config.kubeconfig, None);
        assert_eq!(config.kubeconfig_content, None);
        assert_eq!(config.kubeconfig_context.as_deref(), Some("dev"));
    }

    #[test]
    fn test_validate_rejects_path_and_content() {
        let config = ProviderConfig::from_attributes("/tmp/kubeconfig", "apiVersion: v1", "");

        assert!(matches!(
            config.validate(),
            Err(ManifestError::ConflictingCredentials)
        ));
    }

    #[test]
    fn test_validate_accepts_single_source() {
        assert!(ProviderConfig::from_attributes("/tmp/kubeconfig", "", "ctx")
            .validate()
            .is_ok());
        assert!(ProviderConfig::from_attributes("", "apiVersion: v1", "")
            .validate()
            .is_ok());
        assert!(ProviderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_inline_content() {
        let config = ProviderConfig::from_attributes("", "token: hunter2", "");

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
