// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubeconfig and context arguments shared by every invocation of one operation.

use crate::config::ProviderConfig;
use crate::constants::{attributes, flags, KUBECONFIG_TEMP_PREFIX};
use crate::error::{ManifestError, MaterializationStage, Result};
use kube::config::Kubeconfig;
use std::io::Write;
use std::path::Path;
use tempfile::TempPath;
use tracing::{debug, instrument, warn};

/// Global argument prefix for one lifecycle operation.
///
/// Owns the temporary kubeconfig written for inline content; the file is
/// removed when this value is dropped.
#[derive(Debug)]
pub struct ResolvedCredentials {
    args: Vec<String>,
    kubeconfig_file: Option<TempPath>,
}

impl ResolvedCredentials {
    /// `--kubeconfig <path>` then `--context <name>`, each only when configured
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Path of the temporary kubeconfig, if inline content was materialized
    pub fn temporary_kubeconfig(&self) -> Option<&Path> {
        self.kubeconfig_file.as_deref()
    }
}

impl Drop for ResolvedCredentials {
    fn drop(&mut self) {
        if let Some(file) = self.kubeconfig_file.take() {
            let path = file.to_path_buf();
            match file.close() {
                Ok(()) => debug!(path = %path.display(), "Removed temporary kubeconfig"),
                Err(e) => warn!(
                    "Failed to remove temporary kubeconfig {}: {}",
                    path.display(),
                    e
                ),
            }
        }
    }
}

/// Determine the kubeconfig and context arguments for `config`
#[instrument(skip(config))]
pub fn resolve(config: &ProviderConfig) -> Result<ResolvedCredentials> {
    config.validate()?;

    let mut kubeconfig_file = None;
    let kubeconfig = match (&config.kubeconfig, &config.kubeconfig_content) {
        (_, Some(content)) => {
            inspect_kubeconfig(content, config.kubeconfig_context.as_deref());
            let file = materialize(content, &std::env::temp_dir())?;
            let path = file.to_string_lossy().into_owned();
            kubeconfig_file = Some(file);
            Some(path)
        }
        (Some(path), None) => Some(path.clone()),
        (None, None) => None,
    };

    let mut args = Vec::new();
    if let Some(path) = kubeconfig {
        args.push(flags::KUBECONFIG.to_string());
        args.push(path);
    }
    if let Some(context) = &config.kubeconfig_context {
        args.push(flags::CONTEXT.to_string());
        args.push(context.clone());
    }

    Ok(ResolvedCredentials {
        args,
        kubeconfig_file,
    })
}

/// Write inline content to a fresh temporary file in `dir`.
///
/// On every error path the partially written file is dropped, which removes it.
fn materialize(content: &str, dir: &Path) -> Result<TempPath> {
    let stage_error = |stage: MaterializationStage| {
        move |source: std::io::Error| ManifestError::CredentialMaterialization { stage, source }
    };

    let mut file = tempfile::Builder::new()
        .prefix(KUBECONFIG_TEMP_PREFIX)
        .tempfile_in(dir)
        .map_err(stage_error(MaterializationStage::Create))?;

    file.write_all(content.as_bytes())
        .map_err(stage_error(MaterializationStage::Write))?;
    file.as_file()
        .sync_all()
        .map_err(stage_error(MaterializationStage::Close))?;

    debug!(path = %file.path().display(), "Wrote temporary kubeconfig");
    Ok(file.into_temp_path())
}

/// Warn early about inline content kubectl is going to reject anyway
fn inspect_kubeconfig(content: &str, context: Option<&str>) {
    let kubeconfig: Kubeconfig = match serde_yaml::from_str(content) {
        Ok(k) => k,
        Err(e) => {
            warn!(
                "{} does not parse as a kubeconfig: {}",
                attributes::KUBECONFIG_CONTENT,
                e
            );
            return;
        }
    };

    if let Some(context) = context {
        if !kubeconfig.contexts.iter().any(|c| c.name == context) {
            warn!(
                "{} '{}' is not defined in {}",
                attributes::KUBECONFIG_CONTEXT,
                context,
                attributes::KUBECONFIG_CONTENT
            );
        }
    }
}
