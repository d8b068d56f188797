// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest reconciler - maps create/read/update/delete onto kubectl invocations.

use crate::config::ProviderConfig;
use crate::error::{ManifestError, Result};
use crate::kubectl::{resolve, CommandRunner, Kubectl, ProcessRunner, ResolvedCredentials};
use crate::types::{ManifestResource, ResourceIdentifier, ResourceReference};
use tracing::{debug, info, instrument};

pub struct ManifestReconciler<R: CommandRunner = ProcessRunner> {
    runner: R,
    kubectl: String,
}

impl ManifestReconciler<ProcessRunner> {
    pub fn new(kubectl: impl Into<String>) -> Self {
        Self::with_runner(ProcessRunner, kubectl)
    }
}

impl<R: CommandRunner> ManifestReconciler<R> {
    pub fn with_runner(runner: R, kubectl: impl Into<String>) -> Self {
        Self {
            runner,
            kubectl: kubectl.into(),
        }
    }

    /// Apply the manifest and record the self-link of the single resource it produced.
    ///
    /// The apply is not rolled back when identifying the resource fails.
    #[instrument(skip(self, config, resource))]
    pub async fn create(&self, config: &ProviderConfig, resource: &mut ManifestResource) -> Result<()> {
        let credentials = credentials(config)?;
        let kubectl = self.kubectl(&credentials);

        kubectl.apply(&resource.content).await?;
        let output = kubectl.get_json(&resource.content).await?;
        let id = ResourceIdentifier::from_get_output(&output.stdout)?;

        info!(id = %id, "Created resource");
        resource.id = Some(id);
        Ok(())
    }

    /// Re-apply the manifest. The stored id is kept as is.
    #[instrument(skip(self, config, resource), fields(id = %resource.state_id()))]
    pub async fn update(&self, config: &ProviderConfig, resource: &ManifestResource) -> Result<()> {
        let credentials = credentials(config)?;

        self.kubectl(&credentials).apply(&resource.content).await?;

        info!("Updated resource");
        Ok(())
    }

    /// Check the resource still exists, clearing the id when it is gone
    #[instrument(skip(self, config, resource), fields(id = %resource.state_id()))]
    pub async fn read(&self, config: &ProviderConfig, resource: &mut ManifestResource) -> Result<()> {
        let reference = reference(resource)?;
        let credentials = credentials(config)?;

        let output = self
            .kubectl(&credentials)
            .get_ignore_not_found(&reference)
            .await?;

        if String::from_utf8_lossy(&output.stdout).trim().is_empty() {
            info!("Resource {} no longer exists, clearing id", reference.kind_name);
            resource.id = None;
        } else {
            debug!("Resource {} exists", reference.kind_name);
        }
        Ok(())
    }

    /// Delete the resource. The caller clears the id once this succeeds.
    #[instrument(skip(self, config, resource), fields(id = %resource.state_id()))]
    pub async fn delete(&self, config: &ProviderConfig, resource: &ManifestResource) -> Result<()> {
        let reference = reference(resource)?;
        let credentials = credentials(config)?;

        self.kubectl(&credentials).delete(&reference).await?;

        info!("Deleted resource {}", reference.kind_name);
        Ok(())
    }

    fn kubectl<'a>(&'a self, credentials: &'a ResolvedCredentials) -> Kubectl<'a, R> {
        Kubectl::new(&self.runner, &self.kubectl, credentials)
    }
}

fn credentials(config: &ProviderConfig) -> Result<ResolvedCredentials> {
    resolve(config).map_err(|e| ManifestError::DeterminingCredentials(Box::new(e)))
}

fn reference(resource: &ManifestResource) -> Result<ResourceReference> {
    match &resource.id {
        Some(id) => id.reference(),
        None => Err(ManifestError::MalformedIdentifier(String::new())),
    }
}
