// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use std::env;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use k8s_manifest::config::Config;
use k8s_manifest::constants::{env as env_vars, RESOURCE_TYPE};
use k8s_manifest::reconcilers::ManifestReconciler;
use k8s_manifest::types::{Manifest, ManifestResource};

const USAGE: &str = "usage: k8s-manifest <create|read|update|delete>";

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the resulting id
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let verb = env::args().nth(1).context(USAGE)?;
    let config = Config::from_env()?;
    let id = env::var(env_vars::ID).unwrap_or_default();
    info!(
        "Running {} for {} with {:?}",
        verb, RESOURCE_TYPE, config.provider
    );

    let reconciler = ManifestReconciler::new(config.kubectl.as_str());

    let resource = match verb.as_str() {
        "create" => {
            let mut resource = ManifestResource::new(read_manifest().await?);
            reconciler.create(&config.provider, &mut resource).await?;
            resource
        }
        "read" => {
            let mut resource = ManifestResource::from_state(Manifest::default(), &id);
            reconciler.read(&config.provider, &mut resource).await?;
            resource
        }
        "update" => {
            let resource = ManifestResource::from_state(read_manifest().await?, &id);
            reconciler.update(&config.provider, &resource).await?;
            resource
        }
        "delete" => {
            let mut resource = ManifestResource::from_state(Manifest::default(), &id);
            reconciler.delete(&config.provider, &resource).await?;
            resource.id = None;
            resource
        }
        other => bail!("unknown lifecycle operation '{}'; {}", other, USAGE),
    };

    println!("{}", resource.state_id());
    Ok(())
}

async fn read_manifest() -> Result<Manifest> {
    let mut content = String::new();
    tokio::io::stdin()
        .read_to_string(&mut content)
        .await
        .context("reading manifest from stdin")?;
    Ok(Manifest::from(content))
}
