// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Self-link identifiers and the resource references derived from them.

use crate::error::{ManifestError, Result};
use serde::Deserialize;
use std::fmt;

/// Self-link of a live resource, the only state persisted between operations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier(String);

/// `kind/name` plus an optional namespace, as accepted by `kubectl get/delete`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReference {
    pub kind_name: String,
    pub namespace: Option<String>,
}

#[derive(Deserialize)]
struct ItemList {
    // kubectl may emit `"items": null` for an empty list
    #[serde(default)]
    items: Option<Vec<Item>>,
}

#[derive(Deserialize)]
struct Item {
    #[serde(default)]
    metadata: ItemMetadata,
}

#[derive(Deserialize, Default)]
struct ItemMetadata {
    #[serde(rename = "selfLink", alias = "selflink", default)]
    self_link: Option<String>,
}

impl ResourceIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the identifier from `kubectl get -f - -o json` output
    pub fn from_get_output(output: &[u8]) -> Result<Self> {
        let list: ItemList = serde_json::from_slice(output)?;
        let items = list.items.unwrap_or_default();

        let [item] = items.as_slice() else {
            return Err(ManifestError::UnexpectedItemCount { count: items.len() });
        };

        match item.metadata.self_link.as_deref() {
            Some(link) if !link.is_empty() => Ok(Self::new(link)),
            _ => Err(ManifestError::MissingSelfLink {
                response: output.to_vec(),
            }),
        }
    }

    /// Decode the identifier back into a reference for read and delete
    pub fn reference(&self) -> Result<ResourceReference> {
        ResourceReference::from_self_link(&self.0)
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ResourceReference {
    pub fn from_self_link(link: &str) -> Result<Self> {
        let parts: Vec<&str> = link.split('/').collect();
        let [.., kind, name] = parts.as_slice() else {
            return Err(ManifestError::MalformedIdentifier(link.to_string()));
        };
        let kind_name = format!("{}/{}", kind, name);

        let namespace = parts
            .iter()
            .position(|part| *part == "namespaces")
            .and_then(|i| parts.get(i + 1))
            .filter(|ns| !ns.is_empty())
            .map(|ns| ns.to_string());

        Ok(Self {
            kind_name,
            namespace,
        })
    }

    /// Arguments naming this resource, namespace-qualified when it has one
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.kind_name.clone()];
        if let Some(ns) = &self.namespace {
            args.push(crate::constants::flags::NAMESPACE.to_string());
            args.push(ns.clone());
        }
        args
    }
}
