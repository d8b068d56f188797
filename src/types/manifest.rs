// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::attributes;
use crate::types::identity::ResourceIdentifier;
use std::fmt;

/// Opaque manifest document describing exactly one resource.
///
/// The body is only ever streamed to the client's stdin. It is marked
/// sensitive by the host, so neither `Debug` nor `Display` reveal it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Manifest(String);

impl Manifest {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<String> for Manifest {
    fn from(content: String) -> Self {
        Self(content)
    }
}

impl fmt::Debug for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Manifest({} bytes, sensitive)", self.0.len())
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<sensitive {}>", attributes::CONTENT)
    }
}

/// Host-side record of one managed manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestResource {
    pub content: Manifest,
    /// `None` while the resource is absent
    pub id: Option<ResourceIdentifier>,
}

impl ManifestResource {
    /// A resource that has not been created yet
    pub fn new(content: Manifest) -> Self {
        Self { content, id: None }
    }

    /// Rebuild from persisted state, where an empty id means "not present"
    pub fn from_state(content: Manifest, id: &str) -> Self {
        let id = if id.is_empty() {
            None
        } else {
            Some(ResourceIdentifier::new(id))
        };
        Self { content, id }
    }

    /// The id string to persist, empty when absent
    pub fn state_id(&self) -> &str {
        self.id.as_ref().map(|id| id.as_str()).unwrap_or("")
    }

    pub fn is_present(&self) -> bool {
        self.id.is_some()
    }
}
