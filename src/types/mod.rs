// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest, identifier and reference types.

pub mod identity;
pub mod manifest;

pub use identity::{ResourceIdentifier, ResourceReference};
pub use manifest::{Manifest, ManifestResource};
