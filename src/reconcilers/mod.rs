// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle reconcilers driven by the orchestrating host.

pub mod manifest;

pub use manifest::ManifestReconciler;
