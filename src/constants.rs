// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Default client binary, resolved through PATH
pub const DEFAULT_KUBECTL: &str = "kubectl";

/// Resource type name the host manages through this provider
pub const RESOURCE_TYPE: &str = "k8s_manifest";

/// Global flags injected ahead of every subcommand
pub mod flags {
    pub const KUBECONFIG: &str = "--kubeconfig";
    pub const CONTEXT: &str = "--context";
    pub const NAMESPACE: &str = "-n";
    pub const IGNORE_NOT_FOUND: &str = "--ignore-not-found";
}

/// Provider and resource attribute names
pub mod attributes {
    pub const KUBECONFIG: &str = "kubeconfig";
    pub const KUBECONFIG_CONTENT: &str = "kubeconfig_content";
    pub const KUBECONFIG_CONTEXT: &str = "kubeconfig_context";
    /// Manifest body, sensitive
    pub const CONTENT: &str = "content";
}

/// Environment variables read by the binary
pub mod env {
    pub const KUBECONFIG: &str = "K8S_MANIFEST_KUBECONFIG";
    pub const KUBECONFIG_CONTENT: &str = "K8S_MANIFEST_KUBECONFIG_CONTENT";
    pub const KUBECONFIG_CONTEXT: &str = "K8S_MANIFEST_KUBECONFIG_CONTEXT";
    pub const KUBECTL: &str = "K8S_MANIFEST_KUBECTL";
    pub const ID: &str = "K8S_MANIFEST_ID";
}

/// Prefix of the temporary file holding inline kubeconfig content
pub const KUBECONFIG_TEMP_PREFIX: &str = "kubeconfig_";
