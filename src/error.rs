// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::attributes;
use std::fmt;
use thiserror::Error;

/// Step of materializing inline kubeconfig content that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializationStage {
    Create,
    Write,
    Close,
}

impl fmt::Display for MaterializationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("creating a kubeconfig file"),
            Self::Write => f.write_str("writing kubeconfig to file"),
            Self::Close => f.write_str("completion of write to kubeconfig file"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("{}", render_invocation_failure(.command, .cause, .stderr))]
    InvocationFailure {
        command: String,
        cause: String,
        stderr: Vec<u8>,
    },

    #[error("{command}: {source}")]
    CommandExecution {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "both {} and {} are defined, please use only one of the parameters",
        attributes::KUBECONFIG,
        attributes::KUBECONFIG_CONTENT
    )]
    ConflictingCredentials,

    #[error("{stage}: {source}")]
    CredentialMaterialization {
        stage: MaterializationStage,
        #[source]
        source: std::io::Error,
    },

    #[error("determining kubeconfig: {0}")]
    DeterminingCredentials(#[source] Box<ManifestError>),

    #[error("decoding response: {0}")]
    ResponseDecode(#[from] serde_json::Error),

    #[error("expected to create 1 resource, got {count}")]
    UnexpectedItemCount { count: usize },

    // The response may echo sensitive manifest data, so only its size is rendered.
    #[error("could not parse self-link from response ({} bytes)", .response.len())]
    MissingSelfLink { response: Vec<u8> },

    #[error("invalid resource id: {0}")]
    MalformedIdentifier(String),
}

impl ManifestError {
    /// Unwrap the "determining kubeconfig" context, if any
    pub fn root(&self) -> &ManifestError {
        match self {
            Self::DeterminingCredentials(inner) => inner.root(),
            other => other,
        }
    }
}

fn render_invocation_failure(command: &str, cause: &str, stderr: &[u8]) -> String {
    if stderr.is_empty() {
        format!("{}: {}", command, cause)
    } else {
        format!("{} {}: {}", command, cause, String::from_utf8_lossy(stderr))
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_failure_without_stderr() {
        let err = ManifestError::InvocationFailure {
            command: "kubectl apply -f -".to_string(),
            cause: "exit status 1".to_string(),
            stderr: Vec::new(),
        };

        assert_eq!(err.to_string(), "kubectl apply -f -: exit status 1");
    }

    #[test]
    fn test_invocation_failure_with_stderr_is_verbatim() {
        let err = ManifestError::InvocationFailure {
            command: "kubectl delete pods/bar".to_string(),
            cause: "exit status 1".to_string(),
            stderr: b"Error from server (NotFound): pods \"bar\" not found\n".to_vec(),
        };

        assert_eq!(
            err.to_string(),
            "kubectl delete pods/bar exit status 1: Error from server (NotFound): pods \"bar\" not found\n"
        );
    }

    #[test]
    fn test_determining_credentials_context() {
        let err = ManifestError::DeterminingCredentials(Box::new(
            ManifestError::ConflictingCredentials,
        ));

        assert!(err
            .to_string()
            .starts_with("determining kubeconfig: both kubeconfig and kubeconfig_content"));
        assert!(matches!(err.root(), ManifestError::ConflictingCredentials));
    }

    #[test]
    fn test_missing_self_link_hides_response() {
        let err = ManifestError::MissingSelfLink {
            response: br#"{"items":[{"data":{"password":"hunter2"}}]}"#.to_vec(),
        };

        assert!(!err.to_string().contains("hunter2"));
        assert_eq!(
            err.to_string(),
            "could not parse self-link from response (43 bytes)"
        );
    }

    #[test]
    fn test_materialization_stage_message() {
        let err = ManifestError::CredentialMaterialization {
            stage: MaterializationStage::Write,
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };

        assert_eq!(err.to_string(), "writing kubeconfig to file: disk full");
    }
}
